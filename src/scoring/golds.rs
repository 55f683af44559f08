use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::{FaceType, ScoringProfile};
use crate::round::ArrowScore;

/// Which arrows count as golds on the score pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldsType {
    Nines,
    Tens,
    Xs,
}

impl GoldsType {
    pub fn is_gold(&self, value: u8, is_x: bool) -> bool {
        match self {
            GoldsType::Nines => value >= 9,
            GoldsType::Tens => value == 10,
            GoldsType::Xs => value == 10 && is_x,
        }
    }

    pub fn is_gold_arrow(&self, arrow: &ArrowScore) -> bool {
        self.is_gold(arrow.value, arrow.is_x)
    }

    /// Imperial five-zone rounds count nines, ten-zone faces count tens.
    ///
    /// Worcester rings score 5 down to 1, so no golds type matches any of
    /// its arrows and the column stays at 0 whichever is picked.
    pub fn default_for(profile: &ScoringProfile) -> Self {
        match profile.face {
            FaceType::Imperial => GoldsType::Nines,
            FaceType::Metric
            | FaceType::Triple
            | FaceType::Vegas
            | FaceType::FitaFiveZone
            | FaceType::FitaSixZone => GoldsType::Tens,
            FaceType::Worcester => GoldsType::Tens,
        }
    }

    /// Column heading for the golds column.
    pub fn label(&self) -> &'static str {
        match self {
            GoldsType::Nines => "9s",
            GoldsType::Tens => "10s",
            GoldsType::Xs => "Xs",
        }
    }
}

impl fmt::Display for GoldsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
