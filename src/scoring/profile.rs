use serde::{Deserialize, Serialize};

use crate::round::Round;

/// Target face families. Faces with identical scoring physics share a
/// profile (see [`FaceType::profile`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceType {
    Imperial,
    Metric,
    Triple,
    Vegas,
    FitaFiveZone,
    Worcester,
    FitaSixZone,
}

/// Constants of the score decay model for one face type.
///
/// Average score per arrow is
/// `initial - sum_multiplier * sum(ring(sum_denominator / i)) - subtract_multiplier * ring(subtract_denominator)`
/// with `i` running over `sum_start..=sum_end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringProfile {
    pub face: FaceType,
    pub initial: f64,
    pub sum_multiplier: f64,
    pub sum_start: u32,
    pub sum_end: u32,
    pub sum_internal_denominator: f64,
    pub subtract_internal_denominator: f64,
    pub subtract_multiplier: f64,
}

impl ScoringProfile {
    /// Faces with a ten zone can be scored with inner-ten rules.
    pub fn has_ten_zone(&self) -> bool {
        self.initial == 10.0
    }
}

pub const IMPERIAL: ScoringProfile = ScoringProfile {
    face: FaceType::Imperial,
    initial: 9.0,
    sum_multiplier: 2.0,
    sum_start: 1,
    sum_end: 4,
    sum_internal_denominator: 10.0,
    subtract_internal_denominator: 2.0,
    subtract_multiplier: 1.0,
};

pub const METRIC: ScoringProfile = ScoringProfile {
    face: FaceType::Metric,
    initial: 10.0,
    sum_multiplier: 1.0,
    sum_start: 1,
    sum_end: 10,
    sum_internal_denominator: 20.0,
    subtract_internal_denominator: 0.0,
    subtract_multiplier: 0.0,
};

// 40/80cm faces cut after the 6 ring
pub const TRIPLE: ScoringProfile = ScoringProfile {
    face: FaceType::Triple,
    initial: 10.0,
    sum_multiplier: 1.0,
    sum_start: 1,
    sum_end: 4,
    sum_internal_denominator: 20.0,
    subtract_internal_denominator: 4.0,
    subtract_multiplier: 6.0,
};

pub const WORCESTER: ScoringProfile = ScoringProfile {
    face: FaceType::Worcester,
    initial: 5.0,
    sum_multiplier: 1.0,
    sum_start: 1,
    sum_end: 5,
    sum_internal_denominator: 10.0,
    subtract_internal_denominator: 0.0,
    subtract_multiplier: 0.0,
};

// 80cm face cut after the 5 ring
pub const FITA_SIX_ZONE: ScoringProfile = ScoringProfile {
    face: FaceType::FitaSixZone,
    initial: 10.0,
    sum_multiplier: 1.0,
    sum_start: 1,
    sum_end: 5,
    sum_internal_denominator: 20.0,
    subtract_internal_denominator: 3.33,
    subtract_multiplier: 5.0,
};

impl FaceType {
    pub fn profile(self) -> ScoringProfile {
        match self {
            FaceType::Imperial => IMPERIAL,
            FaceType::Metric => METRIC,
            FaceType::Triple | FaceType::Vegas | FaceType::FitaFiveZone => {
                ScoringProfile { face: self, ..TRIPLE }
            }
            FaceType::Worcester => WORCESTER,
            FaceType::FitaSixZone => FITA_SIX_ZONE,
        }
    }
}

const SPECIAL_ROUND_NAMES: [(&str, FaceType); 2] =
    [("worcester", FaceType::Worcester), ("vegas", FaceType::Vegas)];

// "ten zone" covers imperial-distance rounds scored on metric faces (Portsmouth)
const FACE_HINTS: [(&str, FaceType); 5] = [
    ("triple", FaceType::Triple),
    ("fita five", FaceType::FitaFiveZone),
    ("fita six", FaceType::FitaSixZone),
    ("ten zone", FaceType::Metric),
    ("10 zone", FaceType::Metric),
];

/// Pick the face type for a round.
///
/// Special round names win over an explicit face hint, which wins over the
/// metric/imperial default. Matching is case-insensitive.
pub fn resolve_face_type(round: &Round) -> FaceType {
    let name = round.display_name.to_lowercase();
    if let Some((_, face)) = SPECIAL_ROUND_NAMES
        .iter()
        .find(|(needle, _)| name.contains(needle))
    {
        return *face;
    }

    if let Some(hint) = round.face_hint.as_deref() {
        let hint = hint.to_lowercase();
        if let Some((_, face)) = FACE_HINTS.iter().find(|(needle, _)| hint.contains(needle)) {
            return *face;
        }
    }

    if round.is_metric {
        FaceType::Metric
    } else {
        FaceType::Imperial
    }
}

pub fn resolve_scoring_profile(round: &Round) -> ScoringProfile {
    resolve_face_type(round).profile()
}
