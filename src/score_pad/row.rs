use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::round::{ArrowScore, DistanceUnit};
use crate::scoring::GoldsType;

/// Hits, score and golds over some run of arrows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub hits: u32,
    pub score: u32,
    pub golds: u32,
}

impl Totals {
    pub fn from_arrows(arrows: &[ArrowScore], golds_type: GoldsType) -> Self {
        arrows.iter().fold(Self::default(), |mut totals, arrow| {
            totals.hits += u32::from(arrow.is_hit());
            totals.score += u32::from(arrow.value);
            totals.golds += u32::from(golds_type.is_gold_arrow(arrow));
            totals
        })
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            hits: self.hits + other.hits,
            score: self.score + other.score,
            golds: self.golds + other.golds,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Totals) {
        *self = *self + other;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndRow {
    pub end_number: u32,
    pub arrows: Vec<ArrowScore>,
    #[serde(flatten)]
    pub totals: Totals,
    /// Score from the first arrow of the pad through the last arrow of this end
    pub running_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceTotalRow {
    pub distance: u32,
    pub unit: DistanceUnit,
    #[serde(flatten)]
    pub totals: Totals,
}

/// One line of a score pad, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePadRow {
    End(EndRow),
    DistanceTotal(DistanceTotalRow),
    SurplusTotal(Totals),
    GrandTotal(Totals),
}

impl ScorePadRow {
    pub fn totals(&self) -> &Totals {
        match self {
            ScorePadRow::End(end) => &end.totals,
            ScorePadRow::DistanceTotal(distance) => &distance.totals,
            ScorePadRow::SurplusTotal(totals) | ScorePadRow::GrandTotal(totals) => totals,
        }
    }

    /// Distance, surplus and grand total rows carry no running total.
    pub fn running_total(&self) -> Option<u32> {
        match self {
            ScorePadRow::End(end) => Some(end.running_total),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, ScorePadRow::End(_))
    }
}
