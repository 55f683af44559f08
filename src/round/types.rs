use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::scoring::{resolve_scoring_profile, ScoringProfile};

/// Meters per yard. Kept at this precision so results match published tables.
pub const METERS_PER_YARD: f64 = 0.9144;

/// A single arrow as recorded on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowScore {
    pub arrow_number: u32, // 1-based, contiguous within a round
    pub value: u8,         // 0..=10, 0 is a miss
    pub is_x: bool,        // inner ten, only meaningful when value == 10
}

impl ArrowScore {
    pub fn new(arrow_number: u32, value: u8, is_x: bool) -> CoreResult<Self> {
        if arrow_number == 0 {
            return Err(CoreError::invalid("arrow numbers start at 1"));
        }
        if value > 10 {
            return Err(CoreError::invalid(format!(
                "arrow {} has value {} (must be 0-10)",
                arrow_number, value
            )));
        }
        if is_x && value != 10 {
            return Err(CoreError::invalid(format!(
                "arrow {} is marked X but scores {}",
                arrow_number, value
            )));
        }
        Ok(Self {
            arrow_number,
            value,
            is_x,
        })
    }

    pub fn is_hit(&self) -> bool {
        self.value > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Meters,
    Yards,
}

impl DistanceUnit {
    pub fn from_metric(is_metric: bool) -> Self {
        if is_metric {
            DistanceUnit::Meters
        } else {
            DistanceUnit::Yards
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Yards => "yd",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Round metadata as stored by the round-loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: u32,
    pub display_name: String,
    pub is_outdoor: bool,
    /// Metric rounds are shot in meters and scored on ten-zone faces
    pub is_metric: bool,
    /// Optional explicit face type, e.g. "triple" or "fita six"
    #[serde(default)]
    pub face_hint: Option<String>,
}

/// Arrow count and face size for one distance of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundArrowCount {
    pub round_id: u32,
    pub distance_number: u32,
    pub face_size_cm: f64,
    pub arrow_count: u32,
}

/// Distance shot for one distance number of a round (per sub-type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDistance {
    pub round_id: u32,
    pub distance_number: u32,
    #[serde(default)]
    pub sub_type: Option<u32>,
    pub distance: u32,
}

/// One distance segment of a round, in shooting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundLeg {
    pub distance_number: u32,
    pub arrow_count: u32,
    pub face_size_cm: f64,
    pub distance: u32,
    pub is_metric_unit: bool,
}

impl RoundLeg {
    pub fn unit(&self) -> DistanceUnit {
        DistanceUnit::from_metric(self.is_metric_unit)
    }

    pub fn distance_in_meters(&self) -> f64 {
        if self.is_metric_unit {
            self.distance as f64
        } else {
            self.distance as f64 * METERS_PER_YARD
        }
    }
}

/// A validated round: its metadata, its legs in shooting order and the
/// scoring profile of its target face.
///
/// Construction is the only place round records are checked, so every
/// engine call receiving a `RoundGeometry` can rely on:
/// - at least one leg, every leg with a positive arrow count, face and distance
/// - distance numbers unique, legs sorted by distance number
/// - all records from the same round and sub-type
#[derive(Debug, Clone, PartialEq)]
pub struct RoundGeometry {
    round: Round,
    sub_type: Option<u32>,
    legs: Vec<RoundLeg>,
    profile: ScoringProfile,
}

impl RoundGeometry {
    /// Pair `arrow_counts` with `distances` by distance number.
    ///
    /// `distances` must already be narrowed to a single sub-type; records
    /// without a sub-type are shared by all of them.
    pub fn new(
        round: &Round,
        arrow_counts: &[RoundArrowCount],
        distances: &[RoundDistance],
    ) -> CoreResult<Self> {
        if arrow_counts.len() != distances.len() {
            return Err(CoreError::invalid(format!(
                "round '{}' has {} arrow counts but {} distances",
                round.display_name,
                arrow_counts.len(),
                distances.len()
            )));
        }

        if let Some(other) = arrow_counts.iter().find(|c| c.round_id != round.id) {
            return Err(CoreError::invalid(format!(
                "arrow count for distance {} belongs to round {}, expected {}",
                other.distance_number, other.round_id, round.id
            )));
        }
        if let Some(other) = distances.iter().find(|d| d.round_id != round.id) {
            return Err(CoreError::invalid(format!(
                "distance {} belongs to round {}, expected {}",
                other.distance_number, other.round_id, round.id
            )));
        }

        let sub_types: HashSet<u32> = distances.iter().filter_map(|d| d.sub_type).collect();
        if sub_types.len() > 1 {
            let mut ids: Vec<_> = sub_types.into_iter().collect();
            ids.sort_unstable();
            return Err(CoreError::invalid(format!(
                "distances for round '{}' mix sub-types {:?}",
                round.display_name, ids
            )));
        }
        let sub_type = sub_types.into_iter().next();

        let mut legs = Vec::with_capacity(arrow_counts.len());
        for count in arrow_counts {
            let mut matching = distances
                .iter()
                .filter(|d| d.distance_number == count.distance_number);
            let distance = match (matching.next(), matching.next()) {
                (Some(d), None) => d,
                (None, _) => {
                    return Err(CoreError::invalid(format!(
                        "no distance recorded for distance number {}",
                        count.distance_number
                    )))
                }
                (Some(_), Some(_)) => {
                    return Err(CoreError::invalid(format!(
                        "distance number {} recorded more than once",
                        count.distance_number
                    )))
                }
            };
            legs.push(RoundLeg {
                distance_number: count.distance_number,
                arrow_count: count.arrow_count,
                face_size_cm: count.face_size_cm,
                distance: distance.distance,
                is_metric_unit: round.is_metric,
            });
        }

        let mut geometry = Self::from_legs(round, legs)?;
        geometry.sub_type = sub_type;
        Ok(geometry)
    }

    /// Build from legs that are already assembled. Legs are re-sorted into
    /// shooting order.
    pub fn from_legs(round: &Round, mut legs: Vec<RoundLeg>) -> CoreResult<Self> {
        if legs.is_empty() {
            return Err(CoreError::invalid(format!(
                "round '{}' has no distances",
                round.display_name
            )));
        }

        let mut seen = HashSet::new();
        for leg in &legs {
            if !seen.insert(leg.distance_number) {
                return Err(CoreError::invalid(format!(
                    "distance number {} recorded more than once",
                    leg.distance_number
                )));
            }
            if leg.arrow_count == 0 {
                return Err(CoreError::invalid(format!(
                    "distance {} has no arrows",
                    leg.distance_number
                )));
            }
            if !(leg.face_size_cm.is_finite() && leg.face_size_cm > 0.0) {
                return Err(CoreError::invalid(format!(
                    "distance {} has face size {}",
                    leg.distance_number, leg.face_size_cm
                )));
            }
            if leg.distance == 0 {
                return Err(CoreError::invalid(format!(
                    "distance {} has a range of 0",
                    leg.distance_number
                )));
            }
        }

        legs.sort_by_key(|leg| leg.distance_number);

        Ok(Self {
            round: round.clone(),
            sub_type: None,
            legs,
            profile: resolve_scoring_profile(round),
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn sub_type(&self) -> Option<u32> {
        self.sub_type
    }

    pub fn legs(&self) -> &[RoundLeg] {
        &self.legs
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn total_arrows(&self) -> u32 {
        self.legs.iter().map(|leg| leg.arrow_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::FaceType;

    fn sample_round(is_metric: bool) -> Round {
        Round {
            id: 7,
            display_name: "Test Round".to_string(),
            is_outdoor: true,
            is_metric,
            face_hint: None,
        }
    }

    fn count(distance_number: u32, arrow_count: u32) -> RoundArrowCount {
        RoundArrowCount {
            round_id: 7,
            distance_number,
            face_size_cm: 122.0,
            arrow_count,
        }
    }

    fn distance(distance_number: u32, distance: u32, sub_type: Option<u32>) -> RoundDistance {
        RoundDistance {
            round_id: 7,
            distance_number,
            sub_type,
            distance,
        }
    }

    #[test]
    fn test_arrow_score_rejects_out_of_range() {
        assert!(ArrowScore::new(1, 11, false).is_err());
        assert!(ArrowScore::new(0, 5, false).is_err());
        assert!(ArrowScore::new(1, 9, true).is_err());
        assert!(ArrowScore::new(1, 10, true).is_ok());
    }

    #[test]
    fn test_geometry_orders_legs_by_distance_number() {
        let geometry = RoundGeometry::new(
            &sample_round(true),
            &[count(2, 36), count(1, 36)],
            &[distance(1, 90, None), distance(2, 70, None)],
        )
        .unwrap();

        let ranges: Vec<u32> = geometry.legs().iter().map(|l| l.distance).collect();
        assert_eq!(ranges, vec![90, 70]);
        assert_eq!(geometry.total_arrows(), 72);
        assert_eq!(geometry.profile().face, FaceType::Metric);
    }

    #[test]
    fn test_geometry_rejects_mismatched_lengths() {
        let result = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 36), count(2, 36)],
            &[distance(1, 90, None)],
        );
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_geometry_rejects_foreign_round() {
        let mut foreign = count(2, 36);
        foreign.round_id = 8;
        let result = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 36), foreign],
            &[distance(1, 90, None), distance(2, 70, None)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_rejects_mixed_sub_types() {
        let result = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 36), count(2, 36)],
            &[distance(1, 90, Some(1)), distance(2, 60, Some(2))],
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("sub-types"));
    }

    #[test]
    fn test_geometry_keeps_single_sub_type() {
        let geometry = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 36), count(2, 36)],
            &[distance(1, 70, Some(2)), distance(2, 60, None)],
        )
        .unwrap();
        assert_eq!(geometry.sub_type(), Some(2));
    }

    #[test]
    fn test_geometry_rejects_unpaired_distance_numbers() {
        let result = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 36), count(2, 36)],
            &[distance(1, 90, None), distance(1, 70, None)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_rejects_zero_arrow_leg() {
        let result = RoundGeometry::new(
            &sample_round(true),
            &[count(1, 0)],
            &[distance(1, 90, None)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_rejects_empty_round() {
        assert!(RoundGeometry::new(&sample_round(true), &[], &[]).is_err());
    }

    #[test]
    fn test_yards_convert_to_meters() {
        let geometry = RoundGeometry::new(
            &sample_round(false),
            &[count(1, 72)],
            &[distance(1, 100, None)],
        )
        .unwrap();
        let leg = &geometry.legs()[0];
        assert_eq!(leg.unit(), DistanceUnit::Yards);
        assert!((leg.distance_in_meters() - 91.44).abs() < 1e-9);
    }
}
