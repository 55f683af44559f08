//! Built-in round definitions.
//!
//! Records are laid out the way the round-loading layer stores them: one
//! `Round`, its arrow counts per distance number, and distances per sub-type.

use super::types::{Round, RoundArrowCount, RoundDistance, RoundGeometry};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct RoundDefinition {
    pub key: &'static str,
    pub round: Round,
    pub arrow_counts: Vec<RoundArrowCount>,
    pub distances: Vec<RoundDistance>,
    /// (id, name) of each sub-type, empty for rounds with a single distance set
    pub sub_types: Vec<(u32, &'static str)>,
}

impl RoundDefinition {
    /// Geometry for one sub-type. Rounds with sub-types default to the first.
    pub fn geometry(&self, sub_type: Option<u32>) -> CoreResult<RoundGeometry> {
        let selected = match (sub_type, self.sub_types.first()) {
            (Some(id), _) if self.sub_types.iter().any(|(known, _)| *known == id) => Some(id),
            (Some(id), _) => {
                return Err(CoreError::invalid(format!(
                    "round '{}' has no sub-type {}",
                    self.round.display_name, id
                )))
            }
            (None, Some((first, _))) => Some(*first),
            (None, None) => None,
        };

        let distances: Vec<RoundDistance> = self
            .distances
            .iter()
            .filter(|d| d.sub_type.is_none() || d.sub_type == selected)
            .cloned()
            .collect();

        RoundGeometry::new(&self.round, &self.arrow_counts, &distances)
    }
}

/// Look a round up by key or display name, ignoring case.
pub fn find_round(name: &str) -> Option<RoundDefinition> {
    catalog().into_iter().find(|def| {
        def.key.eq_ignore_ascii_case(name) || def.round.display_name.eq_ignore_ascii_case(name)
    })
}

#[rustfmt::skip]
pub fn catalog() -> Vec<RoundDefinition> {
    vec![
        // Imperial outdoor, 122cm five-zone
        simple("york", 1, "York", true, false, None, &[(72, 100, 122.0), (48, 80, 122.0), (24, 60, 122.0)]),
        simple("hereford", 2, "Hereford", true, false, None, &[(72, 80, 122.0), (48, 60, 122.0), (24, 50, 122.0)]),
        simple("st-george", 3, "St George", true, false, None, &[(36, 100, 122.0), (36, 80, 122.0), (36, 60, 122.0)]),
        simple("national", 4, "National", true, false, None, &[(48, 60, 122.0), (24, 50, 122.0)]),
        simple("western", 5, "Western", true, false, None, &[(48, 60, 122.0), (48, 50, 122.0)]),
        // Metric outdoor
        RoundDefinition {
            key: "wa-1440",
            round: round(6, "WA 1440", true, true, None),
            arrow_counts: vec![
                arrow_count(6, 1, 36, 122.0),
                arrow_count(6, 2, 36, 122.0),
                arrow_count(6, 3, 36, 80.0),
                arrow_count(6, 4, 36, 80.0),
            ],
            distances: vec![
                distance(6, 1, Some(1), 90),
                distance(6, 2, Some(1), 70),
                distance(6, 1, Some(2), 70),
                distance(6, 2, Some(2), 60),
                distance(6, 3, None, 50),
                distance(6, 4, None, 30),
            ],
            sub_types: vec![(1, "Gents"), (2, "Ladies")],
        },
        simple("wa-70m", 7, "WA 70m", true, true, None, &[(72, 70, 122.0)]),
        simple("wa-50m", 8, "WA 50m", true, true, Some("FITA six zone"), &[(72, 50, 80.0)]),
        // Indoor
        simple("wa-18m", 9, "WA 18m", false, true, None, &[(60, 18, 40.0)]),
        simple("wa-18m-triple", 10, "WA 18m (triple)", false, true, Some("Triple"), &[(60, 18, 40.0)]),
        simple("wa-25m", 11, "WA 25m", false, true, None, &[(60, 25, 60.0)]),
        simple("portsmouth", 12, "Portsmouth", false, false, Some("Ten zone"), &[(60, 20, 60.0)]),
        simple("worcester", 13, "Worcester", false, false, None, &[(60, 20, 40.64)]),
        simple("vegas-300", 14, "Vegas 300", false, true, None, &[(30, 18, 40.0)]),
    ]
}

/// A round with one distance set: `legs` are (arrows, distance, face cm) in shooting order.
fn simple(
    key: &'static str,
    id: u32,
    name: &str,
    is_outdoor: bool,
    is_metric: bool,
    face_hint: Option<&str>,
    legs: &[(u32, u32, f64)],
) -> RoundDefinition {
    let numbered = legs.iter().zip(1u32..);
    RoundDefinition {
        key,
        round: round(id, name, is_outdoor, is_metric, face_hint),
        arrow_counts: numbered
            .clone()
            .map(|(&(arrows, _, face), number)| arrow_count(id, number, arrows, face))
            .collect(),
        distances: numbered
            .map(|(&(_, range, _), number)| distance(id, number, None, range))
            .collect(),
        sub_types: Vec::new(),
    }
}

fn round(id: u32, name: &str, is_outdoor: bool, is_metric: bool, face_hint: Option<&str>) -> Round {
    Round {
        id,
        display_name: name.to_string(),
        is_outdoor,
        is_metric,
        face_hint: face_hint.map(str::to_string),
    }
}

fn arrow_count(round_id: u32, distance_number: u32, arrows: u32, face: f64) -> RoundArrowCount {
    RoundArrowCount {
        round_id,
        distance_number,
        face_size_cm: face,
        arrow_count: arrows,
    }
}

fn distance(round_id: u32, distance_number: u32, sub_type: Option<u32>, range: u32) -> RoundDistance {
    RoundDistance {
        round_id,
        distance_number,
        sub_type,
        distance: range,
    }
}
