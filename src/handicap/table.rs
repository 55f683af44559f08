use serde::Serialize;

use super::engine::{expected_score, HandicapOptions, MAX_HANDICAP, MIN_HANDICAP};
use crate::error::CoreResult;
use crate::round::RoundGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandicapTableEntry {
    pub handicap: u32,
    pub score: u32,
}

/// Expected score for every handicap from 0 to 100 on `round`.
pub fn handicap_table(
    round: &RoundGeometry,
    options: &HandicapOptions,
) -> CoreResult<Vec<HandicapTableEntry>> {
    (MIN_HANDICAP..=MAX_HANDICAP)
        .map(|handicap| {
            expected_score(round, handicap, options)
                .map(|score| HandicapTableEntry { handicap, score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::catalog::find_round;

    #[test]
    fn test_table_covers_full_scale() {
        let geometry = find_round("wa-70m").unwrap().geometry(None).unwrap();
        let table = handicap_table(&geometry, &HandicapOptions::default()).unwrap();
        assert_eq!(table.len(), 101);
        assert_eq!(table[0].handicap, 0);
        assert_eq!(table[100].handicap, 100);
        assert!(table.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_table_propagates_invalid_limit() {
        let geometry = find_round("wa-70m").unwrap().geometry(None).unwrap();
        let options = HandicapOptions {
            arrows_limit: Some(0),
            ..HandicapOptions::default()
        };
        assert!(handicap_table(&geometry, &options).is_err());
    }
}
