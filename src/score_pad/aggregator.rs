use log::debug;

use super::row::{DistanceTotalRow, EndRow, ScorePadRow, Totals};
use crate::error::{CoreError, CoreResult};
use crate::round::{ArrowScore, RoundGeometry, RoundLeg};
use crate::scoring::GoldsType;

/// What a run of consecutive arrows was shot for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum GroupKind<'a> {
    /// No round given, every arrow in one group
    Unassigned,
    Leg(&'a RoundLeg),
    /// Arrows past the end of the round
    Surplus,
}

#[derive(Debug)]
struct ArrowGroup<'a> {
    kind: GroupKind<'a>,
    arrows: &'a [ArrowScore],
}

/// Lay `arrows` out as a score pad.
///
/// Each leg of `round` claims its prescribed number of arrows in shooting
/// order; anything left over is surplus. Every group is cut into ends of
/// `end_size` (only the group's last end may be short) and followed by its
/// total row. A grand total closes the pad. No arrows means no rows.
pub fn build_score_pad(
    round: Option<&RoundGeometry>,
    arrows: &[ArrowScore],
    end_size: usize,
    golds_type: GoldsType,
) -> CoreResult<Vec<ScorePadRow>> {
    validate(arrows, end_size)?;
    if arrows.is_empty() {
        return Ok(Vec::new());
    }

    let groups = partition(round, arrows);
    let mut rows = Vec::with_capacity(arrows.len() / end_size + groups.len() * 2 + 1);
    let mut grand = Totals::default();
    let mut running_total = 0;
    let mut end_number = 0;

    for group in &groups {
        let mut group_totals = Totals::default();
        for batch in group.arrows.chunks(end_size) {
            let totals = Totals::from_arrows(batch, golds_type);
            running_total += totals.score;
            end_number += 1;
            group_totals += totals;
            rows.push(ScorePadRow::End(EndRow {
                end_number,
                arrows: batch.to_vec(),
                totals,
                running_total,
            }));
        }

        match group.kind {
            GroupKind::Unassigned => {}
            GroupKind::Leg(leg) => rows.push(ScorePadRow::DistanceTotal(DistanceTotalRow {
                distance: leg.distance,
                unit: leg.unit(),
                totals: group_totals,
            })),
            GroupKind::Surplus => rows.push(ScorePadRow::SurplusTotal(group_totals)),
        }
        grand += group_totals;
    }

    rows.push(ScorePadRow::GrandTotal(grand));
    Ok(rows)
}

fn validate(arrows: &[ArrowScore], end_size: usize) -> CoreResult<()> {
    if end_size == 0 {
        return Err(CoreError::invalid("end_size must be at least 1"));
    }
    for (expected, arrow) in (1u32..).zip(arrows) {
        if arrow.arrow_number != expected {
            return Err(CoreError::invalid(format!(
                "arrow numbers must run 1..{} in order, found {} at position {}",
                arrows.len(),
                arrow.arrow_number,
                expected
            )));
        }
        if arrow.value > 10 {
            return Err(CoreError::invalid(format!(
                "arrow {} has value {} (must be 0-10)",
                arrow.arrow_number, arrow.value
            )));
        }
    }
    Ok(())
}

fn partition<'a>(round: Option<&'a RoundGeometry>, arrows: &'a [ArrowScore]) -> Vec<ArrowGroup<'a>> {
    let Some(round) = round else {
        return vec![ArrowGroup {
            kind: GroupKind::Unassigned,
            arrows,
        }];
    };

    let mut groups = Vec::with_capacity(round.legs().len() + 1);
    let mut rest = arrows;
    for leg in round.legs() {
        if rest.is_empty() {
            break;
        }
        let take = rest.len().min(leg.arrow_count as usize);
        let (claimed, remaining) = rest.split_at(take);
        debug!(
            "distance {} ({}{}) claims {} of {} arrows",
            leg.distance_number,
            leg.distance,
            leg.unit(),
            claimed.len(),
            leg.arrow_count
        );
        groups.push(ArrowGroup {
            kind: GroupKind::Leg(leg),
            arrows: claimed,
        });
        rest = remaining;
    }

    if !rest.is_empty() {
        debug!("{} surplus arrows after the round", rest.len());
        groups.push(ArrowGroup {
            kind: GroupKind::Surplus,
            arrows: rest,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{DistanceUnit, Round};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn arrows(values: &[u8]) -> Vec<ArrowScore> {
        values
            .iter()
            .zip(1u32..)
            .map(|(&value, number)| ArrowScore {
                arrow_number: number,
                value,
                is_x: false,
            })
            .collect()
    }

    fn round_with_legs(legs: &[(u32, u32)]) -> RoundGeometry {
        let round = Round {
            id: 3,
            display_name: "Test".to_string(),
            is_outdoor: true,
            is_metric: true,
            face_hint: None,
        };
        let legs = legs
            .iter()
            .zip(1u32..)
            .map(|(&(arrow_count, distance), number)| RoundLeg {
                distance_number: number,
                arrow_count,
                face_size_cm: 122.0,
                distance,
                is_metric_unit: true,
            })
            .collect();
        RoundGeometry::from_legs(&round, legs).unwrap()
    }

    fn totals(hits: u32, score: u32, golds: u32) -> Totals {
        Totals { hits, score, golds }
    }

    fn end(end_number: u32, batch: &[ArrowScore], totals: Totals, running_total: u32) -> ScorePadRow {
        ScorePadRow::End(EndRow {
            end_number,
            arrows: batch.to_vec(),
            totals,
            running_total,
        })
    }

    #[test]
    fn test_first_leg_only() {
        let round = round_with_legs(&[(12, 60), (12, 50)]);
        let shot = arrows(&[8; 12]);
        let rows = build_score_pad(Some(&round), &shot, 6, GoldsType::Tens).unwrap();

        assert_eq!(
            rows,
            vec![
                end(1, &shot[..6], totals(6, 48, 0), 48),
                end(2, &shot[6..], totals(6, 48, 0), 96),
                ScorePadRow::DistanceTotal(DistanceTotalRow {
                    distance: 60,
                    unit: DistanceUnit::Meters,
                    totals: totals(12, 96, 0),
                }),
                ScorePadRow::GrandTotal(totals(12, 96, 0)),
            ]
        );
    }

    #[test]
    fn test_no_round_single_short_end() {
        let shot = arrows(&[9; 5]);
        let rows = build_score_pad(None, &shot, 6, GoldsType::Nines).unwrap();

        assert_eq!(
            rows,
            vec![
                end(1, &shot, totals(5, 45, 5), 45),
                ScorePadRow::GrandTotal(totals(5, 45, 5)),
            ]
        );
    }

    #[test]
    fn test_surplus_group_after_round() {
        let round = round_with_legs(&[(10, 18)]);
        let shot = arrows(&[10, 9, 9, 8, 8, 7, 7, 6, 6, 5, 4, 3, 0]);
        let rows = build_score_pad(Some(&round), &shot, 6, GoldsType::Tens).unwrap();

        assert_eq!(
            rows,
            vec![
                end(1, &shot[..6], totals(6, 51, 1), 51),
                end(2, &shot[6..10], totals(4, 24, 0), 75),
                ScorePadRow::DistanceTotal(DistanceTotalRow {
                    distance: 18,
                    unit: DistanceUnit::Meters,
                    totals: totals(10, 75, 1),
                }),
                end(3, &shot[10..], totals(2, 7, 0), 82),
                ScorePadRow::SurplusTotal(totals(2, 7, 0)),
                ScorePadRow::GrandTotal(totals(12, 82, 1)),
            ]
        );
    }

    #[test]
    fn test_ends_restart_at_each_distance() {
        let round = round_with_legs(&[(4, 90), (4, 70)]);
        let shot = arrows(&[5; 8]);
        let rows = build_score_pad(Some(&round), &shot, 3, GoldsType::Tens).unwrap();

        let end_sizes: Vec<usize> = rows
            .iter()
            .filter_map(|row| match row {
                ScorePadRow::End(end) => Some(end.arrows.len()),
                _ => None,
            })
            .collect();
        assert_eq!(end_sizes, vec![3, 1, 3, 1]);
        assert_eq!(rows.iter().filter(|r| matches!(r, ScorePadRow::DistanceTotal(_))).count(), 2);
        assert_eq!(rows.last().unwrap().running_total(), None);
        assert_eq!(rows[3].running_total(), Some(35));
    }

    #[test]
    fn test_xs_golds() {
        let shot = vec![
            ArrowScore::new(1, 10, false).unwrap(),
            ArrowScore::new(2, 10, true).unwrap(),
        ];
        let rows = build_score_pad(None, &shot, 6, GoldsType::Xs).unwrap();
        assert_eq!(rows.last().unwrap().totals().golds, 1);
    }

    #[test]
    fn test_no_arrows_no_rows() {
        let round = round_with_legs(&[(36, 70)]);
        assert!(build_score_pad(Some(&round), &[], 6, GoldsType::Tens).unwrap().is_empty());
        assert!(build_score_pad(None, &[], 6, GoldsType::Tens).unwrap().is_empty());
    }

    #[test]
    fn test_zero_end_size_rejected() {
        let result = build_score_pad(None, &arrows(&[9]), 0, GoldsType::Tens);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_end_size_rejected_without_arrows() {
        assert!(build_score_pad(None, &[], 0, GoldsType::Tens).is_err());
    }

    #[test]
    fn test_gapped_arrow_numbers_rejected() {
        let mut shot = arrows(&[9, 9, 9]);
        shot[2].arrow_number = 4;
        assert!(build_score_pad(None, &shot, 6, GoldsType::Tens).is_err());
    }

    #[test]
    fn test_value_above_ten_rejected() {
        let mut shot = arrows(&[9, 9]);
        shot[1].value = 12;
        assert!(build_score_pad(None, &shot, 6, GoldsType::Tens).is_err());
    }

    fn arb_arrows() -> impl Strategy<Value = Vec<ArrowScore>> {
        prop::collection::vec((0u8..=10, any::<bool>()), 0..80).prop_map(|raw| {
            raw.into_iter()
                .zip(1u32..)
                .map(|((value, x), number)| ArrowScore {
                    arrow_number: number,
                    value,
                    is_x: x && value == 10,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn totals_are_conserved(
            shot in arb_arrows(),
            legs in prop::collection::vec((1u32..30, 10u32..90), 0..4),
            end_size in 1usize..8,
        ) {
            let round = if legs.is_empty() { None } else { Some(round_with_legs(&legs)) };
            let rows = build_score_pad(round.as_ref(), &shot, end_size, GoldsType::Xs).unwrap();
            if shot.is_empty() {
                prop_assert!(rows.is_empty());
                return Ok(());
            }

            let mut all_ends = Totals::default();
            let mut group_ends = Totals::default();
            let mut grand_rows = 0;
            for row in &rows {
                match row {
                    ScorePadRow::End(end) => {
                        all_ends += end.totals;
                        group_ends += end.totals;
                    }
                    ScorePadRow::DistanceTotal(distance) => {
                        prop_assert_eq!(distance.totals, group_ends);
                        group_ends = Totals::default();
                    }
                    ScorePadRow::SurplusTotal(surplus) => {
                        prop_assert_eq!(*surplus, group_ends);
                        group_ends = Totals::default();
                    }
                    ScorePadRow::GrandTotal(grand) => {
                        grand_rows += 1;
                        prop_assert_eq!(*grand, all_ends);
                    }
                }
            }
            prop_assert_eq!(grand_rows, 1);
            prop_assert!(matches!(rows.last(), Some(ScorePadRow::GrandTotal(_))));
            let total: u32 = shot.iter().map(|a| u32::from(a.value)).sum();
            prop_assert_eq!(all_ends.score, total);
        }

        #[test]
        fn only_last_end_of_a_group_is_short(
            shot in arb_arrows(),
            legs in prop::collection::vec((1u32..30, 10u32..90), 1..4),
            end_size in 1usize..8,
        ) {
            let round = round_with_legs(&legs);
            let rows = build_score_pad(Some(&round), &shot, end_size, GoldsType::Tens).unwrap();

            let mut seen_short = false;
            let mut arrows_in_ends = 0;
            for row in &rows {
                match row {
                    ScorePadRow::End(end) => {
                        prop_assert!(!end.arrows.is_empty());
                        prop_assert!(end.arrows.len() <= end_size);
                        prop_assert!(!seen_short, "short end was not last in its group");
                        seen_short = end.arrows.len() < end_size;
                        arrows_in_ends += end.arrows.len();
                    }
                    _ => seen_short = false,
                }
            }
            prop_assert_eq!(arrows_in_ends, shot.len());
        }
    }
}
