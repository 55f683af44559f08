use log::{debug, trace};

use super::system::HandicapSystem;
use crate::error::{CoreError, CoreResult};
use crate::round::{RoundGeometry, RoundLeg};
use crate::scoring::ScoringProfile;

/// Best possible handicap
pub const MIN_HANDICAP: u32 = 0;
/// Worst possible handicap
pub const MAX_HANDICAP: u32 = 100;

/// Arrow diameter (cm) baked into the published tables.
pub const ARROW_DIAMETER_CM: f64 = 0.357;

/// Ring denominator for the inner ten (half the width of a ten-zone ring).
const INNER_TEN_DENOMINATOR: f64 = 40.0;

/// Settings shared by forward and inverse handicap queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandicapOptions {
    pub system: HandicapSystem,
    /// Archer is scored with inner-ten rules (compound indoor)
    pub inner_ten_archer: bool,
    /// Only score the first N arrows of the round
    pub arrows_limit: Option<u32>,
}

impl HandicapOptions {
    pub fn with_system(system: HandicapSystem) -> Self {
        Self {
            system,
            ..Self::default()
        }
    }
}

/// Expected score for `handicap` on `round`, truncated to an integer.
///
/// Legs are scored in shooting order. With an arrows limit, legs past the
/// limit are skipped and the leg the limit falls in is scored partially.
pub fn expected_score(
    round: &RoundGeometry,
    handicap: u32,
    options: &HandicapOptions,
) -> CoreResult<u32> {
    validate_options(round, options)?;
    if handicap > MAX_HANDICAP {
        return Err(CoreError::invalid(format!(
            "handicap {} is outside {}-{}",
            handicap, MIN_HANDICAP, MAX_HANDICAP
        )));
    }
    Ok(score_for_handicap(round, handicap, options))
}

/// Handicap for an observed `score` on `round`.
///
/// Binary search over 0..=100. When several handicaps produce exactly
/// `score`, the worst (largest) of them is returned. Once the bracket is
/// down to two adjacent handicaps, a score below `expected(low)` gets `low`
/// and anything else gets `high`, unless `high` is 100 and matches exactly.
pub fn handicap_for_score(
    round: &RoundGeometry,
    score: u32,
    options: &HandicapOptions,
) -> CoreResult<u32> {
    validate_options(round, options)?;

    let probe = |handicap: u32| {
        let expected = score_for_handicap(round, handicap, options);
        debug!("probe handicap {} -> {}", handicap, expected);
        expected
    };
    // expected score is non-increasing in handicap
    let worst_tie = |mut handicap: u32| {
        while handicap < MAX_HANDICAP && probe(handicap + 1) == score {
            handicap += 1;
        }
        debug!("score {} ties up to handicap {}", score, handicap);
        handicap
    };

    let mut low = MIN_HANDICAP;
    let mut high = MAX_HANDICAP;
    loop {
        if high - low <= 1 {
            let at_low = probe(low);
            if at_low == score {
                return Ok(worst_tie(low));
            }
            // the top of the scale is never probed by the halving steps
            if high == MAX_HANDICAP && probe(high) == score {
                return Ok(high);
            }
            return Ok(if score < at_low { low } else { high });
        }

        let mid = (low + high) / 2;
        let at_mid = probe(mid);
        if at_mid == score {
            return Ok(worst_tie(mid));
        }
        if at_mid > score {
            low = mid;
        } else {
            high = mid;
        }
    }
}

fn validate_options(round: &RoundGeometry, options: &HandicapOptions) -> CoreResult<()> {
    if let Some(limit) = options.arrows_limit {
        if limit == 0 {
            return Err(CoreError::invalid("arrows_limit must be positive"));
        }
        let total = round.total_arrows();
        if limit > total {
            return Err(CoreError::invalid(format!(
                "arrows_limit {} exceeds the {} arrows of '{}'",
                limit,
                total,
                round.round().display_name
            )));
        }
    }
    Ok(())
}

/// Inner-ten scoring only exists indoors, on faces that have a ten zone.
fn inner_ten_applies(round: &RoundGeometry, options: &HandicapOptions) -> bool {
    options.inner_ten_archer && !round.round().is_outdoor && round.profile().has_ten_zone()
}

fn score_for_handicap(round: &RoundGeometry, handicap: u32, options: &HandicapOptions) -> u32 {
    let inner_ten = inner_ten_applies(round, options);
    let mut remaining = options.arrows_limit;
    let mut total = 0.0;

    for leg in round.legs() {
        let arrows = match remaining {
            Some(0) => break,
            Some(left) => {
                let arrows = leg.arrow_count.min(left);
                remaining = Some(left - arrows);
                arrows
            }
            None => leg.arrow_count,
        };
        let average =
            average_arrow_score(round.profile(), leg, handicap, options.system, inner_ten);
        trace!(
            "leg {} ({}{}): {} arrows averaging {:.4}",
            leg.distance_number,
            leg.distance,
            leg.unit(),
            arrows,
            average
        );
        total += average * arrows as f64;
    }

    // truncate, published tables never round up
    total as u32
}

/// Average score of one arrow shot on `leg` by an archer of `handicap`.
pub fn average_arrow_score(
    profile: &ScoringProfile,
    leg: &RoundLeg,
    handicap: u32,
    system: HandicapSystem,
    inner_ten: bool,
) -> f64 {
    let sigma = system.sigma(handicap, leg.distance_in_meters());
    let face = leg.face_size_cm;
    let ring_score =
        |denominator: f64| (-(face / denominator + ARROW_DIAMETER_CM).powi(2) / sigma).exp();

    let start = profile.sum_start + u32::from(inner_ten);
    let sum: f64 = (start..=profile.sum_end)
        .map(|i| ring_score(profile.sum_internal_denominator / i as f64))
        .sum();

    let mut average = profile.initial - profile.sum_multiplier * sum;
    if profile.subtract_multiplier != 0.0 {
        average -= profile.subtract_multiplier * ring_score(profile.subtract_internal_denominator);
    }
    if inner_ten {
        average -= ring_score(INNER_TEN_DENOMINATOR);
    }
    average
}
