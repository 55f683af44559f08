use super::types::ArrowScore;
use crate::error::{CoreError, CoreResult};

/// Parse arrows typed as a list of tokens, e.g. `"X 10 9, 7 M"`.
///
/// Tokens are separated by commas or whitespace. `X` is an inner ten,
/// `M` a miss, digits 0-10 a ring value. Arrow numbers are assigned in
/// order starting at 1.
pub fn parse_arrows(input: &str) -> CoreResult<Vec<ArrowScore>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .zip(1u32..)
        .map(|(token, arrow_number)| parse_arrow(token, arrow_number))
        .collect()
}

fn parse_arrow(token: &str, arrow_number: u32) -> CoreResult<ArrowScore> {
    match token {
        "X" | "x" => ArrowScore::new(arrow_number, 10, true),
        "M" | "m" => ArrowScore::new(arrow_number, 0, false),
        _ => {
            let value: u8 = token.parse().map_err(|_| {
                CoreError::invalid(format!("arrow {}: cannot read '{}'", arrow_number, token))
            })?;
            ArrowScore::new(arrow_number, value, false)
        }
    }
}

/// Short label for an arrow as written on a paper score sheet.
pub fn arrow_label(arrow: &ArrowScore) -> String {
    match (arrow.value, arrow.is_x) {
        (10, true) => "X".to_string(),
        (0, _) => "M".to_string(),
        (value, _) => value.to_string(),
    }
}
