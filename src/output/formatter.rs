use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::config::ColorMode;
use crate::handicap::HandicapTableEntry;
use crate::round::{arrow_label, ArrowScore, RoundDefinition};
use crate::score_pad::{ScorePadRow, Totals};
use crate::scoring::GoldsType;

/// Resolve the colour mode against whether stdout is a TTY
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn format_arrows(arrows: &[ArrowScore], golds_type: GoldsType, use_colors: bool) -> String {
    arrows
        .iter()
        .map(|arrow| {
            let label = format!("{:>2}", arrow_label(arrow));
            if !use_colors {
                label
            } else if golds_type.is_gold_arrow(arrow) {
                label.yellow().bold().to_string()
            } else if !arrow.is_hit() {
                label.red().to_string()
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format score pad rows as an aligned table.
/// Columns: End, Arrows, Hits, Score, Golds, Running total.
/// Total rows show a label in the arrows column and `-` for the running total.
pub fn format_score_pad(rows: &[ScorePadRow], golds_type: GoldsType, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No arrows shot.".to_string();
    }

    // widest end decides the arrows column, 3 chars per arrow
    let arrows_width = rows
        .iter()
        .filter_map(|row| match row {
            ScorePadRow::End(end) => Some(end.arrows.len() * 3),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .max("Arrows".len());

    let header = format!(
        "{:>3}  {:<arrows_width$}  {:>4}  {:>5}  {:>4}  {:>5}",
        "End",
        "Arrows",
        "Hits",
        "Score",
        golds_type.label(),
        "RT",
    );

    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for row in rows {
        let line = match row {
            ScorePadRow::End(end) => {
                let arrows = format_arrows(&end.arrows, golds_type, use_colors);
                // pad on plain width, colour codes have no width
                let padding = arrows_width.saturating_sub(end.arrows.len() * 3 - 1);
                format!(
                    "{:>3}  {}{}  {}",
                    end.end_number,
                    arrows,
                    " ".repeat(padding),
                    format_totals(&end.totals, Some(end.running_total)),
                )
            }
            ScorePadRow::DistanceTotal(distance) => {
                let label = format!("{}{}", distance.distance, distance.unit);
                format_total_line(&label, &distance.totals, arrows_width)
            }
            ScorePadRow::SurplusTotal(totals) => format_total_line("Surplus", totals, arrows_width),
            ScorePadRow::GrandTotal(totals) => format_total_line("Total", totals, arrows_width),
        };
        // totals stand out from the ends they close
        if use_colors && !row.is_end() {
            lines.push(line.bold().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn format_totals(totals: &Totals, running_total: Option<u32>) -> String {
    let running = running_total.map_or_else(|| "-".to_string(), |rt| rt.to_string());
    format!(
        "{:>4}  {:>5}  {:>4}  {:>5}",
        totals.hits, totals.score, totals.golds, running
    )
}

fn format_total_line(label: &str, totals: &Totals, arrows_width: usize) -> String {
    format!(
        "{:>3}  {:<arrows_width$}  {}",
        "",
        label,
        format_totals(totals, None)
    )
}

/// Format score pad rows as CSV with a header line.
/// Arrows are space separated inside their column; totals rows leave it as a label.
pub fn format_score_pad_csv(rows: &[ScorePadRow]) -> String {
    let mut lines = vec!["row,end,arrows,hits,score,golds,running_total".to_string()];
    lines.extend(rows.iter().map(|row| {
        let (kind, end, label) = match row {
            ScorePadRow::End(end) => (
                "end",
                end.end_number.to_string(),
                end.arrows.iter().map(arrow_label).collect::<Vec<_>>().join(" "),
            ),
            ScorePadRow::DistanceTotal(distance) => (
                "distance",
                String::new(),
                format!("{}{}", distance.distance, distance.unit),
            ),
            ScorePadRow::SurplusTotal(_) => ("surplus", String::new(), String::new()),
            ScorePadRow::GrandTotal(_) => ("total", String::new(), String::new()),
        };
        let totals = row.totals();
        format!(
            "{},{},{},{},{},{},{}",
            kind,
            end,
            label,
            totals.hits,
            totals.score,
            totals.golds,
            row.running_total().map(|rt| rt.to_string()).unwrap_or_default()
        )
    }));
    lines.join("\n")
}

/// Format a handicap table as `handicap score` pairs.
/// Fills as many column pairs as the terminal allows; pipes get one pair per line.
pub fn format_handicap_table(entries: &[HandicapTableEntry], use_colors: bool) -> String {
    const CELL_WIDTH: usize = 12; // "100  1440" plus gap
    let columns = get_terminal_width()
        .map(|width| (width / CELL_WIDTH).clamp(1, 8))
        .unwrap_or(1);
    let rows = entries.len().div_ceil(columns);

    (0..rows)
        .map(|row| {
            (0..columns)
                .filter_map(|column| entries.get(column * rows + row))
                .map(|entry| {
                    let handicap = format!("{:>3}", entry.handicap);
                    let handicap = if use_colors {
                        handicap.dimmed().to_string()
                    } else {
                        handicap
                    };
                    format!("{}  {:>5}", handicap, entry.score)
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the built-in rounds as tab-separated values: key, name, distances.
pub fn format_round_list(rounds: &[RoundDefinition]) -> String {
    rounds
        .iter()
        .map(|def| {
            let mut line = format!("{}\t{}", def.key, def.round.display_name);
            if !def.sub_types.is_empty() {
                let names: Vec<String> = def
                    .sub_types
                    .iter()
                    .map(|(id, name)| format!("{}={}", id, name))
                    .collect();
                line.push_str(&format!("\t[{}]", names.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
