pub mod formatter;

pub use formatter::{
    format_handicap_table, format_round_list, format_score_pad, format_score_pad_csv,
    should_use_colors,
};
