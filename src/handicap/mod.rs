pub mod engine;
pub mod system;
pub mod table;

pub use engine::{
    average_arrow_score, expected_score, handicap_for_score, HandicapOptions, MAX_HANDICAP,
    MIN_HANDICAP,
};
pub use system::HandicapSystem;
pub use table::{handicap_table, HandicapTableEntry};
