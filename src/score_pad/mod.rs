pub mod aggregator;
pub mod row;

pub use aggregator::build_score_pad;
pub use row::{DistanceTotalRow, EndRow, ScorePadRow, Totals};
