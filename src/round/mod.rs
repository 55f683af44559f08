pub mod arrows;
pub mod catalog;
pub mod types;

pub use arrows::{arrow_label, parse_arrows};
pub use catalog::{catalog, find_round, RoundDefinition};
pub use types::{
    ArrowScore, DistanceUnit, Round, RoundArrowCount, RoundDistance, RoundGeometry, RoundLeg,
    METERS_PER_YARD,
};
