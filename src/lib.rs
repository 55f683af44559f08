//! Archery handicaps and score pads.
//!
//! Two pure engines sit at the core of the crate:
//! - [`handicap`] converts between a handicap (0 best, 100 worst) and the
//!   score expected on a round, in both directions.
//! - [`score_pad`] lays a flat list of arrows out as ends, distance
//!   subtotals, surplus and a grand total.
//!
//! Both take a [`round::RoundGeometry`], built and validated once from the
//! round records, and never hold on to their inputs.

pub mod config;
pub mod error;
pub mod handicap;
pub mod output;
pub mod round;
pub mod score_pad;
pub mod scoring;

pub use error::{CoreError, CoreResult};
pub use handicap::{expected_score, handicap_for_score, HandicapOptions, HandicapSystem};
pub use round::{ArrowScore, RoundGeometry};
pub use score_pad::{build_score_pad, ScorePadRow};
pub use scoring::{resolve_scoring_profile, GoldsType, ScoringProfile};
