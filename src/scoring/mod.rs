pub mod golds;
pub mod profile;

pub use golds::GoldsType;
pub use profile::{resolve_face_type, resolve_scoring_profile, FaceType, ScoringProfile};
