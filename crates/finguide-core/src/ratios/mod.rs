pub mod bands;
pub mod engine;
pub mod messages;
pub mod profile;
pub mod set;

pub use bands::{interpret, interpret_all, Band, Interpretation};
pub use engine::{compute_ratios, compute_ratios_with, RatioReport};
pub use profile::{AnalysisProfile, NetResultPolicy};
pub use set::{RatioKind, RatioSet, RatioValue};
