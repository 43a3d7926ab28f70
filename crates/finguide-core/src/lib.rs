pub mod error;
pub mod statements;
pub mod types;

#[cfg(feature = "sig")]
pub mod sig;

#[cfg(feature = "ratios")]
pub mod ratios;

#[cfg(feature = "recommendations")]
pub mod recommendations;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "report")]
pub mod session;

#[cfg(feature = "budget")]
pub mod budget;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub use error::FinGuideError;
pub use types::*;

/// Standard result type for all finguide operations
pub type FinGuideResult<T> = Result<T, FinGuideError>;
