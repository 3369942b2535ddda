//! pc-core: stable foundation for petrochar.
//!
//! Contains:
//! - units (uom SI types + constructors + temperature scale conversion)
//! - numeric (Real + float and weighting helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PcError, PcResult};
pub use numeric::*;
pub use units::*;
