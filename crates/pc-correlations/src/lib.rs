//! pc-correlations: petroleum-fraction property correlations for petrochar.
//!
//! Provides:
//! - Sample-type aware method selection (`MethodSet`), each method tagged with a version
//! - Validated input domains per method (`Domain`)
//! - Critical constants, acentric factor, critical volume, ideal-gas heat capacity,
//!   Rackett parameter, enthalpy of vaporization and reference viscosities
//! - `ConstantPropertySet`: the full constant-property record of one pseudo-compound
//!
//! # Architecture
//!
//! Every function here is pure. Inputs are a `PropertyTriple` (molar weight, specific
//! gravity, normal boiling point) and a `SampleType`; the sample type picks the method set,
//! in the same way boiling range drives method choice in refinery practice. Inputs outside a
//! method's validated domain are rejected with `CorrelationError::Domain` instead of being
//! extrapolated.
//!
//! # Example
//!
//! ```
//! use pc_correlations::{PropertyTriple, SampleType, estimate};
//!
//! let triple = PropertyTriple::new(86.18, 0.664, 341.9);
//! let props = estimate("C6", triple, SampleType::Average).unwrap();
//! assert!(props.critical_temperature_k > props.normal_boiling_point_k);
//! ```

pub mod acentric;
pub mod bulk;
pub mod critical;
pub mod domain;
pub mod error;
pub mod heat_capacity;
pub mod method;
pub mod properties;
pub mod sample;
pub mod viscosity;

pub use domain::Domain;
pub use error::{CorrelationError, CorrelationResult};
pub use heat_capacity::IdealGasCp;
pub use method::{MethodId, MethodSet};
pub use properties::{ConstantPropertySet, CorrelationMethods, PropertyTriple, estimate};
pub use sample::SampleType;
pub use viscosity::ViscosityReference;
