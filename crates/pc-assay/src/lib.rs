//! pc-assay: bulk C7+ assay characterization.
//!
//! Turns a sparse `AssaySpec` into a `CompoundSet` of pseudo-compounds:
//! - `distribution`: ordered (MW, SG, NBP) cuts from the light-end anchor and shape parameters
//! - `solver`: adjusts shape parameters until mole-weighted averages meet the bulk targets
//! - `assembler`: correlation-derived constants, names and mole fractions per cut
//! - `characterize`: the generate → solve → assemble pipeline
//! - `fingerprint`: content hash of a compound set

pub mod assembler;
pub mod characterize;
pub mod compound;
pub mod distribution;
pub mod error;
pub mod fingerprint;
pub mod solver;
pub mod spec;

pub use assembler::CompoundAssembler;
pub use characterize::{
    Characterization, CharacterizationOptions, CharacterizeStage, characterize,
    characterize_with_progress, characterize_with_shape,
};
pub use compound::{BulkAverages, CompoundSet, PseudoCompound};
pub use distribution::{DistributionGenerator, ShapeParams};
pub use error::{CharacterizationError, CharacterizationResult};
pub use fingerprint::compound_set_fingerprint;
pub use solver::{BulkTargetSolver, SolveOutcome, SolverOptions};
pub use spec::{AssaySpec, BulkTargets};

pub use pc_correlations::{ConstantPropertySet, PropertyTriple, SampleType};
