//! pc-flowsheet: the simulation store characterized compounds are merged into.
//!
//! The model carries only what a merge touches: the compound registry, the selected
//! compound list and streams with their phase compound collections.

pub mod error;
pub mod integrate;
pub mod model;
pub mod shared;

pub use error::{FlowsheetError, FlowsheetResult};
pub use integrate::{FlowsheetIntegrator, MergeReport};
pub use model::{
    EnergyStream, MaterialStream, Phase, PhaseCompound, PhaseKind, SimObject, Simulation,
};
pub use shared::{SharedSimulation, StructuralEditGuard};
