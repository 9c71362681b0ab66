//! # ljpw-core
//!
//! Foundation crate for the LJPW composition model.
//! Defines the profile value type, structural flags, coupling parameters,
//! errors, config, tracing setup, and shared constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::LjpwConfig;
pub use errors::{LjpwError, LjpwErrorCode};
pub use types::{
    Axis, CouplingParameters, LjpwProfile, ParameterBounds, StructuralFeature, StructuralFlags,
};
