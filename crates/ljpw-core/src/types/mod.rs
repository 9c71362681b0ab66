//! Value types shared by every LJPW subsystem.

pub mod axis;
pub mod coupling;
pub mod flags;
pub mod profile;

pub use axis::Axis;
pub use coupling::{CouplingParameters, ParameterBounds, PARAMETER_COUNT, PARAMETER_NAMES};
pub use flags::{StructuralFeature, StructuralFlags};
pub use profile::LjpwProfile;
