//! Metrics derived from profiles: single-entity, pairwise and system-wide.

pub mod archetype;
pub mod diagnostic;
pub mod drift;
pub mod entity;
pub mod fractal;
pub mod interaction;
pub mod secondary;
pub mod system;

pub use archetype::{match_archetype, Archetype, ArchetypeMatch};
pub use diagnostic::{ArchetypeReport, Diagnostic, PrimaryMetrics};
pub use drift::SemanticDrift;
pub use entity::{clarity, density, harmony, harmony_with_anchor, influence, mass, Entity};
pub use fractal::{aggregate_profiles, build_fractal_tree, FractalProfile, FractalScale};
pub use interaction::{friction, gravity, gravity_with_constant, resonance};
pub use secondary::SecondaryMetrics;
pub use system::{FrictionHotspot, GravitationalCentre, SystemSummary};
