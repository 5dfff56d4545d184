use bevy::prelude::*;
use thiserror::Error;

/// Reasons a placement gesture could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cursor ray did not hit any surface")]
    NoHit,
    #[error("no spawnable asset is available for the draft")]
    NoDraft,
}

/// Conditions the solver recovered from with a fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlacementWarning {
    #[error("drag direction is parallel to the anchor up vector, using an arbitrary up")]
    DegenerateBasis,
    #[error("normal axis and cursor axis claim the same local axis, falling back to default rotation")]
    ConflictingAxisConfig,
    #[error("scale was not finite and has been reset to one (anchor extent = {extent})")]
    NonFiniteScale { extent: Vec3 },
    #[error("cursor ray is parallel to the drag plane, using the anchor position")]
    UndefinedPlaneIntersection,
}
