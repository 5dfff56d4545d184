//! Centralized constants for the designer
//!
//! Shared colors, sizes and numeric tolerances, kept in one place so the
//! solver, the gizmos and the UI agree on them.

use bevy::prelude::*;

/// Numeric tolerances used by the placement solver
pub mod tolerances {
    /// Two unit vectors whose |dot| is within this of 1 are treated as parallel
    pub const PARALLEL: f32 = 1e-4;
    /// A ray whose |dot| with the drag plane normal is below this never meets the plane
    pub const PLANE_PARALLEL: f32 = 1e-6;
    /// Cursor offsets shorter than this carry no direction
    pub const DIRECTION: f32 = 1e-4;
    /// Drafts whose scale vector is shorter than this are discarded on release
    pub const SCALE: f32 = 1e-4;
}

/// Default material colors for primitive shapes
pub mod primitive_colors {
    use super::*;

    pub const CUBE: Color = Color::srgb(0.8, 0.7, 0.6);
    pub const SPHERE: Color = Color::srgb(0.6, 0.7, 0.8);
    pub const CYLINDER: Color = Color::srgb(0.7, 0.8, 0.6);
    pub const CAPSULE: Color = Color::srgb(0.8, 0.6, 0.7);
    pub const PLANE: Color = Color::srgb(0.6, 0.6, 0.8);

    /// Get the default color for a primitive shape
    pub fn for_shape(shape: crate::scene::PrimitiveShape) -> Color {
        match shape {
            crate::scene::PrimitiveShape::Cube => CUBE,
            crate::scene::PrimitiveShape::Sphere => SPHERE,
            crate::scene::PrimitiveShape::Cylinder => CYLINDER,
            crate::scene::PrimitiveShape::Capsule => CAPSULE,
            crate::scene::PrimitiveShape::Plane => PLANE,
        }
    }
}

/// Gizmo colors for the spawn visualizer
pub mod visualizer_colors {
    use super::*;

    /// Hover marker under the cursor while idle
    pub const HOVER: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
    /// Drag plane ring and anchor-to-cursor line
    pub const DRAG: Color = Color::srgba(1.0, 0.85, 0.3, 0.9);
    pub const FORWARD: Color = Color::srgb(0.9, 0.3, 0.3);
    pub const RIGHT: Color = Color::srgb(0.3, 0.8, 0.3);
    pub const UP: Color = Color::srgb(0.3, 0.5, 0.9);
}

/// Alpha applied to drafts so they read as provisional
pub const DRAFT_ALPHA: f32 = 0.5;

/// Default sizes for various operations
pub mod sizes {
    /// Maximum distance for the placement raycast
    pub const RAYCAST_MAX_DISTANCE: f32 = 1000.0;
    /// Radius of the idle hover marker
    pub const HOVER_RADIUS: f32 = 0.15;
    /// Length of the surface normal line drawn at the hover marker
    pub const NORMAL_LENGTH: f32 = 0.75;
    /// Smallest drag plane ring radius drawn
    pub const MIN_RING_RADIUS: f32 = 0.25;
}
