//! Collaborators the spawn tool drives but does not own.
//!
//! Everything crossing these traits is in the placement frame; adapters are
//! responsible for converting to and from the host world.

use std::fmt::Debug;

use bevy::prelude::*;

/// Result of a ray-surface hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    /// Unit surface normal at `point`
    pub normal: Vec3,
}

/// World hit test used to anchor a placement.
pub trait SurfaceRaycast {
    fn raycast(&mut self, ray: Ray3d) -> Option<SurfaceHit>;
}

/// Grid snapping for a single Euler component, in degrees.
pub trait RotationGridSnap {
    fn snap_component(&self, degrees: f32) -> f32;
}

/// A provisional object created at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft<H> {
    pub handle: H,
    /// Local bounding half-extent at unit scale
    pub extent: Vec3,
}

/// Spawns and manages the provisional object shown while dragging.
pub trait DraftSpawner {
    type Handle: Copy + PartialEq + Debug;

    /// Create the draft at `pose`. `None` when nothing can be spawned.
    fn materialize_draft(&mut self, pose: &Transform) -> Option<Draft<Self::Handle>>;

    fn update_draft(&mut self, handle: Self::Handle, pose: &Transform);

    /// Turn the draft into a permanent scene object.
    fn commit_draft(&mut self, handle: Self::Handle);

    /// Remove the draft from the scene.
    fn discard_draft(&mut self, handle: Self::Handle);
}

/// Everything a full placement gesture needs.
pub trait PlacementHost: SurfaceRaycast + DraftSpawner + RotationGridSnap {}

impl<T: SurfaceRaycast + DraftSpawner + RotationGridSnap> PlacementHost for T {}
