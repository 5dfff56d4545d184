//! Conversion between the Bevy world (Y up) and the placement frame (Z up).
//!
//! Bevy +Y becomes placement +Z and Bevy -Z becomes placement +Y; X is shared.
//! The mapping is a proper rotation, so handedness is preserved and rotations
//! convert by conjugation.

use std::f32::consts::FRAC_1_SQRT_2;

use bevy::prelude::*;

use super::host::SurfaceHit;

/// Quarter turn about X taking Bevy vectors into the placement frame.
pub const TO_PLACEMENT: Quat = Quat::from_xyzw(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);
pub const TO_WORLD: Quat = Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

pub fn vec_to_placement(v: Vec3) -> Vec3 {
    TO_PLACEMENT * v
}

pub fn vec_to_world(v: Vec3) -> Vec3 {
    TO_WORLD * v
}

pub fn rotation_to_placement(rotation: Quat) -> Quat {
    (TO_PLACEMENT * rotation * TO_WORLD).normalize()
}

pub fn rotation_to_world(rotation: Quat) -> Quat {
    (TO_WORLD * rotation * TO_PLACEMENT).normalize()
}

/// Per-axis sizes follow the local axes: Bevy local Y is placement local Z.
pub fn extent_to_placement(extent: Vec3) -> Vec3 {
    Vec3::new(extent.x, extent.z, extent.y)
}

pub fn extent_to_world(extent: Vec3) -> Vec3 {
    Vec3::new(extent.x, extent.z, extent.y)
}

pub fn ray_to_placement(ray: Ray3d) -> Ray3d {
    Ray3d {
        origin: vec_to_placement(ray.origin),
        direction: TO_PLACEMENT * ray.direction,
    }
}

pub fn ray_to_world(ray: Ray3d) -> Ray3d {
    Ray3d {
        origin: vec_to_world(ray.origin),
        direction: TO_WORLD * ray.direction,
    }
}

pub fn hit_to_placement(point: Vec3, normal: Vec3) -> SurfaceHit {
    SurfaceHit {
        point: vec_to_placement(point),
        normal: vec_to_placement(normal).normalize_or_zero(),
    }
}

pub fn transform_to_placement(transform: &Transform) -> Transform {
    Transform {
        translation: vec_to_placement(transform.translation),
        rotation: rotation_to_placement(transform.rotation),
        scale: extent_to_placement(transform.scale),
    }
}

pub fn transform_to_world(transform: &Transform) -> Transform {
    Transform {
        translation: vec_to_world(transform.translation),
        rotation: rotation_to_world(transform.rotation),
        scale: extent_to_world(transform.scale),
    }
}
