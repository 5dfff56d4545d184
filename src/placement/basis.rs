//! Orthonormal basis construction from two known axes.

use bevy::prelude::*;

use super::axis::{AxisSlot, AxisType};
use crate::constants::tolerances::PARALLEL;

/// Replace `hint` when it cannot span a plane with `primary`.
///
/// World up is picked unless `primary` itself points (almost) straight up,
/// in which case world forward is used, so the result is never parallel.
fn spanning_hint(primary: Vec3, hint: Vec3) -> Vec3 {
    let hint = hint.normalize_or_zero();
    let degenerate =
        hint == Vec3::ZERO || (primary.dot(hint).abs() - 1.0).abs() <= PARALLEL;
    if !degenerate {
        return hint;
    }
    if primary.z.abs() < 1.0 - PARALLEL {
        Vec3::Z
    } else {
        Vec3::X
    }
}

fn from_columns(x: Vec3, y: Vec3, z: Vec3) -> Quat {
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Rotation whose local Z is `z` exactly and whose local X leans toward `x_hint`.
pub fn from_z_x(z: Vec3, x_hint: Vec3) -> Quat {
    let z = z.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let hint = spanning_hint(z, x_hint);
    let y = z.cross(hint).normalize();
    let x = y.cross(z);
    from_columns(x, y, z)
}

/// Rotation whose local Z is `z` exactly and whose local Y leans toward `y_hint`.
pub fn from_z_y(z: Vec3, y_hint: Vec3) -> Quat {
    let z = z.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let hint = spanning_hint(z, y_hint);
    let x = hint.cross(z).normalize();
    let y = z.cross(x);
    from_columns(x, y, z)
}

/// Rotation whose local X is `x` exactly and whose local Y leans toward `y_hint`.
pub fn from_x_y(x: Vec3, y_hint: Vec3) -> Quat {
    let x = x.normalize_or_zero();
    if x == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let hint = spanning_hint(x, y_hint);
    let z = x.cross(hint).normalize();
    let y = z.cross(x);
    from_columns(x, y, z)
}

/// Orthonormal frame derived from the drag direction and the anchor's up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFrame {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CursorFrame {
    /// The frame as a rotation mapping local X/Y/Z to forward/right/up.
    pub fn rotation(&self) -> Quat {
        from_columns(self.forward, self.right, self.up)
    }
}

/// The two slots filled by the axis swizzle. The third is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownAxes {
    ForwardUp { forward: Vec3, up: Vec3 },
    RightUp { right: Vec3, up: Vec3 },
    ForwardRight { forward: Vec3, right: Vec3 },
}

/// Outcome of mapping the cursor frame onto the object's local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwizzledBasis {
    /// Normal and cursor alignment claimed two distinct slots.
    TwoKnown(KnownAxes),
    /// Both alignments claimed `slot`; no slot pair is known.
    Conflicting { slot: AxisSlot },
}

/// Slot and vector the surface normal assigns. `None` behaves like Up.
fn normal_assignment(axis: AxisType, up: Vec3) -> (AxisSlot, Vec3) {
    match axis {
        AxisType::Forward => (AxisSlot::Forward, up),
        AxisType::Backward => (AxisSlot::Forward, -up),
        AxisType::Right => (AxisSlot::Right, up),
        AxisType::Left => (AxisSlot::Right, -up),
        AxisType::Down => (AxisSlot::Up, -up),
        AxisType::None | AxisType::Up => (AxisSlot::Up, up),
    }
}

/// Slot and vector the drag direction assigns. `None` behaves like Forward.
fn cursor_assignment(axis: AxisType, forward: Vec3) -> (AxisSlot, Vec3) {
    match axis {
        AxisType::Backward => (AxisSlot::Forward, -forward),
        AxisType::Right => (AxisSlot::Right, forward),
        AxisType::Left => (AxisSlot::Right, -forward),
        AxisType::Up => (AxisSlot::Up, forward),
        AxisType::Down => (AxisSlot::Up, -forward),
        AxisType::None | AxisType::Forward => (AxisSlot::Forward, forward),
    }
}

impl SwizzledBasis {
    pub fn new(frame: &CursorFrame, normal_axis: AxisType, cursor_axis: AxisType) -> Self {
        let (normal_slot, normal_vector) = normal_assignment(normal_axis, frame.up);
        let (cursor_slot, cursor_vector) = cursor_assignment(cursor_axis, frame.forward);

        let known = match (normal_slot, cursor_slot) {
            (AxisSlot::Forward, AxisSlot::Up) => KnownAxes::ForwardUp {
                forward: normal_vector,
                up: cursor_vector,
            },
            (AxisSlot::Up, AxisSlot::Forward) => KnownAxes::ForwardUp {
                forward: cursor_vector,
                up: normal_vector,
            },
            (AxisSlot::Right, AxisSlot::Up) => KnownAxes::RightUp {
                right: normal_vector,
                up: cursor_vector,
            },
            (AxisSlot::Up, AxisSlot::Right) => KnownAxes::RightUp {
                right: cursor_vector,
                up: normal_vector,
            },
            (AxisSlot::Forward, AxisSlot::Right) => KnownAxes::ForwardRight {
                forward: normal_vector,
                right: cursor_vector,
            },
            (AxisSlot::Right, AxisSlot::Forward) => KnownAxes::ForwardRight {
                forward: cursor_vector,
                right: normal_vector,
            },
            (slot, _) => return SwizzledBasis::Conflicting { slot },
        };
        SwizzledBasis::TwoKnown(known)
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self, SwizzledBasis::Conflicting { .. })
    }

    /// Rotation for the object. A conflicting swizzle uses the raw cursor frame.
    pub fn rotation(&self, frame: &CursorFrame) -> Quat {
        match *self {
            SwizzledBasis::TwoKnown(KnownAxes::RightUp { right, up }) => from_z_y(up, right),
            SwizzledBasis::TwoKnown(KnownAxes::ForwardUp { forward, up }) => from_z_x(up, forward),
            SwizzledBasis::TwoKnown(KnownAxes::ForwardRight { forward, right }) => {
                from_x_y(forward, right)
            }
            SwizzledBasis::Conflicting { .. } => frame.rotation(),
        }
    }
}
