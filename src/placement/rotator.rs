//! Roll/pitch/yaw rotations and grid snapping.

use bevy::prelude::*;

use super::host::RotationGridSnap;

/// Euler rotation in degrees.
///
/// Applied as yaw about Z, then pitch about Y, then roll about X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotator {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Rotator {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::ZYX);
        Self {
            roll: roll.to_degrees(),
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
        }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Replace the components flagged in `[roll, pitch, yaw]` with their
    /// grid-snapped value.
    pub fn snap_components(self, flags: [bool; 3], grid: &impl RotationGridSnap) -> Self {
        let [roll, pitch, yaw] = flags;
        Self {
            roll: if roll { grid.snap_component(self.roll) } else { self.roll },
            pitch: if pitch { grid.snap_component(self.pitch) } else { self.pitch },
            yaw: if yaw { grid.snap_component(self.yaw) } else { self.yaw },
        }
    }
}

/// Snap a quaternion per component. Unflagged rotations pass through untouched
/// so they never pay for an Euler round trip.
pub fn snap_rotation(rotation: Quat, flags: [bool; 3], grid: &impl RotationGridSnap) -> Quat {
    if !flags.contains(&true) {
        return rotation;
    }
    Rotator::from_quat(rotation).snap_components(flags, grid).to_quat()
}

/// Angle grid with a fixed step in degrees. A step of zero disables snapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationGrid {
    pub step_degrees: f32,
}

impl RotationGrid {
    pub const fn new(step_degrees: f32) -> Self {
        Self { step_degrees }
    }
}

impl RotationGridSnap for RotationGrid {
    fn snap_component(&self, degrees: f32) -> f32 {
        if self.step_degrees <= 0.0 {
            degrees
        } else {
            (degrees / self.step_degrees).round() * self.step_degrees
        }
    }
}
