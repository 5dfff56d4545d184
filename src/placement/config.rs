use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::axis::{AxisSlot, AxisType};
use super::random::RandomRange;

/// User-editable rules that shape a spawned object's pose.
///
/// Vectors are expressed in the placement frame (Z up, X forward).
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Offset added in the object's local space, rotated by the final rotation
    pub relative_offset: Vec3,
    /// Offset added in world space
    pub world_offset: Vec3,
    /// Local axis aligned with the hit surface normal
    pub normal_axis: AxisType,
    /// Local axis aligned with the drag direction
    pub cursor_axis: AxisType,
    /// Snap the final roll to the rotation grid
    pub snap_rotation_x: bool,
    /// Snap the final pitch to the rotation grid
    pub snap_rotation_y: bool,
    /// Snap the final yaw to the rotation grid
    pub snap_rotation_z: bool,
    pub apply_random_rotation: bool,
    /// Random rotation offsets in degrees for X (roll), Y (pitch), Z (yaw)
    pub random_rotation: [RandomRange; 3],
    pub apply_random_scale: bool,
    /// Random scale per local axis
    pub random_scale: [RandomRange; 3],
    /// Scale the object's bounds to reach the cursor along the cursor axis
    pub scale_toward_cursor: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        let rotation = RandomRange::new(0.0, 360.0, false);
        let scale = RandomRange::new(0.8, 1.2, true);
        Self {
            relative_offset: Vec3::ZERO,
            world_offset: Vec3::ZERO,
            normal_axis: AxisType::Up,
            cursor_axis: AxisType::Forward,
            snap_rotation_x: false,
            snap_rotation_y: false,
            snap_rotation_z: false,
            apply_random_rotation: false,
            random_rotation: [rotation; 3],
            apply_random_scale: false,
            random_scale: [scale; 3],
            scale_toward_cursor: false,
        }
    }
}

impl AlignmentConfig {
    /// Always the positive family of [`Self::cursor_axis`]:
    /// Backward becomes Forward while Up stays Up.
    pub fn positive_cursor_axis(&self) -> AxisType {
        self.cursor_axis.positive()
    }

    /// Slot claimed by the surface normal. `None` keeps the normal on Up.
    pub fn normal_slot(&self) -> AxisSlot {
        self.normal_axis.slot().unwrap_or(AxisSlot::Up)
    }

    /// Slot claimed by the drag direction. `None` keeps the cursor on Forward.
    pub fn cursor_slot(&self) -> AxisSlot {
        self.cursor_axis.slot().unwrap_or(AxisSlot::Forward)
    }

    /// Both alignments want the same local axis, so the solver will fall
    /// back to the unswizzled basis.
    pub fn has_axis_conflict(&self) -> bool {
        self.normal_slot() == self.cursor_slot()
    }

    /// Snap flags as `[roll, pitch, yaw]`.
    pub fn snap_flags(&self) -> [bool; 3] {
        [self.snap_rotation_x, self.snap_rotation_y, self.snap_rotation_z]
    }

    pub fn snaps_any_rotation(&self) -> bool {
        self.snap_flags().contains(&true)
    }
}
