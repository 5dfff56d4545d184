//! Signed local axes of a placed object.
//!
//! In the placement frame an object's local axes are Forward = +X,
//! Right = +Y and Up = +Z. The discriminants share one bit layout: the low
//! bit carries the sign, the remaining bits select the axis family.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bit that distinguishes a negative axis from its positive counterpart.
const SIGN_BIT: u8 = 0x01;

/// A signed local axis, or no axis at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[repr(u8)]
pub enum AxisType {
    #[default]
    None = 0x00,
    /// Local +X
    Forward = 0x02,
    /// Local -X
    Backward = 0x03,
    /// Local +Y
    Right = 0x04,
    /// Local -Y
    Left = 0x05,
    /// Local +Z
    Up = 0x08,
    /// Local -Z
    Down = 0x09,
}

/// One of the three basis slots of a rotation, ignoring direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSlot {
    Forward,
    Right,
    Up,
}

impl AxisType {
    /// Every variant, in the order the settings UI lists them.
    pub const ALL: [AxisType; 7] = [
        AxisType::None,
        AxisType::Forward,
        AxisType::Backward,
        AxisType::Right,
        AxisType::Left,
        AxisType::Up,
        AxisType::Down,
    ];

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.bits() == bits)
    }

    /// The positive axis of the same family: Backward becomes Forward, Left
    /// becomes Right, Down becomes Up. Positive axes and `None` are unchanged.
    pub fn positive(self) -> Self {
        Self::from_bits(self.bits() & !SIGN_BIT).unwrap_or(self)
    }

    pub fn is_negative(self) -> bool {
        self.bits() & SIGN_BIT != 0
    }

    /// The basis slot this axis occupies, `None` for [`AxisType::None`].
    pub fn slot(self) -> Option<AxisSlot> {
        match self.positive() {
            AxisType::Forward => Some(AxisSlot::Forward),
            AxisType::Right => Some(AxisSlot::Right),
            AxisType::Up => Some(AxisSlot::Up),
            _ => None,
        }
    }

    /// Unit vector of this axis in the object's local space.
    pub fn local_vector(self) -> Vec3 {
        match self {
            AxisType::None => Vec3::ZERO,
            AxisType::Forward => Vec3::X,
            AxisType::Backward => Vec3::NEG_X,
            AxisType::Right => Vec3::Y,
            AxisType::Left => Vec3::NEG_Y,
            AxisType::Up => Vec3::Z,
            AxisType::Down => Vec3::NEG_Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AxisType::None => "None",
            AxisType::Forward => "Forward (+X)",
            AxisType::Backward => "Backward (-X)",
            AxisType::Right => "Right (+Y)",
            AxisType::Left => "Left (-Y)",
            AxisType::Up => "Up (+Z)",
            AxisType::Down => "Down (-Z)",
        }
    }
}
