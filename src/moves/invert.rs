//! Direction inverter used when a player changes facing.

use crate::error::{MovewatchError, Result};
use crate::input::Direction;
use std::fmt;
use std::str::FromStr;

/// Axis selection for [`invert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvertMode {
    /// Swap left and right.
    #[default]
    X,
    /// Swap up and down.
    Y,
    /// Both axis passes, each applied to the original pattern.
    XY,
}

impl fmt::Display for InvertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvertMode::X => "invertX",
            InvertMode::Y => "invertY",
            InvertMode::XY => "invertXY",
        })
    }
}

impl FromStr for InvertMode {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" | "invertx" => Ok(InvertMode::X),
            "y" | "inverty" => Ok(InvertMode::Y),
            "xy" | "invertxy" => Ok(InvertMode::XY),
            _ => Err(MovewatchError::UnknownInvertMode {
                mode: s.to_string(),
            }),
        }
    }
}

pub fn invert_x(dpad: &[Direction]) -> Vec<Direction> {
    dpad.iter().map(|direction| direction.mirror_x()).collect()
}

pub fn invert_y(dpad: &[Direction]) -> Vec<Direction> {
    dpad.iter().map(|direction| direction.mirror_y()).collect()
}

/// The two axis passes are independent: the Y pass runs on the original pattern, not
/// on the X pass output, so the result always equals [`invert_y`]. Diagonals are not
/// mirrored through the origin.
pub fn invert_xy(dpad: &[Direction]) -> Vec<Direction> {
    invert_y(dpad)
}

pub fn invert(dpad: &[Direction], mode: InvertMode) -> Vec<Direction> {
    match mode {
        InvertMode::X => invert_x(dpad),
        InvertMode::Y => invert_y(dpad),
        InvertMode::XY => invert_xy(dpad),
    }
}
