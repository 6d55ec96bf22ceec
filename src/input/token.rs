//! Closed vocabulary of normalized input tokens.
//!
//! Upstream normalizers resolve diagonals and map physical keys/buttons before anything
//! reaches the recognizer, so every token here is already a logical symbol.

use crate::error::{MovewatchError, Result};
use std::fmt;
use std::str::FromStr;

/// One of the eight compass directions a tick can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Canonical token name.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::UpLeft => "UpLeft",
            Direction::UpRight => "UpRight",
            Direction::DownLeft => "DownLeft",
            Direction::DownRight => "DownRight",
        }
    }

    /// Whether holding `self` also holds `other`: equal directions, or a diagonal
    /// that contains the cardinal (`DownLeft` covers `Down` and `Left`).
    pub fn covers(self, other: Direction) -> bool {
        use Direction::*;

        self == other
            || matches!(
                (self, other),
                (UpLeft, Up)
                    | (UpLeft, Left)
                    | (UpRight, Up)
                    | (UpRight, Right)
                    | (DownLeft, Down)
                    | (DownLeft, Left)
                    | (DownRight, Down)
                    | (DownRight, Right)
            )
    }

    /// Mirror across the vertical axis (left <-> right).
    pub fn mirror_x(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::DownLeft => Direction::DownRight,
            Direction::DownRight => Direction::DownLeft,
            Direction::UpLeft => Direction::UpRight,
            Direction::UpRight => Direction::UpLeft,
            other => other,
        }
    }

    /// Mirror across the horizontal axis (up <-> down).
    pub fn mirror_y(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpLeft,
            Direction::DownRight => Direction::UpRight,
            Direction::UpLeft => Direction::DownLeft,
            Direction::UpRight => Direction::DownRight,
            other => other,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| MovewatchError::unknown_token(s))
    }
}

/// Action buttons recognised by the move watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    A,
    B,
    X,
    Y,
    L,
    R,
    L2,
    R2,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::L,
        Button::R,
        Button::L2,
        Button::R2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Button::A => "ButtonA",
            Button::B => "ButtonB",
            Button::X => "ButtonX",
            Button::Y => "ButtonY",
            Button::L => "ButtonL",
            Button::R => "ButtonR",
            Button::L2 => "ButtonL2",
            Button::R2 => "ButtonR2",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Button {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        Button::ALL
            .into_iter()
            .find(|button| button.as_str() == s)
            .ok_or_else(|| MovewatchError::unknown_token(s))
    }
}

/// A single normalized token from a tick's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Direction(Direction),
    Button(Button),
}

impl Token {
    pub fn as_direction(self) -> Option<Direction> {
        match self {
            Token::Direction(direction) => Some(direction),
            Token::Button(_) => None,
        }
    }

    pub fn as_button(self) -> Option<Button> {
        match self {
            Token::Button(button) => Some(button),
            Token::Direction(_) => None,
        }
    }
}

impl From<Direction> for Token {
    fn from(direction: Direction) -> Self {
        Token::Direction(direction)
    }
}

impl From<Button> for Token {
    fn from(button: Button) -> Self {
        Token::Button(button)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Direction(direction) => direction.fmt(f),
            Token::Button(button) => button.fmt(f),
        }
    }
}

impl FromStr for Token {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(button) = s.parse::<Button>() {
            return Ok(Token::Button(button));
        }
        s.parse::<Direction>().map(Token::Direction)
    }
}
