//! # movewatch - Special-Move Input Recognition
//!
//! Recognizes fighting-game special moves from a per-tick stream of normalized input
//! frames, independently for each player.
//!
//! ## Features
//!
//! - **Sequence moves**: ordered directional motions finished by an allowed button combo
//! - **Charge moves**: hold a direction for a charge time, then release into a pattern
//! - **Per-player watchers**: value copies of shared templates, individually enabled,
//!   reset and mirrored for the side a player faces
//! - **Batched notifications**: at most one listener call per player per tick
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`input`] - Direction/button vocabulary and per-tick frames
//! - [`moves`] - Move templates, the template registry and the direction inverter
//! - [`watcher`] - Stateful per-player recognition (sequence and charge)
//! - [`dispatch`] - The [`Recognizer`] feeding frames to watchers and notifying listeners
//! - [`config`] - Recognizer settings and move books
//! - [`app`] - Terminal host driving a recognizer from stdin on a fixed tick

pub mod error;
pub mod input;
pub mod moves;
pub mod watcher;

pub mod config;
pub mod dispatch;
pub mod logging;

pub mod app;

pub use error::{MovewatchError, Result};

pub use config::{MoveBook, RecognizerSettings};
pub use dispatch::{PlayerId, RecognizedMove, Recognizer, Subscription};
pub use input::{Button, ButtonCombo, Direction, InputFrame, Token};
pub use moves::{InvertMode, MoveConfig, MoveId, MoveTemplate};
pub use watcher::Watcher;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
