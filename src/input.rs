//! Input boundary of the recognizer.
//!
//! Raw hardware polling and key mapping live upstream; this module only defines the
//! normalized vocabulary the recognizer consumes once per tick per player.

pub mod frame;
pub mod token;

pub use frame::{ButtonCombo, InputFrame, COMBO_DELIMITER};
pub use token::{Button, Direction, Token};
