//! Built-in move book used when no book file is given.

use crate::config::MoveBook;
use crate::input::Direction::*;
use crate::moves::MoveConfig;

/// Classic motions authored for a player facing right.
pub fn default_move_book() -> MoveBook {
    MoveBook::new()
        .with_move(
            "hadouken",
            MoveConfig::sequence([Down, DownRight, Right]).with_buttons(["ButtonA", "ButtonB"]),
        )
        .with_move(
            "shoryuken",
            MoveConfig::sequence([Right, Down, DownRight]).with_buttons(["ButtonA", "ButtonB"]),
        )
        .with_move(
            "tatsumaki",
            MoveConfig::sequence([Down, DownLeft, Left]).with_buttons(["ButtonX", "ButtonY"]),
        )
        .with_move(
            "sonic_boom",
            MoveConfig::charge([Left, Right], 500).with_buttons(["ButtonA", "ButtonX"]),
        )
        .with_move(
            "flash_kick",
            MoveConfig::charge([Down, Up], 500).with_buttons(["ButtonB", "ButtonY"]),
        )
}
