//! Host line protocol.
//!
//! ```text
//! p1: Down DownRight          set p1's current frame (nothing after ':' = neutral)
//! !flip p2 [x|y|xy] [move]    mirror one or all of p2's moves (default x)
//! !reset p1 [move]
//! !enable p1 [move]
//! !disable p1 [move]
//! !quit
//! ```

use crate::dispatch::PlayerId;
use crate::error::{MovewatchError, Result};
use crate::input::InputFrame;
use crate::moves::{InvertMode, MoveId};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Frame {
        player: PlayerId,
        frame: InputFrame,
    },
    Flip {
        player: PlayerId,
        mode: InvertMode,
        move_id: Option<MoveId>,
    },
    Reset {
        player: PlayerId,
        move_id: Option<MoveId>,
    },
    Enable {
        player: PlayerId,
        move_id: Option<MoveId>,
        enabled: bool,
    },
    Quit,
}

impl FromStr for HostCommand {
    type Err = MovewatchError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(MovewatchError::invalid_command("empty line"));
        }

        match line.strip_prefix('!') {
            Some(command) => parse_control(command),
            None => parse_frame(line),
        }
    }
}

fn parse_frame(line: &str) -> Result<HostCommand> {
    let (player, tokens) = line.split_once(':').ok_or_else(|| {
        MovewatchError::invalid_command(format!("expected '<player>: <tokens>', got '{line}'"))
    })?;

    let player = player.trim();
    if player.is_empty() || player.contains(char::is_whitespace) {
        return Err(MovewatchError::invalid_command(format!(
            "bad player name '{player}'"
        )));
    }

    Ok(HostCommand::Frame {
        player: PlayerId::from(player),
        frame: tokens.parse()?,
    })
}

fn parse_control(command: &str) -> Result<HostCommand> {
    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();

    if name == "quit" {
        return match words.next() {
            None => Ok(HostCommand::Quit),
            Some(extra) => Err(MovewatchError::invalid_command(format!(
                "unexpected '{extra}' after !quit"
            ))),
        };
    }

    let player = words
        .next()
        .map(PlayerId::from)
        .ok_or_else(|| MovewatchError::invalid_command(format!("!{name} needs a player")))?;
    let mut rest: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "flip" => {
            let mode = match rest.first().map(|word| word.parse::<InvertMode>()) {
                Some(Ok(mode)) => {
                    rest.remove(0);
                    mode
                }
                _ => InvertMode::default(),
            };
            HostCommand::Flip {
                player,
                mode,
                move_id: take_move(&name, &rest)?,
            }
        }
        "reset" => HostCommand::Reset {
            player,
            move_id: take_move(&name, &rest)?,
        },
        "enable" | "disable" => HostCommand::Enable {
            player,
            move_id: take_move(&name, &rest)?,
            enabled: name == "enable",
        },
        _ => {
            return Err(MovewatchError::invalid_command(format!(
                "unknown command !{name}"
            )));
        }
    };
    Ok(command)
}

fn take_move(name: &str, rest: &[&str]) -> Result<Option<MoveId>> {
    match rest {
        [] => Ok(None),
        [move_id] => Ok(Some(MoveId::from(*move_id))),
        _ => Err(MovewatchError::invalid_command(format!(
            "too many arguments to !{name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    fn parse(line: &str) -> HostCommand {
        line.parse().unwrap()
    }

    #[test]
    fn parses_frames() {
        match parse("p1: Down ButtonA") {
            HostCommand::Frame { player, frame } => {
                assert_eq!(player.as_str(), "p1");
                assert_eq!(frame.primary(), Some(Direction::Down.into()));
                assert_eq!(frame.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            parse("p2:"),
            HostCommand::Frame {
                player: PlayerId::from("p2"),
                frame: InputFrame::empty(),
            }
        );
    }

    #[test]
    fn rejects_unknown_tokens_and_bad_lines() {
        assert!(matches!(
            "p1: Down Jump".parse::<HostCommand>(),
            Err(MovewatchError::UnknownToken { .. })
        ));
        assert!(matches!(
            "Down".parse::<HostCommand>(),
            Err(MovewatchError::InvalidCommand { .. })
        ));
        assert!(" : Down".parse::<HostCommand>().is_err());
        assert!("".parse::<HostCommand>().is_err());
        assert!("!teleport p1".parse::<HostCommand>().is_err());
        assert!("!reset".parse::<HostCommand>().is_err());
        assert!("!quit now".parse::<HostCommand>().is_err());
    }

    #[test]
    fn parses_flip_with_optional_mode_and_move() {
        assert_eq!(
            parse("!flip p2"),
            HostCommand::Flip {
                player: PlayerId::from("p2"),
                mode: InvertMode::X,
                move_id: None,
            }
        );
        assert_eq!(
            parse("!flip p2 y"),
            HostCommand::Flip {
                player: PlayerId::from("p2"),
                mode: InvertMode::Y,
                move_id: None,
            }
        );
        assert_eq!(
            parse("!flip p2 hadouken"),
            HostCommand::Flip {
                player: PlayerId::from("p2"),
                mode: InvertMode::X,
                move_id: Some(MoveId::from("hadouken")),
            }
        );
        assert_eq!(
            parse("!FLIP p1 xy sonic_boom"),
            HostCommand::Flip {
                player: PlayerId::from("p1"),
                mode: InvertMode::XY,
                move_id: Some(MoveId::from("sonic_boom")),
            }
        );
    }

    #[test]
    fn parses_reset_enable_disable_and_quit() {
        assert_eq!(
            parse("!reset p1"),
            HostCommand::Reset {
                player: PlayerId::from("p1"),
                move_id: None,
            }
        );
        assert_eq!(
            parse("!disable p1 hadouken"),
            HostCommand::Enable {
                player: PlayerId::from("p1"),
                move_id: Some(MoveId::from("hadouken")),
                enabled: false,
            }
        );
        assert_eq!(
            parse("!enable p1"),
            HostCommand::Enable {
                player: PlayerId::from("p1"),
                move_id: None,
                enabled: true,
            }
        );
        assert_eq!(parse("  !quit  "), HostCommand::Quit);
    }
}
