//! Per-tick frames and button combos.

use crate::error::{MovewatchError, Result};
use crate::input::token::{Button, Direction, Token};
use std::fmt;
use std::str::FromStr;

/// Delimiter joining simultaneously pressed buttons into one combo.
pub const COMBO_DELIMITER: &str = "+";

/// `+`-joined set of simultaneously pressed buttons, treated as one atomic token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonCombo(String);

impl ButtonCombo {
    /// Join buttons in the order given. Returns `None` when no buttons are pressed.
    pub fn from_buttons<I>(buttons: I) -> Option<Self>
    where
        I: IntoIterator<Item = Button>,
    {
        let joined = buttons
            .into_iter()
            .map(Button::as_str)
            .collect::<Vec<_>>()
            .join(COMBO_DELIMITER);

        if joined.is_empty() {
            None
        } else {
            Some(Self(joined))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Button> for ButtonCombo {
    fn from(button: Button) -> Self {
        Self(button.as_str().to_string())
    }
}

impl fmt::Display for ButtonCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ButtonCombo {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        let buttons = s
            .split(COMBO_DELIMITER)
            .map(|part| {
                part.trim()
                    .parse::<Button>()
                    .map_err(|_| MovewatchError::InvalidButtonCombo {
                        combo: s.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_buttons(buttons).ok_or_else(|| MovewatchError::InvalidButtonCombo {
            combo: s.to_string(),
        })
    }
}

/// Ordered token list for one player on one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InputFrame {
    tokens: Vec<Token>,
}

impl InputFrame {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Neutral frame: nothing held.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// First token of the frame; charge detection keys off this one.
    pub fn primary(&self) -> Option<Token> {
        self.tokens.first().copied()
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.tokens.iter().filter_map(|token| token.as_direction())
    }

    pub fn buttons(&self) -> impl Iterator<Item = Button> + '_ {
        self.tokens.iter().filter_map(|token| token.as_button())
    }

    /// All buttons of the frame joined into one combo, in frame order.
    pub fn button_combo(&self) -> Option<ButtonCombo> {
        ButtonCombo::from_buttons(self.buttons())
    }
}

impl From<Vec<Token>> for InputFrame {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for InputFrame {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for InputFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            token.fmt(f)?;
        }
        Ok(())
    }
}

/// Parses whitespace or comma separated tokens; `ButtonA+ButtonB` expands to both buttons.
impl FromStr for InputFrame {
    type Err = MovewatchError;

    fn from_str(s: &str) -> Result<Self> {
        s.split(|c: char| c.is_whitespace() || c == ',' || c == '+')
            .filter(|part| !part.is_empty())
            .map(str::parse::<Token>)
            .collect()
    }
}
