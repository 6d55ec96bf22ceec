//! Move authoring configs and the immutable templates built from them.

use crate::config::RecognizerSettings;
use crate::error::{MovewatchError, Result};
use crate::input::{ButtonCombo, Direction};
use std::borrow::Borrow;
use std::fmt;
use std::time::Duration;

/// Default expiry window for sequence moves, in milliseconds.
pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 250;
/// Default expiry window for charge moves, in milliseconds.
pub const DEFAULT_CHARGE_TIMEOUT_MS: u64 = 300;

/// Identifier of a configured move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveId(String);

impl MoveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MoveId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MoveId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for MoveId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authoring shape of a move, as written by designers or loaded from a move book.
///
/// `kind` stays a string so unknown kinds are representable and rejected at
/// registration rather than at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
pub struct MoveConfig {
    pub kind: String,
    pub dpad: Vec<Direction>,
    #[cfg_attr(feature = "config", serde(default))]
    pub buttons: Option<Vec<String>>,
    #[cfg_attr(feature = "config", serde(default))]
    pub timeout_ms: Option<u64>,
    #[cfg_attr(feature = "config", serde(default))]
    pub charge_time_ms: Option<u64>,
    #[cfg_attr(feature = "config", serde(default))]
    pub charge_index: Option<usize>,
}

impl MoveConfig {
    pub fn sequence(dpad: impl Into<Vec<Direction>>) -> Self {
        Self {
            kind: "sequence".to_string(),
            dpad: dpad.into(),
            buttons: None,
            timeout_ms: None,
            charge_time_ms: None,
            charge_index: None,
        }
    }

    pub fn charge(dpad: impl Into<Vec<Direction>>, charge_time_ms: u64) -> Self {
        Self {
            kind: "charge".to_string(),
            charge_time_ms: Some(charge_time_ms),
            ..Self::sequence(dpad)
        }
    }

    pub fn with_buttons<I, S>(mut self, combos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = Some(combos.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_charge_index(mut self, charge_index: usize) -> Self {
        self.charge_index = Some(charge_index);
        self
    }
}

/// Recognition algorithm selected by the template's declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Ordered directional pattern, optionally gated by a button combo.
    Sequence,
    /// Hold `dpad[charge_index]` for `charge_time`, then perform the release pattern.
    Charge {
        charge_time: Duration,
        charge_index: usize,
    },
}

/// Immutable move definition used as the source for per-player watchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTemplate {
    id: MoveId,
    kind: MoveKind,
    dpad: Vec<Direction>,
    buttons: Option<Vec<ButtonCombo>>,
    timeout: Duration,
}

impl MoveTemplate {
    /// Validate a config using the default recognizer settings.
    pub fn from_config(id: impl Into<MoveId>, config: &MoveConfig) -> Result<Self> {
        Self::from_config_with(id, config, &RecognizerSettings::default())
    }

    /// Validate a config, taking default timeouts from `settings`.
    pub fn from_config_with(
        id: impl Into<MoveId>,
        config: &MoveConfig,
        settings: &RecognizerSettings,
    ) -> Result<Self> {
        let id = id.into();

        let buttons = config
            .buttons
            .as_ref()
            .map(|combos| {
                combos
                    .iter()
                    .map(|combo| combo.parse::<ButtonCombo>())
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let (kind, default_timeout) = match config.kind.as_str() {
            "sequence" => (MoveKind::Sequence, settings.sequence_timeout),
            "charge" => {
                let charge_time_ms =
                    config
                        .charge_time_ms
                        .ok_or_else(|| MovewatchError::MissingChargeTime {
                            move_id: id.to_string(),
                        })?;
                let charge_index = config.charge_index.unwrap_or(0);
                if charge_index >= config.dpad.len() {
                    return Err(MovewatchError::ChargeIndexOutOfRange {
                        move_id: id.to_string(),
                        index: charge_index,
                        len: config.dpad.len(),
                    });
                }
                (
                    MoveKind::Charge {
                        charge_time: Duration::from_millis(charge_time_ms),
                        charge_index,
                    },
                    settings.charge_timeout,
                )
            }
            other => {
                return Err(MovewatchError::UnknownMoveKind {
                    move_id: id.to_string(),
                    kind: other.to_string(),
                })
            }
        };

        let timeout = config
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(default_timeout);

        Ok(Self {
            id,
            kind,
            dpad: config.dpad.clone(),
            buttons,
            timeout,
        })
    }

    pub fn id(&self) -> &MoveId {
        &self.id
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn dpad(&self) -> &[Direction] {
        &self.dpad
    }

    pub fn buttons(&self) -> Option<&[ButtonCombo]> {
        self.buttons.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the template declares `combo` among its allowed action buttons.
    pub fn allows_combo(&self, combo: &ButtonCombo) -> bool {
        self.buttons
            .as_ref()
            .is_some_and(|allowed| allowed.contains(combo))
    }

    /// Direction that must be held before a charge move's release counts.
    pub fn hold_direction(&self) -> Option<Direction> {
        match self.kind {
            MoveKind::Charge { charge_index, .. } => self.dpad.get(charge_index).copied(),
            MoveKind::Sequence => None,
        }
    }

    /// Copy of this template with a rewritten directional pattern.
    pub(crate) fn with_dpad(&self, dpad: Vec<Direction>) -> Self {
        Self {
            dpad,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use Direction::*;

    #[test]
    fn sequence_defaults_to_short_timeout() {
        let config = MoveConfig::sequence([Down, DownRight, Right]).with_buttons(["ButtonB"]);
        let template = MoveTemplate::from_config("hadouken", &config).unwrap();

        assert_eq!(template.kind(), MoveKind::Sequence);
        assert_eq!(template.timeout(), Duration::from_millis(250));
        assert!(template.allows_combo(&ButtonCombo::from(Button::B)));
        assert!(!template.allows_combo(&ButtonCombo::from(Button::A)));
        assert_eq!(template.hold_direction(), None);
    }

    #[test]
    fn charge_defaults_to_longer_timeout_and_first_hold() {
        let config = MoveConfig::charge([Left, Right], 500).with_buttons(["ButtonA"]);
        let template = MoveTemplate::from_config("sonic_boom", &config).unwrap();

        assert_eq!(template.timeout(), Duration::from_millis(300));
        assert_eq!(
            template.kind(),
            MoveKind::Charge {
                charge_time: Duration::from_millis(500),
                charge_index: 0,
            }
        );
        assert_eq!(template.hold_direction(), Some(Left));
    }

    #[test]
    fn explicit_timeout_overrides_default() {
        let config = MoveConfig::sequence([Down]).with_timeout_ms(400);
        let template = MoveTemplate::from_config("drop", &config).unwrap();
        assert_eq!(template.timeout(), Duration::from_millis(400));
    }

    #[test]
    fn rejects_unknown_kind() {
        let mut config = MoveConfig::sequence([Down]);
        config.kind = "mash".to_string();
        let err = MoveTemplate::from_config("mash", &config).unwrap_err();
        assert!(matches!(err, MovewatchError::UnknownMoveKind { kind, .. } if kind == "mash"));
    }

    #[test]
    fn rejects_charge_without_time_or_with_bad_index() {
        let mut config = MoveConfig::charge([Down, Up], 500);
        config.charge_time_ms = None;
        assert!(matches!(
            MoveTemplate::from_config("flash_kick", &config),
            Err(MovewatchError::MissingChargeTime { .. })
        ));

        let config = MoveConfig::charge([Down, Up], 500).with_charge_index(2);
        assert!(matches!(
            MoveTemplate::from_config("flash_kick", &config),
            Err(MovewatchError::ChargeIndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn rejects_malformed_button_combo() {
        let config = MoveConfig::sequence([Down]).with_buttons(["ButtonA+Up"]);
        assert!(matches!(
            MoveTemplate::from_config("bad", &config),
            Err(MovewatchError::InvalidButtonCombo { .. })
        ));
    }
}
