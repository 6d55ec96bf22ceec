//! Recognizer settings and move books.
//!
//! Settings carry the buffer bound and the default expiry windows templates fall back
//! to. A [`MoveBook`] is a named collection of move configs; with the `config` feature
//! it can be read from TOML:
//!
//! ```toml
//! [settings]
//! sequence_timeout_ms = 250
//!
//! [moves.hadouken]
//! kind = "sequence"
//! dpad = ["Down", "DownRight", "Right"]
//! buttons = ["ButtonA", "ButtonB"]
//!
//! [moves.sonic_boom]
//! kind = "charge"
//! dpad = ["Left", "Right"]
//! buttons = ["ButtonA"]
//! charge_time_ms = 500
//! ```

use crate::dispatch::Recognizer;
use crate::error::{MovewatchError, Result};
use crate::moves::{MoveConfig, DEFAULT_CHARGE_TIMEOUT_MS, DEFAULT_SEQUENCE_TIMEOUT_MS};
use std::collections::BTreeMap;
use std::time::Duration;

/// Capacity of each watcher's direction buffer.
pub const DEFAULT_DPAD_CAPACITY: usize = 8;

/// Tunables shared by every watcher a recognizer creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizerSettings {
    /// Direction tokens kept per watcher; the oldest is evicted on overflow.
    pub dpad_capacity: usize,
    /// Expiry window for sequence moves that do not declare one.
    pub sequence_timeout: Duration,
    /// Expiry window for charge moves that do not declare one.
    pub charge_timeout: Duration,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            dpad_capacity: DEFAULT_DPAD_CAPACITY,
            sequence_timeout: Duration::from_millis(DEFAULT_SEQUENCE_TIMEOUT_MS),
            charge_timeout: Duration::from_millis(DEFAULT_CHARGE_TIMEOUT_MS),
        }
    }
}

/// Optional overrides for [`RecognizerSettings`] carried by a move book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
pub struct SettingsOverrides {
    #[cfg_attr(feature = "config", serde(default))]
    pub dpad_capacity: Option<usize>,
    #[cfg_attr(feature = "config", serde(default))]
    pub sequence_timeout_ms: Option<u64>,
    #[cfg_attr(feature = "config", serde(default))]
    pub charge_timeout_ms: Option<u64>,
}

impl SettingsOverrides {
    pub fn apply(&self, base: RecognizerSettings) -> Result<RecognizerSettings> {
        let settings = RecognizerSettings {
            dpad_capacity: self.dpad_capacity.unwrap_or(base.dpad_capacity),
            sequence_timeout: self
                .sequence_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(base.sequence_timeout),
            charge_timeout: self
                .charge_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(base.charge_timeout),
        };

        if settings.dpad_capacity == 0 {
            return Err(MovewatchError::config("dpad_capacity must be at least 1"));
        }
        Ok(settings)
    }
}

/// Named move configs plus the settings they were authored against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
pub struct MoveBook {
    #[cfg_attr(feature = "config", serde(default))]
    pub settings: SettingsOverrides,
    #[cfg_attr(feature = "config", serde(default))]
    pub moves: BTreeMap<String, MoveConfig>,
}

impl MoveBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move(mut self, move_id: impl Into<String>, config: MoveConfig) -> Self {
        self.moves.insert(move_id.into(), config);
        self
    }

    /// Effective settings: defaults with this book's overrides applied.
    pub fn settings(&self) -> Result<RecognizerSettings> {
        self.settings.apply(RecognizerSettings::default())
    }

    /// Build a recognizer configured by this book with every valid move registered.
    pub fn build_recognizer(&self) -> Result<Recognizer> {
        let mut recognizer = Recognizer::with_settings(self.settings()?);
        self.install(&mut recognizer);
        Ok(recognizer)
    }

    /// Register every move in the book, returning how many were accepted.
    ///
    /// Invalid moves are skipped (and logged by the recognizer) so one bad entry does
    /// not take the rest of the book down with it.
    pub fn install(&self, recognizer: &mut Recognizer) -> usize {
        let mut installed = 0;
        for (move_id, config) in &self.moves {
            if recognizer.create_move(move_id.as_str(), config).is_ok() {
                installed += 1;
            }
        }
        installed
    }
}

#[cfg(feature = "config")]
mod file {
    use super::MoveBook;
    use crate::error::{MovewatchError, Result};
    use std::path::{Path, PathBuf};

    impl MoveBook {
        pub fn from_toml_str(text: &str) -> Result<Self> {
            toml::from_str(text).map_err(|err| MovewatchError::config(err.to_string()))
        }

        pub fn load(path: &Path) -> Result<Self> {
            let text = std::fs::read_to_string(path).map_err(|err| {
                MovewatchError::file_error(
                    format!("Failed to read move book {}", path.display()),
                    err,
                )
            })?;
            let book = Self::from_toml_str(&text)?;
            log::info!(
                "Loaded {} move(s) from {}",
                book.moves.len(),
                path.display()
            );
            Ok(book)
        }

        /// `<config dir>/movewatch/moves.toml`, when the platform has a config dir.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("movewatch").join("moves.toml"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn defaults_match_documented_values() {
        let settings = RecognizerSettings::default();
        assert_eq!(settings.dpad_capacity, 8);
        assert_eq!(settings.sequence_timeout, Duration::from_millis(250));
        assert_eq!(settings.charge_timeout, Duration::from_millis(300));
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let overrides = SettingsOverrides {
            sequence_timeout_ms: Some(400),
            ..SettingsOverrides::default()
        };
        let settings = overrides.apply(RecognizerSettings::default()).unwrap();
        assert_eq!(settings.sequence_timeout, Duration::from_millis(400));
        assert_eq!(settings.charge_timeout, Duration::from_millis(300));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let overrides = SettingsOverrides {
            dpad_capacity: Some(0),
            ..SettingsOverrides::default()
        };
        assert!(matches!(
            overrides.apply(RecognizerSettings::default()),
            Err(MovewatchError::ConfigError { .. })
        ));
    }

    #[test]
    fn install_skips_invalid_moves() {
        let mut bad = MoveConfig::sequence([Direction::Down]);
        bad.kind = "mash".to_string();
        let book = MoveBook::new()
            .with_move(
                "hadouken",
                MoveConfig::sequence([Direction::Down, Direction::Right]).with_buttons(["ButtonA"]),
            )
            .with_move("mash", bad);

        let recognizer = book.build_recognizer().unwrap();
        assert!(recognizer.has_move("hadouken"));
        assert!(!recognizer.has_move("mash"));
    }

    #[cfg(feature = "config")]
    mod toml_loading {
        use super::*;
        use std::io::Write;

        const BOOK: &str = r#"
            [settings]
            charge_timeout_ms = 350

            [moves.hadouken]
            kind = "sequence"
            dpad = ["Down", "DownRight", "Right"]
            buttons = ["ButtonA", "ButtonA+ButtonB"]

            [moves.sonic_boom]
            kind = "charge"
            dpad = ["Left", "Right"]
            buttons = ["ButtonA"]
            charge_time_ms = 500
        "#;

        #[test]
        fn parses_book_from_toml() {
            let book = MoveBook::from_toml_str(BOOK).unwrap();
            assert_eq!(book.moves.len(), 2);
            assert_eq!(
                book.moves["hadouken"].dpad,
                vec![Direction::Down, Direction::DownRight, Direction::Right]
            );
            assert_eq!(book.moves["sonic_boom"].charge_time_ms, Some(500));
            assert_eq!(
                book.settings().unwrap().charge_timeout,
                Duration::from_millis(350)
            );
        }

        #[test]
        fn loads_book_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(BOOK.as_bytes()).unwrap();

            let book = MoveBook::load(file.path()).unwrap();
            let recognizer = book.build_recognizer().unwrap();
            assert!(recognizer.has_move("hadouken"));
            assert!(recognizer.has_move("sonic_boom"));
        }

        #[test]
        fn reports_malformed_toml_and_missing_files() {
            assert!(matches!(
                MoveBook::from_toml_str("[moves.x]\nkind = 3"),
                Err(MovewatchError::ConfigError { .. })
            ));
            assert!(matches!(
                MoveBook::load(std::path::Path::new("/definitely/not/here.toml")),
                Err(MovewatchError::FileError { .. })
            ));
        }
    }
}
