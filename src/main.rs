//! movewatch - Special-Move Input Recognition
//!
//! Reads per-player input frames from stdin and prints the special moves they perform.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use movewatch::app::{default_move_book, Application, Session};
use movewatch::{MoveBook, PlayerId};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let matches = Command::new("movewatch")
        .version(movewatch::VERSION)
        .about("Recognizes fighting-game special moves from input frames")
        .long_about(
            "movewatch reads lines like 'p1: Down DownRight' from stdin, feeds one frame per \
             player per tick to a move recognizer and prints every special move performed. \
             Control lines: !flip <player> [x|y|xy] [move], !reset/!enable/!disable <player> \
             [move], !quit.",
        )
        .arg(
            Arg::new("tick-ms")
                .long("tick-ms")
                .help("Tick length in milliseconds")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("16"),
        )
        .arg(
            Arg::new("players")
                .long("players")
                .help("Comma separated player names; every second player starts facing left")
                .value_delimiter(',')
                .default_value("p1,p2"),
        )
        .arg(
            Arg::new("moves")
                .long("moves")
                .value_name("FILE")
                .help("TOML move book to load instead of the built-in moves"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    movewatch::logging::init(matches.get_flag("verbose"));

    let tick = Duration::from_millis(
        *matches
            .get_one::<u64>("tick-ms")
            .context("tick-ms has a default")?,
    );

    let players: Vec<PlayerId> = matches
        .get_many::<String>("players")
        .context("players has a default")?
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(PlayerId::from)
        .collect();
    if players.is_empty() {
        anyhow::bail!("At least one player is required");
    }

    let book = match matches.get_one::<String>("moves") {
        Some(path) => load_book(Path::new(path))?,
        None => user_book()?.unwrap_or_else(default_move_book),
    };

    let session = Session::new(&book, &players)?;
    let mut app = Application::new(session, tick);

    app.run().await?;

    Ok(())
}

#[cfg(feature = "config")]
fn load_book(path: &Path) -> Result<MoveBook> {
    MoveBook::load(path).with_context(|| format!("Failed to load move book {}", path.display()))
}

#[cfg(not(feature = "config"))]
fn load_book(path: &Path) -> Result<MoveBook> {
    anyhow::bail!(
        "Cannot load {}: movewatch was built without the `config` feature",
        path.display()
    )
}

/// The book in the user config directory, if one exists.
#[cfg(feature = "config")]
fn user_book() -> Result<Option<MoveBook>> {
    match MoveBook::default_path() {
        Some(path) if path.is_file() => load_book(&path).map(Some),
        _ => Ok(None),
    }
}

#[cfg(not(feature = "config"))]
fn user_book() -> Result<Option<MoveBook>> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_constant() {
        // Ensure version is accessible
        assert!(!movewatch::VERSION.is_empty());
    }
}
