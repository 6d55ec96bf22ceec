//! Terminal host
//!
//! Reads frames and control commands from stdin, drives a [`Recognizer`] on a fixed tick
//! and prints every recognized move. The host plays the role of the upstream input
//! normalizer: it delivers at most one frame per player per tick, and only when the
//! player's input changed since the last delivered frame. Ticks without a new frame
//! still advance the clock so hold and expiry timers fire.

pub mod commands;
pub mod moves;
pub mod runtime;

pub use commands::HostCommand;
pub use moves::default_move_book;

use crate::config::MoveBook;
use crate::dispatch::{PlayerId, RecognizedMove, Recognizer};
use crate::error::{MovewatchError, Result};
use crate::input::InputFrame;
use crate::moves::{InvertMode, MoveId};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{self, BufReader, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;

/// Recognizer plus the per-player frame queues feeding it.
pub struct Session {
    recognizer: Recognizer,
    players: Vec<PlayerId>,
    pending: HashMap<PlayerId, VecDeque<InputFrame>>,
    delivered: HashMap<PlayerId, InputFrame>,
    recognized: Rc<RefCell<Vec<RecognizedMove>>>,
}

impl Session {
    /// Build a recognizer from `book` and give every player every move.
    ///
    /// Players in odd slots (the second, fourth, ...) start facing left, so their moves
    /// are mirrored on X.
    pub fn new(book: &MoveBook, players: &[PlayerId]) -> Result<Self> {
        let mut recognizer = book.build_recognizer()?;
        for (slot, player) in players.iter().enumerate() {
            let added = recognizer.add_all_moves(player.clone());
            if slot % 2 == 1 {
                recognizer.invert_all_moves(player.as_str(), InvertMode::X);
            }
            log::debug!("{} tracks {} move(s)", player, added);
        }
        Ok(Self::with_recognizer(recognizer, players))
    }

    /// Wrap an already populated recognizer.
    pub fn with_recognizer(mut recognizer: Recognizer, players: &[PlayerId]) -> Self {
        let recognized = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&recognized);
        recognizer.subscribe(move |_, _, batch| sink.borrow_mut().extend_from_slice(batch));

        Self {
            recognizer,
            players: players.to_vec(),
            pending: players
                .iter()
                .map(|player| (player.clone(), VecDeque::new()))
                .collect(),
            delivered: HashMap::new(),
            recognized,
        }
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// No frames are waiting for delivery.
    pub fn is_idle(&self) -> bool {
        self.pending.values().all(VecDeque::is_empty)
    }

    pub fn queue_frame(&mut self, player: &str, frame: InputFrame) -> Result<()> {
        self.pending
            .get_mut(player)
            .ok_or_else(|| unknown_player(player))?
            .push_back(frame);
        Ok(())
    }

    /// Apply one host command. Returns false when the host should stop.
    pub fn apply(&mut self, command: HostCommand) -> Result<bool> {
        match command {
            HostCommand::Frame { player, frame } => self.queue_frame(player.as_str(), frame)?,
            HostCommand::Flip {
                player,
                mode,
                move_id,
            } => {
                self.require_player(&player)?;
                match move_id {
                    Some(move_id) => {
                        if !self.recognizer.invert_move(player.as_str(), move_id.as_str(), mode) {
                            return Err(unknown_move(&move_id));
                        }
                    }
                    None => self.recognizer.invert_all_moves(player.as_str(), mode),
                }
                log::info!("{} flipped ({})", player, mode);
            }
            HostCommand::Reset { player, move_id } => {
                self.require_player(&player)?;
                match move_id {
                    Some(move_id) => {
                        if !self.recognizer.reset_move(player.as_str(), move_id.as_str()) {
                            return Err(unknown_move(&move_id));
                        }
                    }
                    None => self.recognizer.reset_all_moves(player.as_str()),
                }
            }
            HostCommand::Enable {
                player,
                move_id,
                enabled,
            } => {
                self.require_player(&player)?;
                match move_id {
                    Some(move_id) => {
                        if !self
                            .recognizer
                            .enable_move(player.as_str(), move_id.as_str(), enabled)
                        {
                            return Err(unknown_move(&move_id));
                        }
                    }
                    None => self.recognizer.enable_all_moves(player.as_str(), enabled),
                }
            }
            HostCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Deliver at most one changed frame per player, then fire due timers.
    ///
    /// Returns the moves recognized on this tick; their watchers are reset so the next
    /// attempt starts from a clean buffer.
    pub fn tick(&mut self, now: Instant) -> Vec<RecognizedMove> {
        for player in &self.players {
            let Some(frame) = self.pending.get_mut(player).and_then(VecDeque::pop_front) else {
                continue;
            };
            if self.delivered.get(player) == Some(&frame) {
                continue;
            }
            self.recognizer.process_frame(player.as_str(), &frame, now);
            self.delivered.insert(player.clone(), frame);
        }
        self.recognizer.advance(now);

        let events: Vec<RecognizedMove> = self.recognized.borrow_mut().drain(..).collect();
        for event in &events {
            self.recognizer
                .reset_move(event.watcher.player.as_str(), event.watcher.move_id.as_str());
        }
        events
    }

    fn require_player(&self, player: &PlayerId) -> Result<()> {
        if self.pending.contains_key(player) {
            Ok(())
        } else {
            Err(unknown_player(player.as_str()))
        }
    }
}

fn unknown_player(player: &str) -> MovewatchError {
    MovewatchError::invalid_command(format!("unknown player '{player}'"))
}

fn unknown_move(move_id: &MoveId) -> MovewatchError {
    MovewatchError::UnknownMove {
        move_id: move_id.to_string(),
    }
}

/// Tick loop tying stdin, the session and the output together.
pub struct Application<W: Write = io::Stdout> {
    session: Session,
    tick: Duration,
    out: W,
}

impl Application<io::Stdout> {
    pub fn new(session: Session, tick: Duration) -> Self {
        Self::with_output(session, tick, io::stdout())
    }

    /// Run until `!quit`, end of input or Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let _reader =
            runtime::spawn_line_reader(BufReader::new(io::stdin()), tx, Arc::clone(&shutdown));

        let result = self.drive(rx).await;
        shutdown.store(true, Ordering::SeqCst);
        result
    }
}

impl<W: Write> Application<W> {
    pub fn with_output(session: Session, tick: Duration, out: W) -> Self {
        Self { session, tick, out }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Process host lines from `lines` on every tick until told to stop.
    ///
    /// Once the line source closes, the loop keeps ticking until every queued frame
    /// has been delivered.
    pub async fn drive(&mut self, mut lines: UnboundedReceiver<String>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        log::info!(
            "Watching {} player(s) every {:?}",
            self.session.players().len(),
            self.tick
        );

        let mut input_open = true;
        loop {
            tokio::select! {
                instant = ticker.tick() => {
                    for event in self.session.tick(instant.into_std()) {
                        writeln!(
                            self.out,
                            "{}: {} ({})",
                            event.player, event.move_id, event.button_combo
                        )?;
                    }
                    self.out.flush()?;

                    if !input_open && self.session.is_idle() {
                        break;
                    }
                }
                line = lines.recv(), if input_open => match line {
                    Some(line) => {
                        let applied = line
                            .parse::<HostCommand>()
                            .and_then(|command| self.session.apply(command));
                        match applied {
                            Ok(true) => {}
                            Ok(false) => break,
                            Err(err) => log::warn!("Ignoring '{}': {}", line.trim(), err),
                        }
                    }
                    None => {
                        log::debug!("Input closed");
                        input_open = false;
                    }
                },
                _ = &mut ctrl_c => {
                    log::info!("Interrupted");
                    break;
                }
            }
        }

        log::info!("Session finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    const TICK: Duration = Duration::from_millis(16);

    fn players() -> Vec<PlayerId> {
        vec![PlayerId::from("p1"), PlayerId::from("p2")]
    }

    fn session() -> Session {
        Session::new(&default_move_book(), &players()).unwrap()
    }

    fn send(session: &mut Session, line: &str) {
        assert!(session.apply(line.parse().unwrap()).unwrap());
    }

    /// Tick once per queued frame and collect `player:move` for every recognition.
    fn run_ticks(session: &mut Session, start: Instant, ticks: u32) -> Vec<String> {
        (0..ticks)
            .flat_map(|tick| session.tick(start + TICK * tick))
            .map(|event| format!("{}:{}", event.player, event.move_id))
            .collect()
    }

    #[test]
    fn second_player_starts_mirrored() {
        let session = session();
        let recognizer = session.recognizer();
        assert_eq!(
            recognizer.watcher("p1", "hadouken").unwrap().dpad(),
            recognizer.template("hadouken").unwrap().dpad()
        );
        assert_eq!(
            recognizer.watcher("p2", "hadouken").unwrap().dpad(),
            &[Direction::Down, Direction::DownLeft, Direction::Left]
        );
    }

    #[test]
    fn delivers_one_frame_per_player_per_tick() {
        let mut session = session();
        for line in ["p1: Down", "p1: DownRight", "p1: Right", "p1: Right ButtonA"] {
            send(&mut session, line);
        }
        for line in ["p2: Down", "p2: DownLeft", "p2: Left", "p2: Left ButtonB"] {
            send(&mut session, line);
        }

        let start = Instant::now();
        assert!(run_ticks(&mut session, start, 3).is_empty());
        assert!(!session.is_idle());

        let hits = run_ticks(&mut session, start + TICK * 3, 1);
        assert_eq!(hits, vec!["p1:hadouken", "p2:hadouken"]);
        assert!(session.is_idle());

        // The host resets what it reported.
        let watcher = session.recognizer().watcher("p1", "hadouken").unwrap();
        assert!(!watcher.is_running());
        assert!(watcher.buffered_directions().is_empty());
    }

    #[test]
    fn unchanged_frames_are_not_redelivered() {
        let mut session = session();
        let start = Instant::now();

        // A held direction is delivered once, so the charge timer is not restarted.
        for _ in 0..40 {
            send(&mut session, "p1: Left");
        }
        run_ticks(&mut session, start, 40);
        assert!(session.recognizer().watcher("p1", "sonic_boom").unwrap().is_charged());

        send(&mut session, "p1: Right ButtonA");
        let hits = run_ticks(&mut session, start + TICK * 40, 1);
        assert_eq!(hits, vec!["p1:sonic_boom"]);
    }

    #[test]
    fn control_commands_reach_the_recognizer() {
        let mut session = session();

        send(&mut session, "!disable p1 hadouken");
        assert!(!session.recognizer().is_move_enabled("p1", "hadouken"));
        send(&mut session, "!enable p1");
        assert!(session.recognizer().is_move_enabled("p1", "hadouken"));

        send(&mut session, "!flip p2 hadouken");
        assert_eq!(
            session.recognizer().watcher("p2", "hadouken").unwrap().dpad(),
            session.recognizer().template("hadouken").unwrap().dpad()
        );

        send(&mut session, "p1: Down");
        session.tick(Instant::now());
        send(&mut session, "!reset p1");
        assert!(session
            .recognizer()
            .watcher("p1", "hadouken")
            .unwrap()
            .buffered_directions()
            .is_empty());

        assert!(!session.apply(HostCommand::Quit).unwrap());
    }

    #[test]
    fn rejects_unknown_players_and_moves() {
        let mut session = session();
        assert!(matches!(
            session.apply("p3: Down".parse().unwrap()),
            Err(MovewatchError::InvalidCommand { .. })
        ));
        assert!(matches!(
            session.apply("!reset p1 shoryureppa".parse().unwrap()),
            Err(MovewatchError::UnknownMove { .. })
        ));
        assert!(session.recognizer().watcher("p1", "shoryureppa").is_none());
        assert!(!session.players().contains(&PlayerId::from("p3")));
    }

    #[tokio::test]
    async fn drive_prints_recognized_moves_until_input_drains() {
        let session = session();
        let mut app = Application::with_output(session, Duration::from_millis(2), Vec::new());

        let (tx, rx) = mpsc::unbounded_channel();
        for line in [
            "p1: Down",
            "p1: DownRight",
            "bogus line",
            "p1: Right",
            "p1: Right ButtonA",
            "p1:",
        ] {
            tx.send(line.to_string()).unwrap();
        }
        drop(tx);

        app.drive(rx).await.unwrap();

        assert!(app.session().is_idle());
        let output = String::from_utf8(app.into_output()).unwrap();
        assert_eq!(output, "p1: hadouken (ButtonA)\n");
    }

    #[tokio::test]
    async fn drive_stops_on_quit() {
        let mut app = Application::with_output(session(), Duration::from_millis(2), Vec::new());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send("!quit".to_string()).unwrap();
        tx.send("p1: Down".to_string()).unwrap();

        app.drive(rx).await.unwrap();

        assert!(app.session().is_idle());
        assert!(app.into_output().is_empty());
    }
}
