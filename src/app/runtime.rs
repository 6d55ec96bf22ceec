use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Spawn a blocking thread that reads host lines and forwards them onto a channel.
///
/// The thread stops at end of input, on a read error, when the receiver is gone, or
/// after `shutdown` is set (checked between lines).
pub fn spawn_line_reader<R>(
    reader: R,
    tx: UnboundedSender<String>,
    shutdown: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            match line {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Input thread error: {}", err);
                    break;
                }
            }
        }
        log::debug!("Line reader finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn forwards_non_blank_lines_until_eof() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let input = Cursor::new("p1: Down\n\n   \np1: Right ButtonA\n!quit\n");
        let handle = spawn_line_reader(input, tx, Arc::new(AtomicBool::new(false)));

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            lines.push(line);
        }
        handle.join().unwrap();

        assert_eq!(lines, vec!["p1: Down", "p1: Right ButtonA", "!quit"]);
    }

    #[tokio::test]
    async fn stops_when_shutdown_is_set() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(true));
        let handle = spawn_line_reader(Cursor::new("p1: Down\n"), tx, shutdown);

        assert_eq!(rx.recv().await, None);
        handle.join().unwrap();
    }
}
