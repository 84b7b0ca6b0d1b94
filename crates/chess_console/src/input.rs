//! Operator input read off the frame thread.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

/// Forward lines from `reader` until EOF. The receiver reports
/// `Disconnected` once the input is exhausted.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<UnboundedReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(%err, "failed to read operator input");
                        break;
                    }
                }
            }
            debug!("operator input closed");
        })?;
    Ok(rx)
}

pub fn spawn_stdin_reader() -> io::Result<UnboundedReceiver<String>> {
    spawn_line_reader(io::BufReader::new(io::stdin()))
}
