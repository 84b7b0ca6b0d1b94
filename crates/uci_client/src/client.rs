//! Engine process session: spawn, handshake, move requests, shutdown.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::protocol::*;

/// Lifecycle of one engine conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Handshaking,
    Ready,
    /// `position` + `go` sent, `bestmove` not consumed yet
    AwaitingMove,
    /// The engine died or hung; only shutdown is left
    Faulted,
    Terminated,
}

/// Handles that exist only while the child process is alive.
struct Pipes {
    child: Child,
    stdin: Option<ChildStdin>,
    lines: UnboundedReceiver<String>,
}

enum Wait {
    Found(String),
    Closed,
    Exhausted,
}

/// Blocking client for one engine subprocess.
///
/// The engine's stdout is read by a helper thread that forwards complete
/// lines; every wait here polls those lines with a bounded attempt budget,
/// so a stalled engine produces an error instead of a hang.
pub struct EngineClient {
    config: EngineConfig,
    state: SessionState,
    pipes: Option<Pipes>,
    /// Moves submitted by the caller, in order. Engine replies are not
    /// recorded unless the caller plays them.
    history: Vec<String>,
    /// Once set, searches send `stop` instead of waiting out their budget
    interrupt: Arc<AtomicBool>,
}

impl EngineClient {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: SessionState::Uninitialized,
            pipes: None,
            history: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Flag another thread can set to cut the current and every later search
    /// short. The client then sends `stop` and waits only the grace budget.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Spawn the engine and run the `uci` / `isready` handshake.
    ///
    /// Only returns `Ok` once both `uciok` and `readyok` were observed. On
    /// failure the child is killed and reaped and the client is `Terminated`.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Uninitialized {
            return Err(EngineError::AlreadyStarted);
        }
        self.state = SessionState::Handshaking;

        match spawn_engine(&self.config) {
            Ok(pipes) => self.pipes = Some(pipes),
            Err(err) => {
                self.state = SessionState::Terminated;
                return Err(err);
            }
        }

        if let Err(err) = self.handshake() {
            warn!(%err, "engine handshake failed");
            self.teardown();
            return Err(err);
        }

        self.state = SessionState::Ready;
        info!(path = %self.config.path.display(), "engine ready");
        Ok(())
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        self.send(UCI)?;
        self.expect(UCI_OK)?;
        self.send(IS_READY)?;
        self.expect(READY_OK)
    }

    fn expect(&mut self, token: &'static str) -> Result<(), EngineError> {
        match self.wait_for(token, self.config.handshake_attempts, false) {
            Wait::Found(_) => Ok(()),
            Wait::Closed => Err(EngineError::HandshakeFailure { expected: token }),
            Wait::Exhausted => Err(EngineError::HandshakeTimeout { expected: token }),
        }
    }

    /// Send `position startpos moves ...` followed by `go`.
    pub fn submit_move(&mut self, mv: &str) -> Result<(), EngineError> {
        self.require_ready()?;
        if !is_move_text(mv) {
            return Err(EngineError::InvalidMove(mv.to_string()));
        }

        self.history.push(mv.to_string());
        let position = position_command(&self.history);
        let go = self.config.search.go_command();
        if let Err(err) = self.send(&position).and_then(|()| self.send(&go)) {
            self.history.pop();
            self.fault();
            return Err(err);
        }

        self.state = SessionState::AwaitingMove;
        Ok(())
    }

    /// Wait for the `bestmove` answering the last [`submit_move`](Self::submit_move).
    ///
    /// When the search budget runs out the client sends `stop` and allows a
    /// short grace period before giving up on the session.
    pub fn read_best_move(&mut self) -> Result<String, EngineError> {
        match self.state {
            SessionState::AwaitingMove => {}
            SessionState::Ready => return Err(EngineError::NoSearchPending),
            SessionState::Faulted => return Err(EngineError::Faulted),
            _ => return Err(EngineError::NotRunning),
        }

        let line = match self.wait_for(BEST_MOVE, self.config.search_attempts, true) {
            Wait::Found(line) => line,
            Wait::Closed => return Err(self.lost_engine()),
            Wait::Exhausted => self.stop_search()?,
        };
        self.state = SessionState::Ready;

        let mv = parse_bestmove(&line)
            .ok_or_else(|| EngineError::MalformedBestMove(line.clone()))?
            .to_string();
        // Not recorded: the reply joins the history only if the caller plays it.
        debug!(%mv, "engine best move");
        Ok(mv)
    }

    fn stop_search(&mut self) -> Result<String, EngineError> {
        if self.interrupt.load(Ordering::Acquire) {
            info!("engine search interrupted, sending stop");
        } else {
            warn!(
                attempts = self.config.search_attempts,
                "engine search exceeded its budget, sending stop"
            );
        }
        if self.send(STOP).is_err() {
            return Err(self.lost_engine());
        }
        match self.wait_for(BEST_MOVE, self.config.stop_grace_attempts, false) {
            Wait::Found(line) => Ok(line),
            Wait::Closed => Err(self.lost_engine()),
            Wait::Exhausted => {
                self.fault();
                Err(EngineError::SearchTimeout {
                    attempts: self.config.search_attempts + self.config.stop_grace_attempts,
                })
            }
        }
    }

    /// Submit a move and block until the engine answers.
    pub fn request_move(&mut self, mv: &str) -> Result<String, EngineError> {
        self.submit_move(mv)?;
        self.read_best_move()
    }

    /// Start a fresh game: `ucinewgame`, then wait for `readyok`.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.require_ready()?;
        if let Err(err) = self.send(UCI_NEW_GAME).and_then(|()| self.send(IS_READY)) {
            self.fault();
            return Err(err);
        }
        if let Err(err) = self.expect(READY_OK) {
            self.fault();
            return Err(err);
        }
        self.history.clear();
        Ok(())
    }

    /// Send `quit`, close the pipes and reap the process.
    ///
    /// The process is waited on exactly once; later calls are no-ops. An engine
    /// that ignores `quit` is killed once the shutdown budget is spent.
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        let Some(mut pipes) = self.pipes.take() else {
            return Ok(());
        };
        self.state = SessionState::Terminated;

        if let Some(mut stdin) = pipes.stdin.take() {
            if let Err(err) = writeln!(stdin, "{QUIT}").and_then(|()| stdin.flush()) {
                debug!(%err, "engine stdin already closed");
            }
        }
        drop(pipes.lines);

        let status = reap(
            &mut pipes.child,
            self.config.shutdown_attempts,
            self.config.poll_interval(),
        )?;
        info!(%status, "engine exited");
        Ok(())
    }

    fn require_ready(&self) -> Result<(), EngineError> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::AwaitingMove => Err(EngineError::Busy),
            SessionState::Faulted => Err(EngineError::Faulted),
            _ => Err(EngineError::NotRunning),
        }
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        let stdin = self
            .pipes
            .as_mut()
            .and_then(|p| p.stdin.as_mut())
            .ok_or(EngineError::NotRunning)?;
        debug!(command = line, "-> engine");
        writeln!(stdin, "{line}")?;
        stdin.flush()?;
        Ok(())
    }

    /// Poll forwarded lines until one contains `token`. An `interruptible`
    /// wait also ends early once the interrupt flag is set.
    fn wait_for(&mut self, token: &str, attempts: u32, interruptible: bool) -> Wait {
        let interval = self.config.poll_interval();
        let interrupt = Arc::clone(&self.interrupt);
        let Some(pipes) = self.pipes.as_mut() else {
            return Wait::Closed;
        };

        let mut attempt = 0;
        loop {
            loop {
                match pipes.lines.try_recv() {
                    Ok(line) => {
                        debug!(line = %line, "<- engine");
                        if line.contains(token) {
                            return Wait::Found(line);
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return Wait::Closed,
                }
            }
            if attempt >= attempts || (interruptible && interrupt.load(Ordering::Acquire)) {
                return Wait::Exhausted;
            }
            attempt += 1;
            thread::sleep(interval);
        }
    }

    fn lost_engine(&mut self) -> EngineError {
        self.fault();
        EngineError::NoMoveFound
    }

    fn fault(&mut self) {
        warn!("engine session faulted");
        self.state = SessionState::Faulted;
    }

    /// Kill without the `quit` courtesy; used when the handshake fails.
    fn teardown(&mut self) {
        if let Some(mut pipes) = self.pipes.take() {
            drop(pipes.stdin.take());
            if let Err(err) = pipes.child.kill() {
                debug!(%err, "engine already gone");
            }
            if let Err(err) = pipes.child.wait() {
                warn!(%err, "failed to reap engine process");
            }
        }
        self.state = SessionState::Terminated;
    }
}

impl Drop for EngineClient {
    fn drop(&mut self) {
        if self.pipes.is_some() {
            if let Err(err) = self.shutdown() {
                warn!(%err, "engine shutdown failed");
            }
        }
    }
}

fn spawn_engine(config: &EngineConfig) -> Result<Pipes, EngineError> {
    let spawn_error = |source: io::Error| EngineError::Spawn {
        path: config.path.display().to_string(),
        source,
    };

    let mut child = Command::new(&config.path)
        .args(&config.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(spawn_error)?;

    let stdin = child.stdin.take();
    let Some(stdout) = child.stdout.take() else {
        child.kill().ok();
        child.wait().ok();
        return Err(spawn_error(io::Error::other("engine stdout not captured")));
    };

    let (tx, lines) = mpsc::unbounded_channel();
    let reader = thread::Builder::new()
        .name("engine-stdout".into())
        .spawn(move || forward_lines(stdout, tx));
    if let Err(source) = reader {
        child.kill().ok();
        child.wait().ok();
        return Err(spawn_error(source));
    }

    info!(pid = child.id(), path = %config.path.display(), "engine process spawned");
    Ok(Pipes {
        child,
        stdin,
        lines,
    })
}

/// Reader thread body: split engine output into lines until EOF.
fn forward_lines(stdout: ChildStdout, tx: UnboundedSender<String>) {
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, stdout);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(line.trim_end().to_string()).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!(%err, "failed to read engine output");
                break;
            }
        }
    }
    debug!("engine output closed");
}

fn reap(child: &mut Child, attempts: u32, interval: Duration) -> io::Result<ExitStatus> {
    for _ in 0..attempts {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        thread::sleep(interval);
    }
    warn!(pid = child.id(), "engine ignored quit, killing it");
    if let Err(err) = child.kill() {
        debug!(%err, "engine exited before kill");
    }
    child.wait()
}
