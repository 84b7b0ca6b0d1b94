//! Fixed-rate frame loop driving the console session.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info};

use crate::dispatcher::{EngineLink, Flow, GameContext};
use crate::scene::Scene;

/// Paces ticks at a fixed rate and measures the time between them.
pub struct FrameLoop {
    period: Duration,
    last: Instant,
    deadline: Instant,
}

impl FrameLoop {
    pub fn new(fps: u32) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        let now = Instant::now();
        Self {
            period,
            last: now,
            deadline: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next frame is due; returns seconds since the last one.
    pub fn wait(&mut self) -> f32 {
        let now = Instant::now();
        if let Some(remaining) = self.deadline.checked_duration_since(now) {
            thread::sleep(remaining);
        }
        let now = Instant::now();
        // A late frame starts a new schedule instead of bursting to catch up.
        self.deadline = (self.deadline + self.period).max(now);
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

/// Run the session until `quit`, or until input ends and the board has
/// settled.
pub fn run<E, S, W>(
    ctx: &mut GameContext<E, S>,
    lines: &mut UnboundedReceiver<String>,
    frames: &mut FrameLoop,
    out: &mut W,
) -> io::Result<()>
where
    E: EngineLink,
    S: Scene,
    W: Write,
{
    let mut input_open = true;
    loop {
        let delta = frames.wait();
        ctx.tick(delta, out)?;

        if input_open {
            match lines.try_recv() {
                Ok(line) => {
                    if ctx.dispatch(&line, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    debug!("input closed, finishing pending work");
                    input_open = false;
                }
            }
        }
        out.flush()?;

        if !input_open && ctx.is_idle() {
            break;
        }
    }
    info!("session finished");
    out.flush()
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod frame_tests;
