//! Background engine round-trips.
//!
//! A frame loop must never block on the engine's think time, so the blocking
//! [`EngineClient`] lives on its own thread. Requests and replies travel over
//! single-slot channels and the owner polls for the reply once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{
    self,
    error::{TryRecvError, TrySendError},
    Receiver, Sender,
};
use tracing::{debug, warn};

use crate::client::EngineClient;
use crate::error::EngineError;

type Reply = Result<String, EngineError>;

/// Owns an initialized [`EngineClient`] on a background thread.
pub struct EngineWorker {
    requests: Option<Sender<String>>,
    replies: Receiver<Reply>,
    pending: bool,
    interrupt: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<(), EngineError>>>,
}

impl EngineWorker {
    /// Move a ready client onto a worker thread.
    pub fn spawn(client: EngineClient) -> Result<Self, EngineError> {
        if !client.is_ready() {
            return Err(EngineError::NotRunning);
        }

        let interrupt = client.interrupt_handle();
        let (request_tx, request_rx) = mpsc::channel(1);
        let (reply_tx, reply_rx) = mpsc::channel(1);
        let handle = thread::Builder::new()
            .name("engine-worker".into())
            .spawn(move || serve(client, request_rx, reply_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            replies: reply_rx,
            pending: false,
            interrupt,
            handle: Some(handle),
        })
    }

    /// Queue a move for the engine. Rejected while a reply is outstanding.
    pub fn submit(&mut self, mv: &str) -> Result<(), EngineError> {
        if self.pending {
            return Err(EngineError::Busy);
        }
        let requests = self.requests.as_ref().ok_or(EngineError::NotRunning)?;
        requests.try_send(mv.to_string()).map_err(|err| match err {
            TrySendError::Full(_) => EngineError::Busy,
            TrySendError::Closed(_) => EngineError::Faulted,
        })?;
        self.pending = true;
        Ok(())
    }

    /// Non-blocking check for the engine's answer.
    pub fn try_reply(&mut self) -> Option<Reply> {
        if !self.pending {
            return None;
        }
        match self.replies.try_recv() {
            Ok(reply) => {
                self.pending = false;
                Some(reply)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = false;
                Some(Err(EngineError::Faulted))
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending
    }

    /// Close the request channel and wait for the worker to shut the engine down.
    ///
    /// An outstanding search is stopped first, so this blocks for at most the
    /// engine's stop grace and shutdown budgets.
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        if self.pending {
            debug!("stopping outstanding search");
        }
        self.interrupt.store(true, Ordering::Release);
        self.requests = None;
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| EngineError::Faulted)?
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(%err, "engine worker shutdown failed");
        }
    }
}

fn serve(
    mut client: EngineClient,
    mut requests: Receiver<String>,
    replies: Sender<Reply>,
) -> Result<(), EngineError> {
    while let Some(mv) = requests.blocking_recv() {
        let reply = client.request_move(&mv);
        if let Err(err) = &reply {
            warn!(%err, %mv, "engine request failed");
        }
        if replies.blocking_send(reply).is_err() {
            break;
        }
    }
    debug!("engine worker stopping");
    client.shutdown()
}
