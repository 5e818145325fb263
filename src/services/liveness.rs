use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::modules::auth::crud::SessionStore;
use crate::services::session_guard::{SessionGuard, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
}

/// Periodic token re-check owned by a view. Dropping it stops the timer.
pub struct LivenessWatcher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl LivenessWatcher {
    /// Starts the timer. The receiver yields [`SessionEvent::Expired`] at most
    /// once and closes when the watcher stops for any reason.
    pub fn spawn(
        guard: SessionGuard,
        sessions: Arc<dyn SessionStore>,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(watch(guard, sessions, interval, cancel.clone(), tx));

        (Self { cancel, handle }, rx)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for LivenessWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn watch(
    guard: SessionGuard,
    sessions: Arc<dyn SessionStore>,
    interval: Duration,
    cancel: CancellationToken,
    tx: mpsc::Sender<SessionEvent>,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("liveness watcher cancelled");
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let token = match sessions.load() {
            Ok(session) => session.token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read session: {}", e);
                continue;
            }
        };

        let Some(token) = token else {
            debug!("no token stored, liveness watcher stopping");
            return;
        };

        match guard.check(&token).await {
            SessionStatus::Valid => {}
            SessionStatus::Unknown => {
                warn!("token check inconclusive, keeping session");
            }
            SessionStatus::Invalid => {
                warn!("Token expired during session");
                if let Err(e) = sessions.invalidate() {
                    error!("Failed to invalidate session: {}", e);
                }
                let _ = tx.send(SessionEvent::Expired).await;
                return;
            }
        }
    }
}
