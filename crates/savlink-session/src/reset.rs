// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The timed session-reset sequence.
//!
//! After a closing response: wait, clear the log and delete the server-side
//! session, wait again, then show a fresh welcome message. The whole
//! sequence is one cancellable task; cancellation aborts the pending
//! continuation at either wait point. The session keeps its id across the
//! reset.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::session::ConversationSession;

/// Handle to a scheduled reset. Dropping it cancels the sequence.
pub struct ResetHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ResetHandle {
    /// Aborts whatever part of the sequence has not run yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Waits for the sequence to finish (or to notice cancellation).
    pub async fn finished(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ResetHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Schedules the reset sequence for a session that entered `Closing`.
///
/// Delays come from the session's chat config. The server-side delete is
/// best-effort: a failure is logged and the reset continues.
pub fn schedule_reset(session: Arc<Mutex<ConversationSession>>) -> ResetHandle {
    let token = CancellationToken::new();
    let guard = token.clone();

    let task = tokio::spawn(async move {
        let (close_delay, reset_delay) = {
            let s = session.lock().await;
            (s.close_delay(), s.reset_delay())
        };

        tokio::select! {
            _ = guard.cancelled() => {
                debug!("reset cancelled before clear");
                return;
            }
            _ = tokio::time::sleep(close_delay) => {}
        }

        let (api, session_id) = {
            let mut s = session.lock().await;
            s.reset_clear();
            (s.api(), s.session_id().clone())
        };
        if let Err(e) = api.delete_session(&session_id).await {
            warn!(error = %e, session_id = %session_id, "session delete failed");
        }

        tokio::select! {
            _ = guard.cancelled() => {
                debug!("reset cancelled before welcome");
                return;
            }
            _ = tokio::time::sleep(reset_delay) => {}
        }

        session.lock().await.reset_welcome();
        debug!(session_id = %session_id, "session reset complete");
    });

    ResetHandle {
        token,
        task: Some(task),
    }
}
