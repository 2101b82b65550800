// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation session state machine for the savlink support client.
//!
//! Owns the append-only message log, the pending-ticket confirmation slot,
//! the attachment lifecycle and the timed reset-on-close sequence. Callers
//! (REPL, voice pipeline) drive it through [`ConversationSession`] and act
//! on the returned [`Turn`] outcomes.

pub mod attachments;
pub mod intent;
pub mod reset;
pub mod session;
pub mod state;

pub use attachments::{AttachmentManager, FileCandidate, Rejection, RejectionReason};
pub use intent::{Intent, IntentClassifier};
pub use reset::{schedule_reset, ResetHandle};
pub use session::{ConversationSession, SpeakRequest, Turn};
pub use state::ConversationState;
