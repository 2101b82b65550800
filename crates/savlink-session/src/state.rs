// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! States of the conversation session FSM.

use savlink_core::PendingTicket;

/// States in the conversation FSM.
///
/// The pending ticket lives inside `AwaitingValidation`, so at most one can
/// exist at a time and confirm/cancel outside that state have nothing to
/// act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    /// Ready for user input.
    Idle,
    /// A chat request is in flight.
    AwaitingResponse,
    /// A ticket recap awaits explicit confirm or cancel. Ordinary text
    /// exchange stays possible and does not discard the pending ticket.
    AwaitingValidation(PendingTicket),
    /// A farewell was received; the timed reset sequence owns what happens
    /// next.
    Closing,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "idle"),
            ConversationState::AwaitingResponse => write!(f, "awaiting_response"),
            ConversationState::AwaitingValidation(_) => write!(f, "awaiting_validation"),
            ConversationState::Closing => write!(f, "closing"),
        }
    }
}
