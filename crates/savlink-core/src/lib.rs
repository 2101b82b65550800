// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the savlink support client.
//!
//! Provides the shared data model (messages, attachments, tickets, session
//! identifiers) and the error taxonomy used throughout the workspace.

pub mod error;
pub mod types;

pub use error::SavlinkError;
pub use types::{
    Attachment, AttachmentKind, Message, PendingTicket, Priority, Role, SessionId, Ticket,
    TicketDraft, TicketStatus,
};
