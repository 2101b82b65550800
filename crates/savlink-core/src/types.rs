// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the savlink workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
///
/// Generated once at conversation start, sent with every chat call, and
/// deleted server-side when the session closes. Only a full reset replaces
/// it with a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a cryptographically random session identifier.
    pub fn generate() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a message in the conversation log.
///
/// `Display` renders the transcript labels used when a conversation is
/// attached to a ticket (`Client` / `Assistant`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "Client"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// File category of an uploaded attachment, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Jpg,
    Jpeg,
    Png,
    Video,
}

impl AttachmentKind {
    /// True for kinds rendered as inline images (everything but video).
    pub fn is_image(&self) -> bool {
        !matches!(self, AttachmentKind::Video)
    }
}

/// Descriptor for a file already uploaded to backend storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub original_name: String,
}

/// One entry in the conversation log.
///
/// Messages are immutable after creation. The log is append-only; the only
/// deletion is the full clear performed by the session reset sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Attachments included with a user message; empty otherwise.
    #[serde(default)]
    pub files: Vec<Attachment>,
    pub timestamp: DateTime<Utc>,
    /// Language tag echoed by the backend for non-default-language replies.
    #[serde(default)]
    pub language: Option<String>,
    /// Set on an assistant message that asks the user to confirm a ticket.
    #[serde(default)]
    pub requires_validation: bool,
    #[serde(default)]
    pub ticket_id: Option<String>,
}

impl Message {
    /// Creates a user message, optionally carrying attachments.
    pub fn user(content: impl Into<String>, files: Vec<Attachment>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            files,
            timestamp: Utc::now(),
            language: None,
            requires_validation: false,
            ticket_id: None,
        }
    }

    /// Creates a plain assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
            files: Vec::new(),
            timestamp: Utc::now(),
            language: None,
            requires_validation: false,
            ticket_id: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

/// Draft ticket fields collected during a conversation, awaiting explicit
/// user confirmation before creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub customer_name: String,
    pub problem_description: String,
    pub product: String,
    pub order_number: String,
}

/// The single pending-ticket slot of a conversation.
///
/// At most one exists at a time; its presence gates the validation UI state
/// and suppresses speech autoplay of the triggering message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTicket {
    /// The backend already created the ticket; confirmation is an
    /// acknowledgement, not a creation.
    Created { ticket_id: String },
    /// A draft awaiting creation through the ticket-creation endpoint.
    Draft(TicketDraft),
}

impl PendingTicket {
    /// The server-side ticket id, when one already exists.
    pub fn ticket_id(&self) -> Option<&str> {
        match self {
            PendingTicket::Created { ticket_id } => Some(ticket_id),
            PendingTicket::Draft(_) => None,
        }
    }
}

/// Ticket priority tiers assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

/// Processing status of a dashboard ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    EscalatedToHuman,
    AwaitingTechnician,
    AutoResolved,
    EvidenceCollection,
    Pending,
    /// Statuses this client does not know about yet; kept rather than
    /// rejected so new backend states do not break the dashboard.
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    /// The wire name, also used as the localization key suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::EscalatedToHuman => "escalated_to_human",
            TicketStatus::AwaitingTechnician => "awaiting_technician",
            TicketStatus::AutoResolved => "auto_resolved",
            TicketStatus::EvidenceCollection => "evidence_collection",
            TicketStatus::Pending => "pending",
            TicketStatus::Unknown => "unknown",
        }
    }
}

/// A support ticket as returned by the dashboard endpoints.
///
/// Read-only from the client's perspective: fetched and filtered, never
/// mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub customer_name: String,
    pub order_number: String,
    pub product_name: String,
    pub problem_description: String,
    pub priority: Priority,
    pub status: TicketStatus,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub auto_resolved: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique_and_random() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        // UUID v4 string form: 36 chars with hyphens.
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn role_transcript_labels() {
        assert_eq!(Role::User.to_string(), "Client");
        assert_eq!(Role::Assistant.to_string(), "Assistant");
    }

    #[test]
    fn attachment_kind_wire_tags() {
        let a: Attachment = serde_json::from_str(
            r#"{"type":"jpeg","url":"/uploads/a.jpg","original_name":"a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(a.kind, AttachmentKind::Jpeg);
        assert!(a.kind.is_image());

        let v: AttachmentKind = serde_json::from_str(r#""video""#).unwrap();
        assert!(!v.is_image());
    }

    #[test]
    fn pending_ticket_id_only_when_created() {
        let created = PendingTicket::Created {
            ticket_id: "TCK-1".into(),
        };
        assert_eq!(created.ticket_id(), Some("TCK-1"));

        let draft = PendingTicket::Draft(TicketDraft {
            customer_name: "Jean Dupont".into(),
            problem_description: "pied cassé".into(),
            product: "canapé OSLO".into(),
            order_number: "CMD-2024-12345".into(),
        });
        assert_eq!(draft.ticket_id(), None);
    }

    #[test]
    fn ticket_status_tolerates_unknown_values() {
        let s: TicketStatus = serde_json::from_str(r#""awaiting_parts""#).unwrap();
        assert_eq!(s, TicketStatus::Unknown);
        let s: TicketStatus = serde_json::from_str(r#""auto_resolved""#).unwrap();
        assert_eq!(s, TicketStatus::AutoResolved);
    }

    #[test]
    fn priority_round_trips_through_strings() {
        use std::str::FromStr;
        for p in [Priority::P0, Priority::P1, Priority::P2, Priority::P3] {
            assert_eq!(Priority::from_str(&p.to_string()).unwrap(), p);
        }
    }

    #[test]
    fn ticket_deserializes_with_optional_fields_absent() {
        let t: Ticket = serde_json::from_str(
            r#"{
                "ticket_id": "TCK-42",
                "customer_name": "Marie Leclerc",
                "order_number": "CMD-2024-777",
                "product_name": "fauteuil BERGEN",
                "problem_description": "accoudoir fendu",
                "priority": "P2",
                "status": "pending",
                "created_at": "2026-01-05T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(t.priority, Priority::P2);
        assert!(t.tone.is_none());
        assert!(!t.auto_resolved);
    }
}
