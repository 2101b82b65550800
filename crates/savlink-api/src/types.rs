// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the savlink backend API.

use savlink_core::{Attachment, AttachmentKind, Ticket, TicketDraft};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    /// URLs of already-uploaded photos accompanying the message.
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Response of `POST /api/chat`.
///
/// Everything beyond `response` is optional; absent flags read as false so
/// older backends keep working.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub conversation_type: Option<String>,
    #[serde(default)]
    pub should_close_session: bool,
    #[serde(default)]
    pub requires_validation: bool,
    #[serde(default)]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub ticket_data: Option<TicketDraft>,
}

/// Body of `POST /api/chat/create-ticket`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTicketRequest {
    pub customer_name: String,
    pub problem_description: String,
    pub product: String,
    pub order_number: String,
    /// All messages rendered `"{Role}: {content}"`, newline-joined.
    pub conversation_transcript: String,
    pub session_id: String,
}

/// Response of `POST /api/chat/create-ticket`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket_id: String,
}

/// One file to send to `POST /api/upload`.
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One descriptor returned by the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub original_name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub size: u64,
}

impl From<UploadedFile> for Attachment {
    fn from(f: UploadedFile) -> Self {
        Attachment {
            kind: f.kind,
            url: f.url,
            original_name: f.original_name,
        }
    }
}

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub files: Vec<UploadedFile>,
}

/// Response of `GET /api/sav/tickets`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketListResponse {
    pub success: bool,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/sav/ticket/{id}/dossier`.
///
/// The dossier itself stays schemaless: it is rendered or saved as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct DossierResponse {
    pub success: bool,
    #[serde(default)]
    pub dossier: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /api/voice/transcribe`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_flags_default_to_false() {
        let r: ChatResponse = serde_json::from_str(r#"{"response":"Bonjour !"}"#).unwrap();
        assert_eq!(r.response, "Bonjour !");
        assert!(!r.should_close_session);
        assert!(!r.requires_validation);
        assert!(r.ticket_id.is_none());
        assert!(r.ticket_data.is_none());
    }

    #[test]
    fn chat_response_parses_ticket_data() {
        let r: ChatResponse = serde_json::from_str(
            r#"{
                "response": "Je récapitule...",
                "requires_validation": true,
                "ticket_data": {
                    "customer_name": "Marie Dupont",
                    "problem_description": "pied cassé",
                    "product": "canapé OSLO",
                    "order_number": "CMD-2024-12345"
                }
            }"#,
        )
        .unwrap();
        assert!(r.requires_validation);
        let data = r.ticket_data.unwrap();
        assert_eq!(data.customer_name, "Marie Dupont");
        assert_eq!(data.order_number, "CMD-2024-12345");
    }

    #[test]
    fn chat_request_omits_absent_language() {
        let req = ChatRequest {
            message: "bonjour".into(),
            session_id: "s1".into(),
            photos: vec![],
            language: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("language"));
        assert!(json.contains("\"photos\":[]"));
    }

    #[test]
    fn uploaded_file_converts_to_attachment() {
        let f: UploadedFile = serde_json::from_str(
            r#"{"original_name":"a.png","url":"/uploads/a.png","type":"png","size":1024}"#,
        )
        .unwrap();
        let a: Attachment = f.into();
        assert_eq!(a.kind, AttachmentKind::Png);
        assert_eq!(a.url, "/uploads/a.png");
    }
}
