// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the conversation flows the client promises.
//!
//! Each test builds a real session against a wiremock backend. Tests are
//! independent and order-insensitive.

use std::sync::Arc;

use savlink_api::ApiClient;
use savlink_config::{ApiConfig, ChatConfig, UploadConfig};
use savlink_core::{PendingTicket, Role};
use savlink_i18n::Catalog;
use savlink_session::{ConversationSession, FileCandidate, RejectionReason, Turn};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> ConversationSession {
    let api = ApiClient::new(&ApiConfig {
        base_url: Some(server.uri()),
        timeout_secs: 5,
    })
    .unwrap();
    ConversationSession::new(
        Arc::new(api),
        Arc::new(Catalog::new().unwrap()),
        ChatConfig::default(),
        UploadConfig::default(),
    )
}

// ---- Scenario A: plain message exchange ----

#[tokio::test]
async fn plain_message_appends_one_user_and_one_assistant_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Je suis désolé pour votre canapé. Pouvez-vous me donner votre numéro de commande ?"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let before = session.messages().len();
    assert_eq!(before, 1, "log starts with the welcome message");

    let turn = session.submit("Bonjour, mon canapé est cassé").await;
    assert!(matches!(turn, Turn::Replied { .. }));

    let messages = session.messages();
    assert_eq!(messages.len(), before + 2);
    assert_eq!(messages[before].role, Role::User);
    assert_eq!(messages[before].content, "Bonjour, mon canapé est cassé");
    assert_eq!(messages[before + 1].role, Role::Assistant);
    assert!(session.pending_attachments().is_empty());
}

// ---- Scenario B: oversized upload is rejected client-side ----

#[tokio::test]
async fn oversized_file_is_rejected_without_any_upload_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let rejections = session
        .upload_files(vec![FileCandidate {
            file_name: "salon.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0u8; 15 * 1024 * 1024],
        }])
        .await
        .unwrap();

    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0].file_name, "salon.jpg");
    assert_eq!(rejections[0].reason, RejectionReason::TooLarge);
    assert!(session.pending_attachments().is_empty());
}

// ---- Scenario C: ticket validation round ----

async fn mount_recap_with_ticket_id(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Je récapitule votre demande : Marie Dupont, canapé OSLO, pied cassé.",
            "requires_validation": true,
            "ticket_id": "TCK-2024-001"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn recap_enters_validation_and_confirm_resolves_locally() {
    let server = MockServer::start().await;
    mount_recap_with_ticket_id(&server).await;
    // Confirming an already-created ticket must not touch the network.
    Mock::given(method("POST"))
        .and(path("/api/chat/create-ticket"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let turn = session.submit("mon canapé a un pied cassé").await;
    assert_eq!(turn, Turn::ValidationRequested);
    assert!(matches!(
        session.pending_ticket(),
        Some(PendingTicket::Created { ticket_id }) if ticket_id == "TCK-2024-001"
    ));

    let turn = session.confirm_ticket().await;
    assert!(matches!(turn, Turn::Replied { .. }));
    assert!(session.pending_ticket().is_none());
    let last = session.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.contains("confirmé"));
}

#[tokio::test]
async fn recap_then_cancel_appends_the_restart_message() {
    let server = MockServer::start().await;
    mount_recap_with_ticket_id(&server).await;

    let mut session = session_for(&server);
    session.submit("mon canapé a un pied cassé").await;
    assert!(session.pending_ticket().is_some());

    let turn = session.cancel_ticket();
    assert!(matches!(turn, Turn::Replied { .. }));
    assert!(session.pending_ticket().is_none());
    let last = session.messages().last().unwrap();
    assert!(last.content.contains("reprenons"));
}
