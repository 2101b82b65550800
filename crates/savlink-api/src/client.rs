// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the savlink support backend.
//!
//! Provides [`ApiClient`] covering the chat, ticket, upload, dashboard and
//! voice endpoints. Chat and upload calls are made exactly once -- a failure
//! surfaces to the conversation as the localized error message and the user
//! retries by acting again.

use std::time::Duration;

use reqwest::multipart;
use savlink_config::ApiConfig;
use savlink_core::{SavlinkError, SessionId};
use tracing::{debug, warn};

use crate::types::{
    ChatRequest, ChatResponse, CreateTicketRequest, CreateTicketResponse, DossierResponse,
    TicketListResponse, TranscribeResponse, UploadPart, UploadResponse,
};

/// HTTP client for backend communication.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from the `[api]` config section.
    ///
    /// `base_url` must be set; `timeout_secs = 0` leaves requests without a
    /// client-side timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, SavlinkError> {
        let base_url = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SavlinkError::Config("api.base_url is not set".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().map_err(|e| SavlinkError::Api {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { client, base_url })
    }

    /// The configured backend origin, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one conversation turn: `POST /api/chat`.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SavlinkError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("chat request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::parse_json(response, "chat").await
    }

    /// Deletes the server-side session: `DELETE /api/chat/{session_id}`.
    ///
    /// Best-effort: callers treat failure as non-fatal.
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<(), SavlinkError> {
        let url = format!("{}/api/chat/{}", self.base_url, session_id);
        let response =
            self.client
                .delete(&url)
                .send()
                .await
                .map_err(|e| SavlinkError::Api {
                    message: format!("session delete failed: {e}"),
                    source: Some(Box::new(e)),
                })?;
        let status = response.status();
        debug!(%status, session_id = %session_id, "session delete response");
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SavlinkError::api(format!(
                "API returned {status}: {body}"
            )))
        }
    }

    /// Creates a ticket from a confirmed draft: `POST /api/chat/create-ticket`.
    pub async fn create_ticket(
        &self,
        request: &CreateTicketRequest,
    ) -> Result<CreateTicketResponse, SavlinkError> {
        let url = format!("{}/api/chat/create-ticket", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("ticket creation failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::parse_json(response, "create-ticket").await
    }

    /// Uploads a batch of already-validated files: `POST /api/upload`.
    ///
    /// One multipart request per batch; validation happens per-file before
    /// this call.
    pub async fn upload(&self, parts: Vec<UploadPart>) -> Result<UploadResponse, SavlinkError> {
        let url = format!("{}/api/upload", self.base_url);
        let mut form = multipart::Form::new();
        for part in parts {
            let file = multipart::Part::bytes(part.bytes)
                .file_name(part.file_name.clone())
                .mime_str(&part.mime_type)
                .map_err(|e| SavlinkError::Api {
                    message: format!("invalid MIME type `{}`: {e}", part.mime_type),
                    source: Some(Box::new(e)),
                })?;
            form = form.part("files", file);
        }
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("upload failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::parse_json(response, "upload").await
    }

    /// Fetches all tickets for the dashboard: `GET /api/sav/tickets`.
    pub async fn tickets(&self) -> Result<TicketListResponse, SavlinkError> {
        let url = format!("{}/api/sav/tickets", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("ticket list request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::parse_json(response, "tickets").await
    }

    /// Fetches one ticket's case file: `GET /api/sav/ticket/{id}/dossier`.
    pub async fn dossier(&self, ticket_id: &str) -> Result<serde_json::Value, SavlinkError> {
        let url = format!("{}/api/sav/ticket/{ticket_id}/dossier", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("dossier request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let parsed: DossierResponse = Self::parse_json(response, "dossier").await?;
        if parsed.success {
            Ok(parsed.dossier)
        } else {
            Err(SavlinkError::api(
                parsed
                    .error
                    .unwrap_or_else(|| "dossier request unsuccessful".to_string()),
            ))
        }
    }

    /// Transcribes captured audio: `POST /api/voice/transcribe`.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<String, SavlinkError> {
        let url = format!("{}/api/voice/transcribe", self.base_url);
        let part = multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/webm")
            .map_err(|e| SavlinkError::Api {
                message: format!("invalid audio part: {e}"),
                source: Some(Box::new(e)),
            })?;
        let form = multipart::Form::new().part("audio_file", part);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("transcription request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let parsed: TranscribeResponse = Self::parse_json(response, "transcribe").await?;
        Ok(parsed.text)
    }

    /// Synthesizes speech for a reply: `POST /api/voice/speak`.
    ///
    /// Returns the raw audio bytes; playback is the caller's concern.
    pub async fn speak(&self, text: &str, voice: &str) -> Result<Vec<u8>, SavlinkError> {
        let url = format!("{}/api/voice/speak", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[("text", text), ("voice", voice)])
            .send()
            .await
            .map_err(|e| SavlinkError::Api {
                message: format!("speech request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "speech synthesis failed");
            return Err(SavlinkError::api(format!(
                "API returned {status}: {body}"
            )));
        }
        let bytes = response.bytes().await.map_err(|e| SavlinkError::Api {
            message: format!("failed to read audio body: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(bytes.to_vec())
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<T, SavlinkError> {
        let status = response.status();
        debug!(%status, endpoint, "response received");
        let body = response.text().await.map_err(|e| SavlinkError::Api {
            message: format!("failed to read {endpoint} response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        if !status.is_success() {
            return Err(SavlinkError::api(format!(
                "API returned {status}: {body}"
            )));
        }
        serde_json::from_str(&body).map_err(|e| SavlinkError::Api {
            message: format!("failed to parse {endpoint} response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn new_requires_base_url() {
        let result = ApiClient::new(&ApiConfig {
            base_url: None,
            timeout_secs: 0,
        });
        assert!(matches!(result, Err(SavlinkError::Config(_))));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = test_client("http://localhost:9999/");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[tokio::test]
    async fn chat_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "response": "Bonjour, comment puis-je vous aider ?",
            "should_close_session": false
        });
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_string_contains("\"message\":\"bonjour\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .chat(&ChatRequest {
                message: "bonjour".into(),
                session_id: "s1".into(),
                photos: vec![],
                language: None,
            })
            .await
            .unwrap();
        assert_eq!(response.response, "Bonjour, comment puis-je vous aider ?");
        assert!(!response.should_close_session);
    }

    #[tokio::test]
    async fn chat_maps_server_error_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .chat(&ChatRequest {
                message: "bonjour".into(),
                session_id: "s1".into(),
                photos: vec![],
                language: None,
            })
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"), "got: {msg}");
    }

    #[tokio::test]
    async fn delete_session_hits_session_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/chat/abc-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .delete_session(&SessionId("abc-123".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_ticket_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/create-ticket"))
            .and(body_string_contains("conversation_transcript"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ticket_id": "TCK-77"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .create_ticket(&CreateTicketRequest {
                customer_name: "Marie Dupont".into(),
                problem_description: "pied cassé".into(),
                product: "canapé OSLO".into(),
                order_number: "CMD-2024-12345".into(),
                conversation_transcript: "Client: bonjour\nAssistant: bonjour".into(),
                session_id: "s1".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.ticket_id, "TCK-77");
    }

    #[tokio::test]
    async fn upload_sends_multipart_and_parses_descriptors() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "files": [
                {"original_name": "a.png", "url": "/uploads/a.png", "type": "png", "size": 3}
            ]
        });
        Mock::given(method("POST"))
            .and(path("/api/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .upload(vec![UploadPart {
                file_name: "a.png".into(),
                mime_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            }])
            .await
            .unwrap();
        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].url, "/uploads/a.png");
    }

    #[tokio::test]
    async fn tickets_parses_list() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "success": true,
            "tickets": [{
                "ticket_id": "TCK-1",
                "customer_name": "Jean",
                "order_number": "CMD-1",
                "product_name": "table",
                "problem_description": "rayée",
                "priority": "P1",
                "status": "pending",
                "created_at": "2026-01-05T10:00:00Z"
            }]
        });
        Mock::given(method("GET"))
            .and(path("/api/sav/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.tickets().await.unwrap();
        assert!(response.success);
        assert_eq!(response.tickets.len(), 1);
        assert_eq!(response.tickets[0].ticket_id, "TCK-1");
    }

    #[tokio::test]
    async fn dossier_unwraps_success_envelope() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "success": true,
            "dossier": {"resolution": {"auto_resolved": true}}
        });
        Mock::given(method("GET"))
            .and(path("/api/sav/ticket/TCK-1/dossier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let dossier = client.dossier("TCK-1").await.unwrap();
        assert_eq!(dossier["resolution"]["auto_resolved"], true);
    }

    #[tokio::test]
    async fn dossier_failure_envelope_is_an_error() {
        let server = MockServer::start().await;
        let body = serde_json::json!({"success": false, "error": "not found"});
        Mock::given(method("GET"))
            .and(path("/api/sav/ticket/TCK-404/dossier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.dossier("TCK-404").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn transcribe_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/voice/transcribe"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"text": "oui c'est bon"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let text = client
            .transcribe(vec![0u8; 600], "capture.webm")
            .await
            .unwrap();
        assert_eq!(text, "oui c'est bon");
    }

    #[tokio::test]
    async fn speak_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/voice/speak"))
            .and(body_string_contains("voice=nova"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8, 8, 7]))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let audio = client.speak("Bonjour", "nova").await.unwrap();
        assert_eq!(audio, vec![9, 8, 7]);
    }
}
