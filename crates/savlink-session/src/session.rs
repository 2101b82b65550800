// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation session: append-only message log plus the FSM driving
//! chat turns, ticket confirmation and attachment handling.
//!
//! State transitions apply in response-arrival order; `&mut self` on every
//! operation means one outcome lands at a time, so a confirm or cancel
//! dispatched while a chat request is in flight is applied before or after
//! that response, never interleaved with it.

use std::sync::Arc;
use std::time::Duration;

use savlink_api::{ApiClient, ChatRequest, CreateTicketRequest, UploadPart};
use savlink_config::{ChatConfig, UploadConfig};
use savlink_core::{Message, PendingTicket, SavlinkError, SessionId};
use savlink_i18n::Catalog;
use tracing::{debug, info, warn};

use crate::attachments::{AttachmentManager, FileCandidate, Rejection};
use crate::state::ConversationState;

/// A request to synthesize and play an assistant reply.
///
/// `delay` is the configured pause between rendering the message and
/// starting audio, so the text appears first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakRequest {
    pub text: String,
    pub delay: Duration,
}

/// Outcome of one session operation, for the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Nothing happened (empty submit, confirm/cancel with nothing pending).
    Ignored,
    /// An ordinary assistant reply was appended.
    Replied { speak: Option<SpeakRequest> },
    /// A ticket recap arrived; the UI must offer confirm/cancel. Speech
    /// autoplay is suppressed for this message.
    ValidationRequested,
    /// The backend closed the session; the caller schedules the timed reset.
    Closing { speak: Option<SpeakRequest> },
    /// The call failed; the localized error message was appended.
    Failed,
}

/// One conversation with the support backend.
///
/// Owns the message log, the FSM state, the pending attachments and the
/// session identity. The log is append-only: the only deletion is the full
/// clear performed by the reset sequence.
pub struct ConversationSession {
    api: Arc<ApiClient>,
    catalog: Arc<Catalog>,
    config: ChatConfig,
    session_id: SessionId,
    language: String,
    speech_enabled: bool,
    state: ConversationState,
    messages: Vec<Message>,
    attachments: AttachmentManager,
}

impl ConversationSession {
    /// Starts a fresh conversation with a generated session id and the
    /// welcome message already in the log.
    pub fn new(
        api: Arc<ApiClient>,
        catalog: Arc<Catalog>,
        config: ChatConfig,
        upload_config: UploadConfig,
    ) -> Self {
        let language = config.language.clone();
        let speech_enabled = config.speech_enabled;
        let welcome = catalog.t(&language, "chat.welcome.long");
        let session_id = SessionId::generate();
        info!(session_id = %session_id, %language, "conversation started");
        Self {
            api,
            catalog,
            config,
            session_id,
            language,
            speech_enabled,
            state: ConversationState::Idle,
            messages: vec![Message::assistant(welcome)],
            attachments: AttachmentManager::new(upload_config),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switches the conversation language for subsequent turns.
    pub fn set_language(&mut self, tag: impl Into<String>) {
        self.language = tag.into();
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    pub fn set_speech_enabled(&mut self, enabled: bool) {
        self.speech_enabled = enabled;
    }

    /// The pending ticket, when the session awaits validation.
    pub fn pending_ticket(&self) -> Option<&PendingTicket> {
        match &self.state {
            ConversationState::AwaitingValidation(pending) => Some(pending),
            _ => None,
        }
    }

    /// Files uploaded but not yet attached to a sent message.
    pub fn pending_attachments(&self) -> &[savlink_core::Attachment] {
        self.attachments.pending()
    }

    /// Drops one pending attachment locally.
    pub fn remove_attachment(&mut self, index: usize) -> Option<savlink_core::Attachment> {
        self.attachments.remove(index)
    }

    /// Validates and uploads user-picked files; accepted descriptors join
    /// the pending list. Returns the per-file rejections for alerts.
    pub async fn upload_files(
        &mut self,
        candidates: Vec<FileCandidate>,
    ) -> Result<Vec<Rejection>, SavlinkError> {
        let (accepted, rejections) = self.attachments.validate(candidates);
        if accepted.is_empty() {
            return Ok(rejections);
        }
        let parts = accepted
            .into_iter()
            .map(|c| UploadPart {
                file_name: c.file_name,
                mime_type: c.mime_type,
                bytes: c.bytes,
            })
            .collect();
        let response = self.api.upload(parts).await?;
        self.attachments
            .accept(response.files.into_iter().map(Into::into).collect());
        Ok(rejections)
    }

    /// Sends one user turn.
    ///
    /// No-op when the text is blank and no attachments are pending. The
    /// user message is appended optimistically and stays in the log even
    /// if the call fails. When photos are the only content, the wire
    /// message carries the configured placeholder (the backend requires a
    /// non-empty message) while the logged message keeps the typed text.
    pub async fn submit(&mut self, text: &str) -> Turn {
        let trimmed = text.trim();
        if trimmed.is_empty() && self.attachments.pending().is_empty() {
            return Turn::Ignored;
        }

        let files = self.attachments.drain();
        let photos: Vec<String> = files
            .iter()
            .map(|f| savlink_api::absolute_url(self.api.base_url(), &f.url))
            .collect();
        self.messages.push(Message::user(trimmed, files));

        let wire_message = if trimmed.is_empty() {
            self.config.photo_placeholder.clone()
        } else {
            trimmed.to_string()
        };

        let previous = std::mem::replace(&mut self.state, ConversationState::AwaitingResponse);
        let request = ChatRequest {
            message: wire_message,
            session_id: self.session_id.to_string(),
            photos,
            language: Some(self.language.clone()),
        };

        match self.api.chat(&request).await {
            Ok(response) => {
                debug!(
                    should_close = response.should_close_session,
                    requires_validation = response.requires_validation,
                    "chat response applied"
                );
                let content = response.response.clone();
                if response.should_close_session {
                    self.messages.push(
                        Message::assistant(&content).with_language(response.language.clone()),
                    );
                    self.state = ConversationState::Closing;
                    return Turn::Closing {
                        speak: self.speak_request(&content),
                    };
                }

                let pending = if let Some(ticket_id) = &response.ticket_id {
                    Some(PendingTicket::Created {
                        ticket_id: ticket_id.clone(),
                    })
                } else {
                    response.ticket_data.clone().map(PendingTicket::Draft)
                };

                if let Some(pending) = pending.filter(|_| {
                    response.requires_validation || response.ticket_data.is_some()
                }) {
                    let mut message =
                        Message::assistant(&content).with_language(response.language.clone());
                    message.requires_validation = true;
                    message.ticket_id = response.ticket_id.clone();
                    self.messages.push(message);
                    self.state = ConversationState::AwaitingValidation(pending);
                    return Turn::ValidationRequested;
                }

                self.messages
                    .push(Message::assistant(&content).with_language(response.language));
                // A pending ticket survives an ordinary exchange.
                self.state = match previous {
                    ConversationState::AwaitingValidation(p) => {
                        ConversationState::AwaitingValidation(p)
                    }
                    _ => ConversationState::Idle,
                };
                Turn::Replied {
                    speak: self.speak_request(&content),
                }
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                let error_text = self.catalog.t(&self.language, "chat.error_general");
                self.messages.push(Message::assistant(error_text));
                self.state = previous;
                Turn::Failed
            }
        }
    }

    /// Confirms the pending ticket.
    ///
    /// No-op outside `AwaitingValidation`. A ticket the backend already
    /// created is acknowledged locally without a network call; a draft goes
    /// through the ticket-creation endpoint with the full transcript. On
    /// creation failure the draft stays pending so the user can retry.
    pub async fn confirm_ticket(&mut self) -> Turn {
        let pending = match &self.state {
            ConversationState::AwaitingValidation(pending) => pending.clone(),
            _ => return Turn::Ignored,
        };

        match pending {
            PendingTicket::Created { ticket_id } => {
                info!(%ticket_id, "ticket acknowledged");
                let text = self.catalog.t(&self.language, "chat.ticket_confirmed");
                self.messages.push(Message::assistant(&text));
                self.state = ConversationState::Idle;
                Turn::Replied {
                    speak: self.speak_request(&text),
                }
            }
            PendingTicket::Draft(draft) => {
                let request = CreateTicketRequest {
                    customer_name: draft.customer_name.clone(),
                    problem_description: draft.problem_description.clone(),
                    product: draft.product.clone(),
                    order_number: draft.order_number.clone(),
                    conversation_transcript: self.transcript(),
                    session_id: self.session_id.to_string(),
                };
                match self.api.create_ticket(&request).await {
                    Ok(created) => {
                        info!(ticket_id = %created.ticket_id, "ticket created");
                        let text = self.catalog.t_with(
                            &self.language,
                            "chat.ticket_created",
                            &[("ticket_id", &created.ticket_id)],
                        );
                        self.messages.push(Message::assistant(&text));
                        self.attachments.clear();
                        self.state = ConversationState::Idle;
                        Turn::Replied {
                            speak: self.speak_request(&text),
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "ticket creation failed");
                        let text = self.catalog.t(&self.language, "chat.ticket_create_error");
                        self.messages.push(Message::assistant(text));
                        // Pending draft stays for retry.
                        Turn::Failed
                    }
                }
            }
        }
    }

    /// Cancels the pending ticket and invites the user to restart.
    ///
    /// No-op outside `AwaitingValidation`; never makes a network call.
    pub fn cancel_ticket(&mut self) -> Turn {
        if !matches!(self.state, ConversationState::AwaitingValidation(_)) {
            return Turn::Ignored;
        }
        info!("pending ticket cancelled");
        let text = self.catalog.t(&self.language, "chat.cancel_restart");
        self.messages.push(Message::assistant(&text));
        self.state = ConversationState::Idle;
        Turn::Replied {
            speak: self.speak_request(&text),
        }
    }

    /// Stops the conversation: discards pending attachments and any pending
    /// ticket. The log is kept; only the reset sequence clears it.
    pub fn stop(&mut self) {
        self.attachments.clear();
        self.state = ConversationState::Idle;
    }

    /// All messages rendered `"{Role}: {content}"`, newline-joined.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    pub(crate) fn close_delay(&self) -> Duration {
        Duration::from_millis(self.config.close_delay_ms)
    }

    pub(crate) fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.config.reset_delay_ms)
    }

    /// First half of the reset sequence: wipe the log.
    pub(crate) fn reset_clear(&mut self) {
        self.messages.clear();
        self.attachments.clear();
    }

    /// Second half: fresh welcome message, same session id.
    pub(crate) fn reset_welcome(&mut self) {
        let welcome = self.catalog.t(&self.language, "chat.welcome.long");
        self.messages.push(Message::assistant(welcome));
        self.state = ConversationState::Idle;
    }

    fn speak_request(&self, text: &str) -> Option<SpeakRequest> {
        if self.speech_enabled {
            Some(SpeakRequest {
                text: text.to_string(),
                delay: Duration::from_millis(self.config.speak_delay_ms),
            })
        } else {
            None
        }
    }
}
