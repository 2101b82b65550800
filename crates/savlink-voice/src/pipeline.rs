// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One voice turn: record, transcribe, resolve or forward, speak.

use std::sync::Arc;

use savlink_api::ApiClient;
use savlink_core::SavlinkError;
use savlink_session::{ConversationSession, Intent, IntentClassifier, Turn};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::recorder::Recorder;
use crate::speaker::Speaker;

/// Outcome of one voice turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceTurn {
    /// Capture was below the silence floor; nothing happened.
    Silence,
    /// The utterance was resolved through the session.
    Session(Turn),
}

/// Drives a [`ConversationSession`] by voice.
///
/// While a ticket awaits validation, a transcribed yes/no takes priority
/// over forwarding the utterance as chat input.
pub struct VoicePipeline {
    session: Arc<Mutex<ConversationSession>>,
    api: Arc<ApiClient>,
    recorder: Recorder,
    speaker: Speaker,
    classifier: IntentClassifier,
}

impl VoicePipeline {
    pub fn new(
        session: Arc<Mutex<ConversationSession>>,
        api: Arc<ApiClient>,
        recorder: Recorder,
        speaker: Speaker,
    ) -> Self {
        Self {
            session,
            api,
            recorder,
            speaker,
            classifier: IntentClassifier::new(),
        }
    }

    /// Runs one record-transcribe-resolve-speak cycle.
    ///
    /// Microphone and transcription errors propagate; the caller reports
    /// them once and lets the user restart manually.
    pub async fn turn(&mut self) -> Result<VoiceTurn, SavlinkError> {
        let Some(audio) = self.recorder.record().await? else {
            debug!("silence, skipping turn");
            return Ok(VoiceTurn::Silence);
        };

        let transcript = self.api.transcribe(audio, "capture.webm").await?;
        info!(%transcript, "utterance transcribed");

        let turn = {
            let mut session = self.session.lock().await;
            if session.pending_ticket().is_some() {
                match self.classifier.classify(&transcript) {
                    Some(Intent::Confirm) => session.confirm_ticket().await,
                    Some(Intent::Cancel) => session.cancel_ticket(),
                    None => session.submit(&transcript).await,
                }
            } else {
                session.submit(&transcript).await
            }
        };

        match &turn {
            Turn::Replied { speak: Some(req) } | Turn::Closing { speak: Some(req) } => {
                tokio::time::sleep(req.delay).await;
                self.speaker.speak(&req.text).await?;
            }
            Turn::ValidationRequested => {
                // Recaps are not autoplayed; the pipeline speaks them
                // deliberately so the user hears what to confirm.
                let recap = {
                    let session = self.session.lock().await;
                    session.messages().last().map(|m| m.content.clone())
                };
                if let Some(recap) = recap {
                    self.speaker.speak(&recap).await?;
                }
            }
            _ => {}
        }

        Ok(VoiceTurn::Session(turn))
    }

    /// Tears the pipeline down: releases the microphone, stops playback,
    /// and clears the session's pending state.
    pub async fn stop(&mut self) {
        self.recorder.close();
        self.speaker.stop();
        self.session.lock().await.stop();
    }
}
