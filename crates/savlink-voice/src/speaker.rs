// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech synthesis with most-recent-wins playback.

use std::sync::Arc;

use savlink_api::ApiClient;
use savlink_core::SavlinkError;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::traits::AudioSink;

/// Strips markup so synthesized speech does not read markdown aloud.
///
/// Markdown markers go, double newlines become sentence breaks, single
/// newlines become spaces.
pub fn speech_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '_' | '`'))
        .collect();
    stripped
        .replace("\n\n", ". ")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Synthesizes replies through the backend and plays them on the sink.
///
/// At most one utterance plays at a time: starting a new one cancels any
/// in-progress playback first.
pub struct Speaker {
    api: Arc<ApiClient>,
    sink: Arc<Mutex<Box<dyn AudioSink>>>,
    voice: String,
    current: Option<CancellationToken>,
}

impl Speaker {
    pub fn new(api: Arc<ApiClient>, sink: Box<dyn AudioSink>, voice: impl Into<String>) -> Self {
        Self {
            api,
            sink: Arc::new(Mutex::new(sink)),
            voice: voice.into(),
            current: None,
        }
    }

    /// Synthesizes and plays one utterance, cancelling any previous one.
    ///
    /// Playback happens in the background; this returns once synthesis
    /// succeeded and playback started.
    pub async fn speak(&mut self, text: &str) -> Result<(), SavlinkError> {
        self.stop();

        let cleaned = speech_text(text);
        if cleaned.is_empty() {
            return Ok(());
        }

        let audio = self.api.speak(&cleaned, &self.voice).await?;

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            let mut sink = sink.lock().await;
            if let Err(e) = sink.play(audio, token).await {
                warn!(error = %e, "audio playback failed");
            }
        });
        Ok(())
    }

    /// Cancels in-progress playback, if any.
    pub fn stop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.stop();
    }
}
