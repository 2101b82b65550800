// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Microphone capture with a hard duration cap.

use std::time::Duration;

use savlink_config::VoiceConfig;
use savlink_core::SavlinkError;
use tracing::{debug, warn};

use crate::traits::AudioSource;

/// Wraps an [`AudioSource`] with the recording cap and the silence floor.
///
/// The source is released on every exit path: errors close it immediately,
/// and the `Drop` impl covers teardown, panics and task cancellation.
pub struct Recorder {
    source: Box<dyn AudioSource>,
    max_duration: Duration,
    min_audio_bytes: u64,
    closed: bool,
}

impl Recorder {
    pub fn new(source: Box<dyn AudioSource>, config: &VoiceConfig) -> Self {
        Self {
            source,
            max_duration: Duration::from_secs(config.max_recording_secs),
            min_audio_bytes: config.min_audio_bytes,
            closed: false,
        }
    }

    /// Captures one utterance.
    ///
    /// Ends on manual stop (the source yields `None`) or on the cap,
    /// whichever comes first; whatever was captured by then is used.
    /// Returns `Ok(None)` when the capture is too small to be speech.
    pub async fn record(&mut self) -> Result<Option<Vec<u8>>, SavlinkError> {
        if self.closed {
            return Err(SavlinkError::Audio {
                message: "audio source already released".to_string(),
                source: None,
            });
        }

        let deadline = tokio::time::Instant::now() + self.max_duration;
        let mut captured = Vec::new();

        loop {
            match tokio::time::timeout_at(deadline, self.source.read_chunk()).await {
                Ok(Ok(Some(chunk))) => captured.extend(chunk),
                Ok(Ok(None)) => break,
                Ok(Err(e)) => {
                    warn!(error = %e, "audio capture failed");
                    self.close();
                    return Err(e);
                }
                Err(_) => {
                    debug!(cap_secs = self.max_duration.as_secs(), "recording cap reached");
                    break;
                }
            }
        }

        if (captured.len() as u64) < self.min_audio_bytes {
            debug!(bytes = captured.len(), "capture below silence floor, discarded");
            return Ok(None);
        }
        Ok(Some(captured))
    }

    /// Releases the audio source. Idempotent.
    pub fn close(&mut self) {
        if !self.closed {
            self.source.close();
            self.closed = true;
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Source that yields scripted chunks, then stops.
    struct ScriptedSource {
        chunks: Vec<Vec<u8>>,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AudioSource for ScriptedSource {
        async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, SavlinkError> {
            if self.chunks.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.chunks.remove(0)))
            }
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    /// Source that produces a chunk then hangs forever.
    struct HangingSource {
        first: Option<Vec<u8>>,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AudioSource for HangingSource {
        async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, SavlinkError> {
            match self.first.take() {
                Some(chunk) => Ok(Some(chunk)),
                None => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    struct FailingSource {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AudioSource for FailingSource {
        async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, SavlinkError> {
            Err(SavlinkError::Audio {
                message: "microphone access denied".to_string(),
                source: None,
            })
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn config(max_secs: u64, min_bytes: u64) -> VoiceConfig {
        VoiceConfig {
            voice: "nova".into(),
            max_recording_secs: max_secs,
            min_audio_bytes: min_bytes,
        }
    }

    #[tokio::test]
    async fn captures_until_manual_stop() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = ScriptedSource {
            chunks: vec![vec![1u8; 400], vec![2u8; 400]],
            closed: Arc::clone(&closed),
        };
        let mut recorder = Recorder::new(Box::new(source), &config(30, 500));
        let audio = recorder.record().await.unwrap().unwrap();
        assert_eq!(audio.len(), 800);
        // Manual stop keeps the source open for the next turn.
        assert!(!closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn short_capture_is_discarded_as_silence() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = ScriptedSource {
            chunks: vec![vec![1u8; 100]],
            closed: Arc::clone(&closed),
        };
        let mut recorder = Recorder::new(Box::new(source), &config(30, 500));
        assert!(recorder.record().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cap_ends_the_recording_with_what_was_captured() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = HangingSource {
            first: Some(vec![7u8; 600]),
            closed: Arc::clone(&closed),
        };
        let mut recorder = Recorder::new(Box::new(source), &config(1, 500));
        let audio = recorder.record().await.unwrap().unwrap();
        assert_eq!(audio.len(), 600);
    }

    #[tokio::test]
    async fn error_releases_the_source() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = FailingSource {
            closed: Arc::clone(&closed),
        };
        let mut recorder = Recorder::new(Box::new(source), &config(30, 500));
        let err = recorder.record().await.unwrap_err();
        assert!(matches!(err, SavlinkError::Audio { .. }));
        assert!(closed.load(Ordering::SeqCst), "source must be released");
    }

    #[tokio::test]
    async fn drop_releases_the_source() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = ScriptedSource {
            chunks: vec![],
            closed: Arc::clone(&closed),
        };
        drop(Recorder::new(Box::new(source), &config(30, 500)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let closed = Arc::new(AtomicBool::new(false));
        let source = ScriptedSource {
            chunks: vec![],
            closed: Arc::clone(&closed),
        };
        let mut recorder = Recorder::new(Box::new(source), &config(30, 500));
        recorder.close();
        recorder.close();
        assert!(closed.load(Ordering::SeqCst));
        assert!(recorder.record().await.is_err());
    }
}
