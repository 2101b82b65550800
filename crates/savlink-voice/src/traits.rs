// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams to platform audio.
//!
//! Microphone capture and audio playback live behind these traits; the
//! actual device bindings are external collaborators. A source that cannot
//! open the microphone (permission denied, no device) surfaces
//! [`SavlinkError::Audio`] from its first read.

use async_trait::async_trait;
use savlink_core::SavlinkError;
use tokio_util::sync::CancellationToken;

/// A stream of captured audio.
#[async_trait]
pub trait AudioSource: Send {
    /// Waits for the next chunk of captured audio.
    ///
    /// `Ok(None)` means the utterance ended (manual stop or end of speech).
    async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, SavlinkError>;

    /// Releases the underlying device. Idempotent.
    fn close(&mut self);
}

/// Plays synthesized audio.
#[async_trait]
pub trait AudioSink: Send {
    /// Plays to completion, or returns early when `cancel` fires.
    async fn play(&mut self, audio: Vec<u8>, cancel: CancellationToken)
        -> Result<(), SavlinkError>;
}
