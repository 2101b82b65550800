// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice front end for the savlink support client.
//!
//! Capture and playback sit behind the [`AudioSource`] and [`AudioSink`]
//! traits; everything above them (silence floor, recording cap,
//! transcription, intent routing, most-recent-wins playback) is owned here.

pub mod pipeline;
pub mod recorder;
pub mod speaker;
pub mod traits;

pub use pipeline::{VoicePipeline, VoiceTurn};
pub use recorder::Recorder;
pub use speaker::{speech_text, Speaker};
pub use traits::{AudioSink, AudioSource};
