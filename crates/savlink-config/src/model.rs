// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the savlink support client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level savlink configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional in the file, but
/// `api.base_url` must be set somewhere -- there is no production default
/// backend origin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SavlinkConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Conversation behavior settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Attachment upload limits.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Voice capture and synthesis settings.
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Origin of the support backend (e.g. `https://sav.example.com`).
    /// Required: absence is a configuration error, never a silent default.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds. 0 disables the client timeout,
    /// matching the baseline design where a hung request is only resolved
    /// by the backend.
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Conversation behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Default UI language tag (fr, en, ar).
    #[serde(default = "default_language")]
    pub language: String,

    /// Whether assistant replies are synthesized to speech by default.
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,

    /// Delay between the farewell message and the log clear + session delete.
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,

    /// Further delay before the fresh welcome message appears.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Display delay before a reply is synthesized, so the message renders
    /// before audio starts.
    #[serde(default = "default_speak_delay_ms")]
    pub speak_delay_ms: u64,

    /// Text transmitted in place of an empty message when photos are the
    /// only content; the backend requires a non-empty message.
    #[serde(default = "default_photo_placeholder")]
    pub photo_placeholder: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            speech_enabled: default_speech_enabled(),
            close_delay_ms: default_close_delay_ms(),
            reset_delay_ms: default_reset_delay_ms(),
            speak_delay_ms: default_speak_delay_ms(),
            photo_placeholder: default_photo_placeholder(),
        }
    }
}

fn default_language() -> String {
    "fr".to_string()
}

fn default_speech_enabled() -> bool {
    true
}

fn default_close_delay_ms() -> u64 {
    3000
}

fn default_reset_delay_ms() -> u64 {
    500
}

fn default_speak_delay_ms() -> u64 {
    300
}

fn default_photo_placeholder() -> String {
    "[Photo envoyée]".to_string()
}

/// Attachment upload limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Maximum size per file, in bytes.
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// MIME types accepted for upload.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_mime_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/jpg",
        "image/png",
        "video/mp4",
        "video/quicktime",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Voice capture and synthesis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// Synthesis voice name passed to the speech endpoint.
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Hard cap on a single recording, in seconds.
    #[serde(default = "default_max_recording_secs")]
    pub max_recording_secs: u64,

    /// Recordings smaller than this are discarded as silence.
    #[serde(default = "default_min_audio_bytes")]
    pub min_audio_bytes: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            max_recording_secs: default_max_recording_secs(),
            min_audio_bytes: default_min_audio_bytes(),
        }
    }
}

fn default_voice() -> String {
    "nova".to_string()
}

fn default_max_recording_secs() -> u64 {
    30
}

fn default_min_audio_bytes() -> u64 {
    500
}
