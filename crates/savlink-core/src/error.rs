// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the savlink support client.

use thiserror::Error;

/// The primary error type used across all savlink crates.
#[derive(Debug, Error)]
pub enum SavlinkError {
    /// Configuration errors (missing base URL, invalid TOML, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend API errors (request failure, non-2xx status, bad payload).
    #[error("api error: {message}")]
    Api {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Client-side validation errors (rejected file, bad input) caught
    /// before any network call is made.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Audio capture/playback errors (permission denied, device failure).
    #[error("audio error: {message}")]
    Audio {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SavlinkError {
    /// Shorthand for an [`SavlinkError::Api`] without an underlying source.
    pub fn api(message: impl Into<String>) -> Self {
        SavlinkError::Api {
            message: message.into(),
            source: None,
        }
    }
}
