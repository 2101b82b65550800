// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the required backend URL and sane audio limits.

use crate::diagnostic::ConfigError;
use crate::model::SavlinkConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SavlinkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // api.base_url is the only key with no usable default.
    match &config.api.base_url {
        None => errors.push(ConfigError::MissingKey {
            key: "api.base_url".to_string(),
        }),
        Some(url) => {
            let url = url.trim();
            if url.is_empty() {
                errors.push(ConfigError::Validation {
                    message: "api.base_url must not be empty".to_string(),
                });
            } else if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "api.base_url `{url}` must start with http:// or https://"
                    ),
                });
            }
        }
    }

    if config.chat.language.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "chat.language must not be empty".to_string(),
        });
    }

    if config.chat.photo_placeholder.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "chat.photo_placeholder must not be empty".to_string(),
        });
    }

    if config.upload.max_file_size_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "upload.max_file_size_bytes must be at least 1".to_string(),
        });
    }

    if config.upload.allowed_mime_types.is_empty() {
        errors.push(ConfigError::Validation {
            message: "upload.allowed_mime_types must not be empty".to_string(),
        });
    }

    if config.voice.max_recording_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "voice.max_recording_secs must be at least 1".to_string(),
        });
    }

    if config.voice.voice.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "voice.voice must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
