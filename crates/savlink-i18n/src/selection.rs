// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of the chosen language.
//!
//! The language tag is the only piece of local state savlink persists:
//! a single `language` file under the savlink config directory.

use std::path::{Path, PathBuf};

use savlink_core::SavlinkError;
use tracing::warn;

use crate::catalog::supported_languages;

const SELECTION_FILE: &str = "language";

/// Path of the persisted language file, if a config directory exists.
pub fn selection_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("savlink").join(SELECTION_FILE))
}

/// Reads the persisted language tag, if any.
///
/// Unknown or unreadable values are treated as absent so a stale file
/// never breaks startup.
pub fn load_selected() -> Option<String> {
    load_selected_from(&selection_path()?)
}

/// Persists the chosen language tag.
pub fn persist_selected(tag: &str) -> Result<(), SavlinkError> {
    let path = selection_path()
        .ok_or_else(|| SavlinkError::Internal("no config directory available".to_string()))?;
    persist_selected_to(&path, tag)
}

pub(crate) fn load_selected_from(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let tag = content.trim().to_string();
    if supported_languages().iter().any(|l| l.tag == tag) {
        Some(tag)
    } else {
        warn!(%tag, "ignoring persisted language with unknown tag");
        None
    }
}

pub(crate) fn persist_selected_to(path: &Path, tag: &str) -> Result<(), SavlinkError> {
    if !supported_languages().iter().any(|l| l.tag == tag) {
        return Err(SavlinkError::Validation {
            message: format!("unsupported language tag `{tag}`"),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SavlinkError::Internal(format!("cannot create config dir: {e}")))?;
    }
    std::fs::write(path, tag)
        .map_err(|e| SavlinkError::Internal(format!("cannot persist language: {e}")))
}
