// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation catalog with dotted-key lookup and French fallback.

use savlink_core::SavlinkError;
use tracing::warn;

/// Language tag used when a key is missing from the selected language.
pub const FALLBACK_LANGUAGE: &str = "fr";

const FR_TOML: &str = include_str!("../locales/fr.toml");
const EN_TOML: &str = include_str!("../locales/en.toml");
const AR_TOML: &str = include_str!("../locales/ar.toml");

/// Metadata for one supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Short tag used on the wire and in config (`fr`, `en`, `ar`).
    pub tag: &'static str,
    /// Native display name.
    pub label: &'static str,
    /// BCP 47 locale for platform speech/formatting APIs.
    pub locale: &'static str,
}

/// The languages this client ships catalogs for.
pub fn supported_languages() -> &'static [LanguageInfo] {
    &[
        LanguageInfo {
            tag: "fr",
            label: "Français",
            locale: "fr-FR",
        },
        LanguageInfo {
            tag: "en",
            label: "English",
            locale: "en-US",
        },
        LanguageInfo {
            tag: "ar",
            label: "العربية",
            locale: "ar-SA",
        },
    ]
}

/// In-memory translation tables for all supported languages.
///
/// Lookup is by dotted key (`chat.welcome.long`). A key missing from the
/// requested language falls back to French; a key missing everywhere
/// resolves to the key itself, so a typo shows up in the UI instead of
/// panicking.
pub struct Catalog {
    tables: Vec<(&'static str, toml::Value)>,
}

impl Catalog {
    /// Parses the embedded locale files.
    pub fn new() -> Result<Self, SavlinkError> {
        let mut tables = Vec::new();
        for (tag, content) in [("fr", FR_TOML), ("en", EN_TOML), ("ar", AR_TOML)] {
            let value: toml::Value = content
                .parse()
                .map_err(|e| SavlinkError::Internal(format!("locale {tag} is invalid: {e}")))?;
            tables.push((tag, value));
        }
        Ok(Catalog { tables })
    }

    /// Resolves a dotted key in the given language.
    pub fn t(&self, language: &str, key: &str) -> String {
        if let Some(text) = self.lookup(language, key) {
            return text.to_string();
        }
        if language != FALLBACK_LANGUAGE {
            if let Some(text) = self.lookup(FALLBACK_LANGUAGE, key) {
                return text.to_string();
            }
        }
        warn!(key, language, "missing translation key");
        key.to_string()
    }

    /// Resolves a dotted key and substitutes `{name}` placeholders.
    pub fn t_with(&self, language: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(language, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        let (_, table) = self.tables.iter().find(|(tag, _)| *tag == language)?;
        let mut node = table;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }
}
