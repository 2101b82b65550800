// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Miette diagnostics for configuration failures.
//!
//! Figment reports deserialization problems as flat errors; this module
//! turns them into annotated diagnostics: the offending key underlined in
//! the TOML file it came from, the valid keys for that section, and a
//! "did you mean?" suggestion when a known key is a close fuzzy match.

#![allow(unused_assignments)] // tripped by miette's Diagnostic derive

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler scores above this are close enough to offer as a fix.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, annotated for miette rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the config model does not know about.
    #[error("`{key}` is not a recognized configuration key")]
    #[diagnostic(
        code(savlink::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, when one scores above the fuzzy threshold.
        suggestion: Option<String>,
        /// Comma-separated keys accepted in the section.
        valid_keys: String,
        #[label("not a known key in this section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose TOML type does not match the model field.
    #[error("invalid value type for `{key}`: {detail}")]
    #[diagnostic(code(savlink::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the field, e.g. `chat.close_delay_ms`.
        key: String,
        detail: String,
        expected: String,
        #[label("this value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key with no usable default that was never set.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(savlink::config::missing_key),
        help("add `{key}` to savlink.toml, or export the matching SAVLINK_ variable")
    )]
    MissingKey { key: String },

    /// A value that deserialized fine but fails a semantic check.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(savlink::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(savlink::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys are {valid_keys}"),
        None => format!("valid keys are {valid_keys}"),
    }
}

/// Convert a figment error (which may aggregate several problems) into
/// one `ConfigError` per problem, resolving source spans against the
/// TOML files in `toml_sources` (path, content) pairs.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, accepted) => {
                let suggestion = suggest_key(field, accepted);
                let section = error.path.first().map(String::as_str);
                let (span, src) = locate(&error, section, field, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: accepted.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                // The path ends with the field itself; anything before it
                // is the section (one level deep in this config).
                let field = error.path.last().cloned().unwrap_or_default();
                let section = match error.path.len() {
                    0 | 1 => None,
                    _ => error.path.first().map(String::as_str),
                };
                let (span, src) = locate(&error, section, &field, toml_sources).unzip();
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Resolve the span of `key` in the TOML file the error came from.
///
/// Returns `None` when the error did not originate from a file we have
/// the content of (env overrides, inline strings).
fn locate(
    error: &figment::error::Error,
    section: Option<&str>,
    key: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let origin = match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(path) => path.display().to_string(),
        _ => return None,
    };
    let (path, content) = toml_sources.iter().find(|(p, _)| *p == origin)?;
    let offset = find_key_offset(content, section, key)?;
    Some((
        SourceSpan::new(offset.into(), key.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `key` within `section` of a TOML document.
///
/// With `section = Some("chat")` the scan starts after the `[chat]`
/// header and stops at the next header, so a same-named key in another
/// section is never picked up. `None` scans the top-level keys.
pub fn find_key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let start = match section {
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut pos = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            break;
        }
        if let Some(after) = trimmed.strip_prefix(key) {
            if after.trim_start().starts_with('=') {
                return Some(pos + (line.len() - trimmed.len()));
            }
        }
        pos += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if any scores above the
/// suggestion threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|k| (strsim::jaro_winkler(unknown, k), *k))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, k)| k.to_string())
}

/// Print every error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
