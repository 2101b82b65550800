// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of attachment URLs returned by the backend.
//!
//! Backend and CDN responses have historically mixed absolute URLs,
//! protocol-relative URLs, malformed schemes, and bare paths. The checks
//! run in a fixed order; the already-absolute case must stay first so CDN
//! URLs pass through untouched.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

static ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://").unwrap()
});
static MISSING_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?)(//)").unwrap()
});
static MISSING_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?[^:]").unwrap()
});
static SCHEME_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)(.*)$").unwrap()
});

/// Resolves a raw URL from the backend into an absolute one.
///
/// Steps, in order:
/// 1. `http://`/`https://` prefix: returned unchanged.
/// 2. Protocol-relative (`//host/..`): prefixed with `https:`.
/// 3. Missing colon (`https//..`): colon inserted.
/// 4. Scheme word without `://`: separator inserted.
/// 5. Leading `/`: prefixed with the base URL.
/// 6. Anything else: prefixed with the base URL and a `/`.
///
/// Empty input yields an empty string.
pub fn absolute_url(base_url: &str, raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return String::new();
    }

    if ABSOLUTE.is_match(url) {
        return url.to_string();
    }

    if url.starts_with("//") {
        warn!(%url, "normalizing protocol-relative URL");
        return format!("https:{url}");
    }

    if MISSING_COLON.is_match(url) {
        let fixed = MISSING_COLON.replace(url, "$1://").into_owned();
        warn!(%url, %fixed, "fixed malformed URL (missing colon)");
        return fixed;
    }

    if MISSING_SEPARATOR.is_match(url) && !url.contains("://") {
        let fixed = SCHEME_WORD.replace(url, "$1://$2").into_owned();
        warn!(%url, %fixed, "fixed malformed URL (missing ://)");
        return fixed;
    }

    if url.starts_with('/') {
        return format!("{base_url}{url}");
    }

    warn!(%url, "treating as relative path");
    format!("{base_url}/{url}")
}
