// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Localization for the savlink support client.
//!
//! Ships embedded fr/en/ar catalogs with dotted-key lookup and French
//! fallback, plus persistence of the user's language choice.

pub mod catalog;
pub mod selection;

pub use catalog::{supported_languages, Catalog, LanguageInfo, FALLBACK_LANGUAGE};
pub use selection::{load_selected, persist_selected, selection_path};
