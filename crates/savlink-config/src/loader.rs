// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Four layers merge in order, later ones winning: compiled defaults,
//! the system file, the user XDG file, a `savlink.toml` in the current
//! directory, and finally `SAVLINK_`-prefixed environment variables.

#![allow(clippy::result_large_err)] // figment::Error, loaded once at startup

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SavlinkConfig;

const SYSTEM_CONFIG: &str = "/etc/savlink/savlink.toml";
const LOCAL_CONFIG: &str = "savlink.toml";

/// The config sections, as they appear both in TOML and in the
/// `SAVLINK_<SECTION>_<KEY>` environment variable scheme.
const SECTIONS: [&str; 4] = ["api", "chat", "upload", "voice"];

/// Load configuration from the standard file hierarchy plus environment
/// overrides. Missing files are skipped, never an error.
pub fn load_config() -> Result<SavlinkConfig, figment::Error> {
    defaults()
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_overrides())
        .extract()
}

/// Load configuration from a TOML string over the defaults, ignoring the
/// file hierarchy and the environment.
pub fn load_config_from_str(toml_content: &str) -> Result<SavlinkConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load configuration from one explicit file, still honoring environment
/// overrides.
pub fn load_config_from_path(path: &Path) -> Result<SavlinkConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(SavlinkConfig::default()))
}

fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("savlink/savlink.toml"))
        .unwrap_or_default()
}

/// Environment provider mapping `SAVLINK_API_BASE_URL` to `api.base_url`.
///
/// Only the first underscore separates the section from the key; the key
/// names themselves contain underscores (`base_url`, `close_delay_ms`),
/// so splitting on every underscore would mangle them.
fn env_overrides() -> Env {
    Env::prefixed("SAVLINK_").map(|key| {
        let name = key.as_str().to_ascii_lowercase();
        match name.split_once('_') {
            Some((section, rest)) if SECTIONS.contains(&section) => {
                format!("{section}.{rest}").into()
            }
            _ => name.into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_map_onto_dotted_section_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SAVLINK_API_BASE_URL", "http://jailed.example.com");
            jail.set_env("SAVLINK_CHAT_CLOSE_DELAY_MS", "42");
            jail.set_env("SAVLINK_VOICE_MAX_RECORDING_SECS", "7");

            let config: SavlinkConfig = defaults().merge(env_overrides()).extract()?;
            assert_eq!(
                config.api.base_url.as_deref(),
                Some("http://jailed.example.com")
            );
            assert_eq!(config.chat.close_delay_ms, 42);
            assert_eq!(config.voice.max_recording_secs, 7);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_beat_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("savlink.toml", "[chat]\nlanguage = \"fr\"\n")?;
            jail.set_env("SAVLINK_CHAT_LANGUAGE", "ar");

            let config: SavlinkConfig = defaults()
                .merge(Toml::file(LOCAL_CONFIG))
                .merge(env_overrides())
                .extract()?;
            assert_eq!(config.chat.language, "ar");
            Ok(())
        });
    }
}
