// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `savlink chat` command implementation.
//!
//! Interactive REPL over a [`ConversationSession`]: readline input, slash
//! commands for attachments, validation and language, and the timed reset
//! sequence after a closing response.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use savlink_api::ApiClient;
use savlink_config::SavlinkConfig;
use savlink_core::SavlinkError;
use savlink_i18n::Catalog;
use savlink_session::{
    schedule_reset, ConversationSession, FileCandidate, RejectionReason, Turn,
};
use tokio::sync::Mutex;

/// Runs the `savlink chat` interactive REPL.
pub async fn run_chat(config: SavlinkConfig) -> Result<(), SavlinkError> {
    let api = Arc::new(ApiClient::new(&config.api)?);
    let catalog = Arc::new(Catalog::new()?);

    // The persisted language choice wins over the configured default.
    let mut chat_config = config.chat.clone();
    if let Some(selected) = savlink_i18n::load_selected() {
        chat_config.language = selected;
    }

    let session = Arc::new(Mutex::new(ConversationSession::new(
        Arc::clone(&api),
        Arc::clone(&catalog),
        chat_config,
        config.upload.clone(),
    )));

    let mut rl = DefaultEditor::new()
        .map_err(|e| SavlinkError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "savlink chat".bold().green());
    println!(
        "Type {} to exit, {} to attach files, {} / {} to answer a recap.\n",
        "/quit".yellow(),
        "/photo <path>".yellow(),
        "/yes".yellow(),
        "/no".yellow()
    );
    {
        let s = session.lock().await;
        if let Some(welcome) = s.messages().first() {
            println!("{}\n", welcome.content);
        }
    }

    let prompt = format!("{}> ", "savlink".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == "/quit" || trimmed == "/exit" {
                    session.lock().await.stop();
                    break;
                }

                if let Some(rest) = trimmed.strip_prefix("/photo") {
                    attach_photos(&session, &catalog, &config, rest.trim()).await;
                    continue;
                }

                if let Some(rest) = trimmed.strip_prefix("/lang") {
                    change_language(&session, rest.trim()).await;
                    continue;
                }

                let turn = {
                    let mut s = session.lock().await;
                    match trimmed {
                        "/yes" => s.confirm_ticket().await,
                        "/no" => s.cancel_ticket(),
                        _ => s.submit(trimmed).await,
                    }
                };

                {
                    let s = session.lock().await;
                    render_turn(&s, &catalog, &turn);
                }

                if matches!(turn, Turn::Closing { .. }) {
                    // The delays are short; hold the prompt until the
                    // fresh welcome is ready rather than showing it one
                    // keypress late.
                    if let Some(welcome) = reset_and_fetch_welcome(&session).await {
                        println!("\n{welcome}\n");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "au revoir".dimmed());
    Ok(())
}

/// Runs the post-closing reset to completion and returns the fresh
/// welcome message.
async fn reset_and_fetch_welcome(session: &Arc<Mutex<ConversationSession>>) -> Option<String> {
    schedule_reset(Arc::clone(session)).finished().await;
    let s = session.lock().await;
    s.messages().first().map(|m| m.content.clone())
}

/// Prints the outcome of one session operation.
fn render_turn(session: &ConversationSession, catalog: &Catalog, turn: &Turn) {
    let lang = session.language();
    match turn {
        Turn::Ignored => {}
        Turn::Replied { .. } | Turn::Closing { .. } => {
            if let Some(message) = session.messages().last() {
                println!("{}", message.content);
            }
        }
        Turn::ValidationRequested => {
            if let Some(message) = session.messages().last() {
                println!("{}", message.content);
            }
            println!("{}", catalog.t(lang, "chat.validate_prompt").bold());
            println!(
                "  {} {}   {} {}",
                "/yes".green(),
                catalog.t(lang, "chat.btn_yes"),
                "/no".red(),
                catalog.t(lang, "chat.btn_no")
            );
        }
        Turn::Failed => {
            if let Some(message) = session.messages().last() {
                eprintln!("{}", message.content.red());
            }
        }
    }
}

/// Handles `/photo <path>...`: validates, uploads, reports per-file
/// rejections, and shows the pending count.
async fn attach_photos(
    session: &Arc<Mutex<ConversationSession>>,
    catalog: &Catalog,
    config: &SavlinkConfig,
    args: &str,
) {
    if args.is_empty() {
        eprintln!("{}", "usage: /photo <path> [<path>...]".yellow());
        return;
    }

    let mut candidates = Vec::new();
    for path in args.split_whitespace() {
        match std::fs::read(path) {
            Ok(bytes) => {
                let file_name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                candidates.push(FileCandidate {
                    mime_type: guess_mime(&file_name).to_string(),
                    file_name,
                    bytes,
                });
            }
            Err(e) => {
                eprintln!("{}: {path}: {e}", "error".red());
            }
        }
    }
    if candidates.is_empty() {
        return;
    }

    let mut s = session.lock().await;
    let lang = s.language().to_string();
    match s.upload_files(candidates).await {
        Ok(rejections) => {
            let max_mb = (config.upload.max_file_size_bytes / (1024 * 1024)).to_string();
            for rejection in &rejections {
                let alert = match rejection.reason {
                    RejectionReason::UnsupportedType => catalog.t_with(
                        &lang,
                        "chat.upload_type_not_supported",
                        &[("name", &rejection.file_name)],
                    ),
                    RejectionReason::TooLarge => catalog.t_with(
                        &lang,
                        "chat.upload_file_too_large",
                        &[("name", &rejection.file_name), ("max", &max_mb)],
                    ),
                };
                eprintln!("{}", alert.yellow());
            }
            let pending = s.pending_attachments().len();
            if pending > 0 {
                println!("{}", format!("{pending} file(s) attached").dimmed());
            }
        }
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
        }
    }
}

/// Handles `/lang <tag>`: persists the choice and switches the session.
async fn change_language(session: &Arc<Mutex<ConversationSession>>, tag: &str) {
    if tag.is_empty() {
        let tags: Vec<&str> = savlink_i18n::supported_languages()
            .iter()
            .map(|l| l.tag)
            .collect();
        println!("languages: {}", tags.join(", "));
        return;
    }
    match savlink_i18n::persist_selected(tag) {
        Ok(()) => {
            session.lock().await.set_language(tag);
            println!("{}", format!("language set to {tag}").dimmed());
        }
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
        }
    }
}

/// Maps a file name to the MIME type sent with the upload.
///
/// Unknown extensions map to `application/octet-stream`, which the
/// allow-list then rejects with a user-visible alert.
fn guess_mime(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref().and_then(|e| e.to_str()) {
        Some("jpg") => "image/jpg",
        Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}
