// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `savlink dashboard` command implementation.
//!
//! Fetches the ticket list once, applies the command-line filters and
//! prints a stats header plus a colored table. `--dossier` bypasses the
//! table and prints one case file as JSON.

use std::sync::Arc;

use colored::Colorize;
use savlink_api::ApiClient;
use savlink_config::SavlinkConfig;
use savlink_core::{Priority, SavlinkError, TicketStatus};
use savlink_dashboard::{Dashboard, PriorityFilter, StatusFilter, TicketFilter};
use savlink_i18n::Catalog;

/// Runs the `savlink dashboard` command.
pub async fn run_dashboard(
    config: SavlinkConfig,
    priority: Option<Priority>,
    status: Option<&str>,
    dossier: Option<&str>,
) -> Result<(), SavlinkError> {
    let api = Arc::new(ApiClient::new(&config.api)?);
    let catalog = Arc::new(Catalog::new()?);
    let language =
        savlink_i18n::load_selected().unwrap_or_else(|| config.chat.language.clone());

    let mut dashboard = Dashboard::new(api, Arc::clone(&catalog), language.clone());

    if let Some(ticket_id) = dossier {
        let dossier = dashboard.dossier(ticket_id).await?;
        let rendered = serde_json::to_string_pretty(&dossier)
            .map_err(|e| SavlinkError::Internal(format!("dossier render failed: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    let status = status.map(parse_status).transpose()?;
    dashboard.set_filter(TicketFilter {
        priority: priority.map(PriorityFilter::Only).unwrap_or_default(),
        status: status.map(StatusFilter::Only).unwrap_or_default(),
    });

    dashboard.refresh().await;
    if let Some(error) = dashboard.error() {
        return Err(SavlinkError::api(error.to_string()));
    }

    print_stats(&dashboard, &catalog, &language);
    print_table(&dashboard, &catalog, &language);
    Ok(())
}

/// Maps a wire status name to the typed status.
fn parse_status(value: &str) -> Result<TicketStatus, SavlinkError> {
    let all = [
        TicketStatus::EscalatedToHuman,
        TicketStatus::AwaitingTechnician,
        TicketStatus::AutoResolved,
        TicketStatus::EvidenceCollection,
        TicketStatus::Pending,
    ];
    all.iter()
        .find(|s| s.as_str() == value)
        .cloned()
        .ok_or_else(|| {
            let names: Vec<&str> = all.iter().map(|s| s.as_str()).collect();
            SavlinkError::Validation {
                message: format!("unknown status {value:?}; expected one of: {}", names.join(", ")),
            }
        })
}

/// Prints the aggregate counters over the unfiltered list.
fn print_stats(dashboard: &Dashboard, catalog: &Catalog, language: &str) {
    let stats = dashboard.stats();
    println!("{}", catalog.t(language, "dashboard.title").bold());
    println!(
        "{}: {}   {}: {}   {}: {}   {}: {}",
        catalog.t(language, "dashboard.stats.total_label"),
        stats.total.to_string().bold(),
        catalog.t(language, "dashboard.stats.p0_label"),
        stats.p0.to_string().red(),
        catalog.t(language, "dashboard.stats.p1_label"),
        stats.p1.to_string().yellow(),
        catalog.t(language, "dashboard.stats.auto_resolved"),
        stats.auto_resolved.to_string().green(),
    );
    println!();
}

/// Prints the filtered ticket table.
fn print_table(dashboard: &Dashboard, catalog: &Catalog, language: &str) {
    let tickets = dashboard.filtered();
    if tickets.is_empty() {
        println!("{}", "no tickets".dimmed());
        return;
    }

    println!(
        "{:<12} {:<20} {:<34} {:<9} {:<22} {}",
        catalog.t(language, "dashboard.columns.ticket").bold(),
        catalog.t(language, "dashboard.columns.client").bold(),
        catalog.t(language, "dashboard.columns.issue").bold(),
        catalog.t(language, "dashboard.columns.priority").bold(),
        catalog.t(language, "dashboard.columns.status").bold(),
        catalog.t(language, "dashboard.columns.date").bold(),
    );
    for ticket in &tickets {
        let priority = match ticket.priority {
            Priority::P0 => ticket.priority.to_string().red().bold(),
            Priority::P1 => ticket.priority.to_string().yellow(),
            Priority::P2 => ticket.priority.to_string().normal(),
            Priority::P3 => ticket.priority.to_string().dimmed(),
        };
        println!(
            "{:<12} {:<20} {:<34} {:<9} {:<22} {}",
            ticket.ticket_id,
            truncate(&ticket.customer_name, 19),
            truncate(&ticket.problem_description, 33),
            priority,
            dashboard.status_label(&ticket.status),
            ticket.created_at.format("%Y-%m-%d"),
        );
    }
}

/// Shortens a cell to fit its column, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
