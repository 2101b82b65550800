// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard state: fetch, filter, aggregate.

use std::sync::Arc;

use savlink_api::ApiClient;
use savlink_core::{SavlinkError, Ticket, TicketStatus};
use savlink_i18n::Catalog;
use tracing::{info, warn};

use crate::filter::TicketFilter;
use crate::stats::TicketStats;

/// Holds the fetched ticket list and the active filter.
///
/// A failed refresh keeps the previous list and records the error; the
/// caller retries by calling [`Dashboard::refresh`] again.
pub struct Dashboard {
    api: Arc<ApiClient>,
    catalog: Arc<Catalog>,
    language: String,
    tickets: Vec<Ticket>,
    filter: TicketFilter,
    error: Option<String>,
    loading: bool,
}

impl Dashboard {
    pub fn new(api: Arc<ApiClient>, catalog: Arc<Catalog>, language: impl Into<String>) -> Self {
        Self {
            api,
            catalog,
            language: language.into(),
            tickets: Vec::new(),
            filter: TicketFilter::default(),
            error: None,
            loading: false,
        }
    }

    /// Refetches the ticket list, replacing it wholesale on success.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.tickets().await {
            Ok(response) if response.success => {
                info!(count = response.tickets.len(), "ticket list refreshed");
                self.tickets = response.tickets;
                self.error = None;
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| "ticket list request unsuccessful".to_string());
                warn!(error = %message, "ticket refresh rejected");
                self.error = Some(message);
            }
            Err(e) => {
                warn!(error = %e, "ticket refresh failed");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Fetches one ticket's case file. Independent of the filter state.
    pub async fn dossier(&self, ticket_id: &str) -> Result<serde_json::Value, SavlinkError> {
        self.api.dossier(ticket_id).await
    }

    pub fn set_filter(&mut self, filter: TicketFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &TicketFilter {
        &self.filter
    }

    /// The current filter applied to the full list.
    pub fn filtered(&self) -> Vec<Ticket> {
        self.filter.apply(&self.tickets)
    }

    /// All fetched tickets, unfiltered.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Header counters, always over the unfiltered list.
    pub fn stats(&self) -> TicketStats {
        TicketStats::compute(&self.tickets)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Localized display label for a ticket status.
    pub fn status_label(&self, status: &TicketStatus) -> String {
        self.catalog
            .t(&self.language, &format!("dashboard.status.{}", status.as_str()))
    }
}
