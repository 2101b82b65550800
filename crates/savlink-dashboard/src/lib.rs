// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket dashboard: fetch the list, filter it, aggregate counters.

pub mod filter;
pub mod service;
pub mod stats;

pub use filter::{PriorityFilter, StatusFilter, TicketFilter};
pub use service::Dashboard;
pub use stats::TicketStats;
