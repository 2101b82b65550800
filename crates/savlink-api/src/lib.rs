// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the savlink support backend.
//!
//! Covers the chat, ticket, upload, dashboard and voice endpoints, plus
//! normalization of attachment URLs the backend hands back.

pub mod client;
pub mod types;
pub mod url;

pub use client::ApiClient;
pub use types::{
    ChatRequest, ChatResponse, CreateTicketRequest, CreateTicketResponse, TicketListResponse,
    TranscribeResponse, UploadPart, UploadResponse, UploadedFile,
};
pub use url::absolute_url;
