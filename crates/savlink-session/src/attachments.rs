// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pending-attachment lifecycle and client-side upload validation.
//!
//! Files are validated one by one against the configured MIME allow-list
//! and size cap before any request is made; each rejection names the file
//! so the user sees exactly what was refused and why. The accepted batch
//! is sent as a single multipart request by the caller.

use savlink_config::UploadConfig;
use savlink_core::Attachment;

/// A file the user picked, before validation and upload.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Why a file was refused client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// MIME type not in the allow-list.
    UnsupportedType,
    /// Larger than the per-file size cap.
    TooLarge,
}

/// One per-file rejection, for a user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub file_name: String,
    pub reason: RejectionReason,
}

/// Holds uploaded-but-not-yet-sent attachment descriptors.
///
/// The pending list drains on message send and ticket creation, and clears
/// on conversation stop.
#[derive(Debug)]
pub struct AttachmentManager {
    config: UploadConfig,
    pending: Vec<Attachment>,
}

impl AttachmentManager {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    /// Splits candidates into the accepted batch and per-file rejections.
    ///
    /// Pure: no network, no state change.
    pub fn validate(
        &self,
        candidates: Vec<FileCandidate>,
    ) -> (Vec<FileCandidate>, Vec<Rejection>) {
        let mut accepted = Vec::new();
        let mut rejections = Vec::new();
        for candidate in candidates {
            if !self
                .config
                .allowed_mime_types
                .iter()
                .any(|m| m.eq_ignore_ascii_case(&candidate.mime_type))
            {
                rejections.push(Rejection {
                    file_name: candidate.file_name,
                    reason: RejectionReason::UnsupportedType,
                });
            } else if candidate.bytes.len() as u64 > self.config.max_file_size_bytes {
                rejections.push(Rejection {
                    file_name: candidate.file_name,
                    reason: RejectionReason::TooLarge,
                });
            } else {
                accepted.push(candidate);
            }
        }
        (accepted, rejections)
    }

    /// Appends descriptors returned by a successful upload.
    pub fn accept(&mut self, files: Vec<Attachment>) {
        self.pending.extend(files);
    }

    /// The files waiting to ride along with the next message.
    pub fn pending(&self) -> &[Attachment] {
        &self.pending
    }

    /// Drops one pending file locally; the uploaded copy is untouched.
    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        if index < self.pending.len() {
            Some(self.pending.remove(index))
        } else {
            None
        }
    }

    /// Empties the pending list, returning what was in it.
    pub fn drain(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.pending)
    }

    /// Empties the pending list, discarding contents.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// The configured per-file cap, for rejection messages.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.config.max_file_size_bytes
    }
}
