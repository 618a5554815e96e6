// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Fieldport booking portal.
//!
//! This crate provides the domain types, the error type, and the
//! [`JobDirectory`] trait that both backend providers (fixture and
//! ServiceM8) implement. The gateway depends only on this crate, so
//! provider selection is a startup-time injection concern.

pub mod directory;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use directory::JobDirectory;
pub use error::FieldportError;
pub use types::{ApiResponse, Attachment, Customer, Job, Message, MessageSender};
