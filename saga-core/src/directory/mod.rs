// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory Client
//!
//! Access to the enterprise messaging platform that is the source of truth
//! for contacts.
//!
//! # Architecture
//!
//! - **`DirectoryClient` trait**: the four calls the sync service needs
//! - **`HttpDirectoryClient`**: blocking HTTP client for a WeCom-style API
//!   (behind the `http-client` feature)
//! - **`MockDirectoryClient`**: in-memory directory for tests and dry runs
//!
//! # Example
//!
//! ```ignore
//! use saga_core::directory::{DirectoryClient, MockDirectoryClient};
//! use saga_core::{DirectoryUser, SyncContext};
//!
//! let directory = MockDirectoryClient::new();
//! directory.add_user(DirectoryUser::new("001134", "zhangsan", "zs"));
//! directory.set_visible("001134", true);
//!
//! let ctx = SyncContext::background();
//! let users = directory.list_users(&ctx)?;
//! directory.send_text(&ctx, &["001134".to_string()], "build finished")?;
//! ```

#[cfg(feature = "http-client")]
mod http;
mod mock;

#[cfg(feature = "http-client")]
pub use http::HttpDirectoryClient;
pub use mock::{MockDirectoryClient, SentMessage};

use std::collections::HashSet;

use thiserror::Error;

use crate::contact::DirectoryUser;
use crate::context::{ContextError, SyncContext};

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors returned by a directory client.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network/request error
    #[cfg(feature = "http-client")]
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API answered with a non-zero error code
    #[error("API error {code}: {message}")]
    Api {
        /// Platform error code
        code: i64,
        /// Platform error message
        message: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Client misconfigured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Directory could not be reached or refused service
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    /// The request context stopped the call
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// The authoritative contact directory.
///
/// Calls are blocking and bounded by the context's deadline.
pub trait DirectoryClient: Send {
    /// Returns every user in the directory.
    fn list_users(&self, ctx: &SyncContext) -> DirectoryResult<Vec<DirectoryUser>>;

    /// Looks up one user. `Ok(None)` means the directory has no such user.
    fn get_user(&self, ctx: &SyncContext, user_id: &str) -> DirectoryResult<Option<DirectoryUser>>;

    /// Returns the IDs of users the saga application is visible to.
    fn visible_user_ids(&self, ctx: &SyncContext) -> DirectoryResult<HashSet<String>>;

    /// Sends a text message to `user_ids`.
    ///
    /// Returns the IDs the directory refused to deliver to.
    fn send_text(
        &self,
        ctx: &SyncContext,
        user_ids: &[String],
        content: &str,
    ) -> DirectoryResult<Vec<String>>;
}
