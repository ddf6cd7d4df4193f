// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Visibility Cache
//!
//! Pending visibility requests, keyed by directory user ID. An entry means
//! someone asked for the saga application to be made visible to that user
//! and the directory has not confirmed it yet.
//!
//! Two backends are provided:
//! - [`MemoryVisibilityCache`] for tests and one-shot runs
//! - [`FileVisibilityCache`], a JSON file rewritten atomically on change

mod file;
mod memory;

pub use file::FileVisibilityCache;
pub use memory::MemoryVisibilityCache;

use std::collections::HashMap;
use std::io;

use thiserror::Error;

use crate::contact::{ContactInfo, RequireVisibleUser};
use crate::context::{ContextError, SyncContext};

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur with the visibility cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request context stopped the operation
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Cache state is unusable (e.g. a poisoned lock)
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Storage for pending visibility requests.
pub trait VisibilityCache: Send {
    /// Records a pending visibility request for `contact`, keyed by its user ID.
    ///
    /// Overwrites any existing entry for the same user.
    fn set_require_visible_user(&self, ctx: &SyncContext, contact: &ContactInfo)
        -> CacheResult<()>;

    /// Returns every pending request.
    fn require_visible_users(
        &self,
        ctx: &SyncContext,
    ) -> CacheResult<HashMap<String, RequireVisibleUser>>;

    /// Drops the pending request for `user_id`. Returns false if there was none.
    fn remove_require_visible_user(&self, ctx: &SyncContext, user_id: &str) -> CacheResult<bool>;

    /// Returns true if a request is pending for `user_id`.
    fn contains(&self, ctx: &SyncContext, user_id: &str) -> CacheResult<bool> {
        Ok(self.require_visible_users(ctx)?.contains_key(user_id))
    }
}
