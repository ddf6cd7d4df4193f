// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Service
//!
//! Orchestrates the contact store, the visibility cache and the directory:
//! - [`SyncService::sync_contacts`] reconciles the store with the directory
//! - [`SyncService::add_require_visible`] / [`SyncService::already_in_cache`]
//!   manage pending visibility requests
//! - [`SyncService::push_msg`] sends notifications to named recipients
//! - [`SyncService::analysis_contacts`] reports drift without writing
//!
//! # Example
//!
//! ```ignore
//! use saga_core::{MemoryVisibilityCache, MockDirectoryClient, Storage, SyncContext, SyncService};
//!
//! let service = SyncService::new(
//!     Storage::in_memory()?,
//!     MemoryVisibilityCache::new(),
//!     MockDirectoryClient::new(),
//! );
//! let ctx = SyncContext::background();
//! let report = service.sync_contacts(&ctx)?;
//! ```
//!
//! Every operation is synchronous and runs its calls sequentially; the
//! service does no locking of its own.

mod analysis;
mod error;
mod push;
mod report;
mod sync;
mod visibility;

pub use error::{SagaError, SagaResult};
pub use report::{ContactAnalysis, PushReport, SyncReport};

use crate::cache::VisibilityCache;
use crate::contact::ContactInfo;
use crate::directory::DirectoryClient;
use crate::storage::Storage;

/// Contact sync service.
///
/// Owns its collaborators; build a fresh one per store/cache/directory set.
pub struct SyncService<C: VisibilityCache, D: DirectoryClient> {
    storage: Storage,
    cache: C,
    directory: D,
}

impl<C: VisibilityCache, D: DirectoryClient> SyncService<C, D> {
    /// Creates a new SyncService.
    pub fn new(storage: Storage, cache: C, directory: D) -> Self {
        SyncService {
            storage,
            cache,
            directory,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Lists all stored contacts, ordered by user name.
    pub fn list_contacts(&self) -> SagaResult<Vec<ContactInfo>> {
        Ok(self.storage.list_contacts()?)
    }

    /// Splits the service back into its collaborators.
    pub fn into_parts(self) -> (Storage, C, D) {
        (self.storage, self.cache, self.directory)
    }
}
