// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Saga Core Library
//!
//! Keeps the saga admin system's contact list in step with an enterprise
//! messaging directory, tracks which users can see the saga application,
//! and pushes notification messages to named recipients.

pub mod cache;
pub mod config;
pub mod contact;
pub mod context;
pub mod directory;
pub mod service;
pub mod storage;

pub use cache::{CacheError, FileVisibilityCache, MemoryVisibilityCache, VisibilityCache};
pub use config::{ConfigError, DirectoryConfig, SagaConfig};
pub use contact::{ContactInfo, DirectoryUser, RequireVisibleUser};
pub use context::{ContextError, SyncContext};
#[cfg(feature = "http-client")]
pub use directory::HttpDirectoryClient;
pub use directory::{DirectoryClient, DirectoryError, MockDirectoryClient};
pub use service::{ContactAnalysis, PushReport, SagaError, SagaResult, SyncReport, SyncService};
pub use storage::{Storage, StorageError};
