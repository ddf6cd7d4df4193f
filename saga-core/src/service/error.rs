// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Service Error Types
//!
//! Unified error type for the sync service.

use thiserror::Error;

use crate::cache::CacheError;
use crate::context::ContextError;
use crate::directory::DirectoryError;
use crate::storage::StorageError;

/// Unified error type for saga operations.
#[derive(Error, Debug)]
pub enum SagaError {
    /// Unknown identity.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Message push failed.
    #[error("delivery error: {0}")]
    Delivery(#[source] DirectoryError),

    /// Contact store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StorageError),

    /// Visibility cache operation failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Directory read failed.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// The request context was cancelled or ran out of time.
    #[error("{0}")]
    Context(#[from] ContextError),
}

impl SagaError {
    /// Wraps a failed push, keeping context errors distinct from delivery failures.
    pub(crate) fn delivery(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Context(e) => SagaError::Context(e),
            other => SagaError::Delivery(other),
        }
    }
}

/// Result type for saga operations.
pub type SagaResult<T> = Result<T, SagaError>;
