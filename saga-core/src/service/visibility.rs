// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pending visibility requests.

use tracing::{debug, info};

use super::{SagaError, SagaResult, SyncService};
use crate::cache::VisibilityCache;
use crate::contact::{is_valid_user_id, ContactInfo};
use crate::context::SyncContext;
use crate::directory::DirectoryClient;

impl<C: VisibilityCache, D: DirectoryClient> SyncService<C, D> {
    /// Queues a request to make the application visible to `user_id`.
    ///
    /// The user must be known to the store or, failing that, to the
    /// directory. Re-adding a pending user is a no-op.
    pub fn add_require_visible(&self, ctx: &SyncContext, user_id: &str) -> SagaResult<()> {
        ctx.check()?;
        if !is_valid_user_id(user_id) {
            return Err(SagaError::Validation("user ID is empty".into()));
        }

        if self.cache.contains(ctx, user_id)? {
            debug!(user_id, "visibility request already pending");
            return Ok(());
        }

        let contact = self.resolve_user(ctx, user_id)?;
        self.cache.set_require_visible_user(ctx, &contact)?;
        info!(user_id, user_name = %contact.user_name, "queued visibility request");
        Ok(())
    }

    /// Returns true if a visibility request is pending for `user_id`.
    pub fn already_in_cache(&self, ctx: &SyncContext, user_id: &str) -> SagaResult<bool> {
        ctx.check()?;
        Ok(self.cache.contains(ctx, user_id)?)
    }

    /// Looks a user up in the store, then in the directory.
    fn resolve_user(&self, ctx: &SyncContext, user_id: &str) -> SagaResult<ContactInfo> {
        match self.storage.query_user_by_id(user_id) {
            Ok(contact) => return Ok(contact),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        match self.directory.get_user(ctx, user_id)? {
            Some(user) => Ok(user.to_contact()),
            None => Err(SagaError::NotFound(format!("user {}", user_id))),
        }
    }
}
