// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification push.

use std::collections::HashSet;

use tracing::{info, warn};

use super::{PushReport, SagaError, SagaResult, SyncService};
use crate::cache::VisibilityCache;
use crate::context::SyncContext;
use crate::directory::DirectoryClient;

impl<C: VisibilityCache, D: DirectoryClient> SyncService<C, D> {
    /// Sends `content` to the contacts named in `user_names`.
    ///
    /// Names are resolved through the store. Users the application is not
    /// visible to yet cannot receive messages; they are queued for
    /// visibility instead. Fails with `NotFound` if no name matches a
    /// contact, and with `Delivery` if the directory rejects the push.
    pub fn push_msg<S: AsRef<str>>(
        &self,
        ctx: &SyncContext,
        user_names: &[S],
        content: &str,
    ) -> SagaResult<PushReport> {
        ctx.check()?;
        if content.trim().is_empty() {
            return Err(SagaError::Validation("message content is empty".into()));
        }

        let mut seen = HashSet::new();
        let names: Vec<&str> = user_names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty() && seen.insert(*n))
            .collect();
        if names.is_empty() {
            return Err(SagaError::Validation("no recipients given".into()));
        }

        let mut report = PushReport::default();
        let mut recipients = Vec::new();
        for name in names {
            match self.storage.query_user_by_name(name)? {
                None => report.unknown.push(name.to_string()),
                Some(contact) if contact.visible_saga => recipients.push(contact.user_id),
                Some(contact) => {
                    self.add_require_visible(ctx, &contact.user_id)?;
                    report.pending_visible.push(contact.user_id);
                }
            }
        }

        if !report.unknown.is_empty() {
            warn!(names = ?report.unknown, "no contact for recipients");
        }

        if recipients.is_empty() {
            if report.pending_visible.is_empty() {
                return Err(SagaError::NotFound(format!(
                    "no contact for recipients: {}",
                    report.unknown.join(", ")
                )));
            }
            warn!(
                pending = ?report.pending_visible,
                "no recipient can receive messages yet"
            );
            return Ok(report);
        }

        let rejected = self
            .directory
            .send_text(ctx, &recipients, content)
            .map_err(SagaError::delivery)?;

        report.delivered = recipients
            .into_iter()
            .filter(|id| !rejected.contains(id))
            .collect();
        report.rejected = rejected;

        if !report.rejected.is_empty() {
            warn!(rejected = ?report.rejected, "directory refused some recipients");
        }
        info!(delivered = report.delivered.len(), "pushed message");
        Ok(report)
    }
}
