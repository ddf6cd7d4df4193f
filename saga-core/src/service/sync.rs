// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconciliation of the contact store against the directory.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use super::{SagaResult, SyncReport, SyncService};
use crate::cache::VisibilityCache;
use crate::contact::{is_valid_user_id, DirectoryUser, RequireVisibleUser};
use crate::context::SyncContext;
use crate::directory::DirectoryClient;

impl<C: VisibilityCache, D: DirectoryClient> SyncService<C, D> {
    /// Runs a full reconciliation pass.
    ///
    /// Contacts the directory no longer lists are deleted, new directory
    /// users are created, and drifted names are replaced with the
    /// directory's. The visibility flag of every remaining contact is
    /// recomputed as "visible in the directory or pending in the cache" and
    /// only written when it changes. Pending requests the directory now
    /// confirms, or whose user left, are dropped from the cache.
    ///
    /// The context is checked before every write; an interrupted pass
    /// leaves the records it already wrote in place.
    pub fn sync_contacts(&self, ctx: &SyncContext) -> SagaResult<SyncReport> {
        ctx.check()?;

        let fetched = self.directory.list_users(ctx)?;
        let mut report = SyncReport {
            fetched: fetched.len(),
            ..Default::default()
        };

        // BTreeMap keeps creation order stable across runs.
        let mut directory: BTreeMap<String, DirectoryUser> = BTreeMap::new();
        for user in fetched {
            if !is_valid_user_id(&user.user_id) {
                warn!(name = %user.name, "skipping directory entry without user ID");
                report.skipped += 1;
                continue;
            }
            directory.insert(user.user_id.clone(), user);
        }

        let visible = self.directory.visible_user_ids(ctx)?;
        let pending = self.cache.require_visible_users(ctx)?;
        let should_be_visible =
            |user_id: &str| visible.contains(user_id) || pending.contains_key(user_id);

        let mut seen: HashSet<String> = HashSet::new();
        for mut contact in self.storage.list_contacts()? {
            ctx.check()?;

            let Some(user) = directory.get(&contact.user_id) else {
                self.storage.delete_contact(&contact.user_id)?;
                debug!(user_id = %contact.user_id, "deleted contact absent from directory");
                report.deleted += 1;
                continue;
            };

            let mut dirty = false;
            if contact.refresh_from(user) {
                debug!(user_id = %contact.user_id, "refreshed contact names");
                report.updated += 1;
                dirty = true;
            }

            let visible_now = should_be_visible(contact.user_id.as_str());
            if contact.visible_saga != visible_now {
                debug!(user_id = %contact.user_id, visible = visible_now, "visibility changed");
                contact.visible_saga = visible_now;
                report.visibility_changed += 1;
                dirty = true;
            }

            if dirty {
                self.storage.update_contact(&contact)?;
            }
            seen.insert(contact.user_id);
        }

        for (user_id, user) in &directory {
            if seen.contains(user_id) {
                continue;
            }
            ctx.check()?;

            let mut contact = user.to_contact();
            contact.visible_saga = should_be_visible(user_id.as_str());
            self.storage.create_contact(&contact)?;
            debug!(user_id = %user_id, "created contact");
            report.created += 1;
        }

        self.settle_pending(ctx, &pending, &visible, &directory, &mut report)?;

        info!(
            fetched = report.fetched,
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            visibility_changed = report.visibility_changed,
            pending_confirmed = report.pending_confirmed,
            pending_dropped = report.pending_dropped,
            "contact sync finished"
        );
        Ok(report)
    }

    /// Drops pending requests that are confirmed or no longer apply.
    fn settle_pending(
        &self,
        ctx: &SyncContext,
        pending: &HashMap<String, RequireVisibleUser>,
        visible: &HashSet<String>,
        directory: &BTreeMap<String, DirectoryUser>,
        report: &mut SyncReport,
    ) -> SagaResult<()> {
        for user_id in pending.keys() {
            if visible.contains(user_id) {
                if self.cache.remove_require_visible_user(ctx, user_id)? {
                    debug!(user_id = %user_id, "visibility confirmed by directory");
                    report.pending_confirmed += 1;
                }
            } else if !directory.contains_key(user_id)
                && self.cache.remove_require_visible_user(ctx, user_id)?
            {
                debug!(user_id = %user_id, "dropped request for user outside directory");
                report.pending_dropped += 1;
            }
        }
        Ok(())
    }
}
