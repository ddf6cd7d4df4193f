// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only contact analysis.

use std::collections::{HashMap, HashSet};

use tracing::info;

use super::{ContactAnalysis, SagaResult, SyncService};
use crate::cache::VisibilityCache;
use crate::contact::{is_valid_user_id, DirectoryUser};
use crate::context::SyncContext;
use crate::directory::DirectoryClient;

impl<C: VisibilityCache, D: DirectoryClient> SyncService<C, D> {
    /// Compares store, directory and cache and reports the differences.
    ///
    /// A contact's expected visibility follows the rule sync applies:
    /// visible in the directory or pending in the cache.
    ///
    /// Writes nothing. User ID lists in the result are sorted.
    pub fn analysis_contacts(&self, ctx: &SyncContext) -> SagaResult<ContactAnalysis> {
        ctx.check()?;

        let stored = self.storage.list_contacts()?;
        let directory: HashMap<String, DirectoryUser> = self
            .directory
            .list_users(ctx)?
            .into_iter()
            .filter(|u| is_valid_user_id(&u.user_id))
            .map(|u| (u.user_id.clone(), u))
            .collect();
        let visible = self.directory.visible_user_ids(ctx)?;
        let pending = self.cache.require_visible_users(ctx)?;

        let mut analysis = ContactAnalysis {
            store_total: stored.len(),
            directory_total: directory.len(),
            pending_visible: pending.len(),
            ..Default::default()
        };

        let mut stored_ids = HashSet::new();
        for contact in &stored {
            stored_ids.insert(contact.user_id.as_str());
            if contact.visible_saga {
                analysis.visible += 1;
            } else {
                analysis.invisible += 1;
            }

            let Some(user) = directory.get(&contact.user_id) else {
                analysis.stale_in_store.push(contact.user_id.clone());
                continue;
            };
            if !contact.almost_equal(&user.to_contact()) {
                analysis.drifted.push(contact.user_id.clone());
            }

            let should_be_visible =
                visible.contains(&contact.user_id) || pending.contains_key(&contact.user_id);
            if contact.visible_saga != should_be_visible {
                analysis.visibility_drift.push(contact.user_id.clone());
            }
        }

        analysis.missing_from_store = directory
            .keys()
            .filter(|id| !stored_ids.contains(id.as_str()))
            .cloned()
            .collect();

        analysis.missing_from_store.sort();
        analysis.stale_in_store.sort();
        analysis.drifted.sort();
        analysis.visibility_drift.sort();

        info!(
            store = analysis.store_total,
            directory = analysis.directory_total,
            visible = analysis.visible,
            invisible = analysis.invisible,
            pending = analysis.pending_visible,
            missing = analysis.missing_from_store.len(),
            stale = analysis.stale_in_store.len(),
            drifted = analysis.drifted.len(),
            visibility_drift = analysis.visibility_drift.len(),
            "contact analysis"
        );
        Ok(analysis)
    }
}
