//! Results returned by service operations.

use serde::Serialize;

/// Outcome of a reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Users returned by the directory.
    pub fetched: usize,
    /// Directory entries ignored for having no usable ID.
    pub skipped: usize,
    /// Contacts added to the store.
    pub created: usize,
    /// Contacts whose names were refreshed.
    pub updated: usize,
    /// Contacts removed because the directory no longer lists them.
    pub deleted: usize,
    /// Contacts whose visibility flag flipped.
    pub visibility_changed: usize,
    /// Pending requests the directory now confirms.
    pub pending_confirmed: usize,
    /// Pending requests for users that left the directory.
    pub pending_dropped: usize,
}

impl SyncReport {
    /// Returns true if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.created == 0
            && self.updated == 0
            && self.deleted == 0
            && self.visibility_changed == 0
            && self.pending_confirmed == 0
            && self.pending_dropped == 0
    }
}

/// Outcome of a message push.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
    /// User IDs the message was delivered to.
    pub delivered: Vec<String>,
    /// Recipient names with no matching contact.
    pub unknown: Vec<String>,
    /// Known users the application is not visible to yet; queued for visibility.
    pub pending_visible: Vec<String>,
    /// User IDs the directory refused.
    pub rejected: Vec<String>,
}

/// Read-only comparison of store, directory and cache.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAnalysis {
    pub store_total: usize,
    pub directory_total: usize,
    /// Stored contacts flagged visible.
    pub visible: usize,
    /// Stored contacts not flagged visible.
    pub invisible: usize,
    /// Pending visibility requests.
    pub pending_visible: usize,
    /// Directory users with no stored contact.
    pub missing_from_store: Vec<String>,
    /// Stored contacts the directory no longer lists.
    pub stale_in_store: Vec<String>,
    /// Contacts whose stored names differ from the directory.
    pub drifted: Vec<String>,
    /// Contacts whose visibility flag disagrees with directory and cache.
    pub visibility_drift: Vec<String>,
}

impl ContactAnalysis {
    /// Returns true if a sync pass would not change any contact record.
    pub fn is_in_sync(&self) -> bool {
        self.missing_from_store.is_empty()
            && self.stale_in_store.is_empty()
            && self.drifted.is_empty()
            && self.visibility_drift.is_empty()
    }
}
