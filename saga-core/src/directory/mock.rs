//! Mock directory for testing.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use super::{DirectoryClient, DirectoryError, DirectoryResult};
use crate::contact::DirectoryUser;
use crate::context::SyncContext;

/// A message recorded by [`MockDirectoryClient::send_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub user_ids: Vec<String>,
    pub content: String,
}

#[derive(Debug, Default)]
struct MockState {
    users: Vec<DirectoryUser>,
    visible: HashSet<String>,
    rejected: HashSet<String>,
    sent: Vec<SentMessage>,
    fail_fetch: bool,
    fail_send: bool,
}

/// In-memory directory.
///
/// Holds a user list and a visible set, records every sent message, and
/// can be switched into failure modes to exercise error paths.
#[derive(Debug, Default)]
pub struct MockDirectoryClient {
    state: Mutex<MockState>,
}

impl MockDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `users`, none of them visible.
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        let client = Self::new();
        for user in users {
            client.add_user(user);
        }
        client
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens inside a failing test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a user, replacing any existing entry with the same ID.
    pub fn add_user(&self, user: DirectoryUser) {
        let mut state = self.state();
        match state.users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => *existing = user,
            None => state.users.push(user),
        }
    }

    /// Appends a user as-is, even if its ID is already listed.
    ///
    /// Lets tests reproduce a directory that returns duplicate entries.
    pub fn push_raw_user(&self, user: DirectoryUser) {
        self.state().users.push(user);
    }

    /// Removes a user. Returns false if it wasn't there.
    pub fn remove_user(&self, user_id: &str) -> bool {
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| u.user_id != user_id);
        state.visible.remove(user_id);
        state.users.len() != before
    }

    /// Marks the application as visible (or not) to `user_id`.
    pub fn set_visible(&self, user_id: &str, visible: bool) {
        let mut state = self.state();
        if visible {
            state.visible.insert(user_id.to_string());
        } else {
            state.visible.remove(user_id);
        }
    }

    /// Makes `send_text` report `user_id` as undeliverable.
    pub fn reject_user(&self, user_id: &str) {
        self.state().rejected.insert(user_id.to_string());
    }

    /// Makes the read calls fail until reset.
    pub fn set_fetch_failure(&self, fail: bool) {
        self.state().fail_fetch = fail;
    }

    /// Makes `send_text` fail until reset.
    pub fn set_send_failure(&self, fail: bool) {
        self.state().fail_send = fail;
    }

    /// Messages sent so far, oldest first.
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.state().sent.clone()
    }

    fn check_fetch(&self, ctx: &SyncContext) -> DirectoryResult<()> {
        ctx.check()?;
        if self.state().fail_fetch {
            return Err(DirectoryError::Unavailable("simulated fetch failure".into()));
        }
        Ok(())
    }
}

impl DirectoryClient for MockDirectoryClient {
    fn list_users(&self, ctx: &SyncContext) -> DirectoryResult<Vec<DirectoryUser>> {
        self.check_fetch(ctx)?;
        Ok(self.state().users.clone())
    }

    fn get_user(&self, ctx: &SyncContext, user_id: &str) -> DirectoryResult<Option<DirectoryUser>> {
        self.check_fetch(ctx)?;
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned())
    }

    fn visible_user_ids(&self, ctx: &SyncContext) -> DirectoryResult<HashSet<String>> {
        self.check_fetch(ctx)?;
        Ok(self.state().visible.clone())
    }

    fn send_text(
        &self,
        ctx: &SyncContext,
        user_ids: &[String],
        content: &str,
    ) -> DirectoryResult<Vec<String>> {
        ctx.check()?;
        let mut state = self.state();
        if state.fail_send {
            return Err(DirectoryError::Unavailable("simulated send failure".into()));
        }

        let rejected: Vec<String> = user_ids
            .iter()
            .filter(|id| state.rejected.contains(*id))
            .cloned()
            .collect();

        state.sent.push(SentMessage {
            user_ids: user_ids.to_vec(),
            content: content.to_string(),
        });

        Ok(rejected)
    }
}
