//! In-memory visibility cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{CacheError, CacheResult, VisibilityCache};
use crate::contact::{ContactInfo, RequireVisibleUser};
use crate::context::SyncContext;

/// Visibility cache that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryVisibilityCache {
    entries: Mutex<HashMap<String, RequireVisibleUser>>,
}

impl MemoryVisibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, HashMap<String, RequireVisibleUser>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("lock poisoned".into()))
    }
}

impl VisibilityCache for MemoryVisibilityCache {
    fn set_require_visible_user(
        &self,
        ctx: &SyncContext,
        contact: &ContactInfo,
    ) -> CacheResult<()> {
        ctx.check()?;
        self.lock()?
            .insert(contact.user_id.clone(), RequireVisibleUser::from(contact));
        Ok(())
    }

    fn require_visible_users(
        &self,
        ctx: &SyncContext,
    ) -> CacheResult<HashMap<String, RequireVisibleUser>> {
        ctx.check()?;
        Ok(self.lock()?.clone())
    }

    fn remove_require_visible_user(&self, ctx: &SyncContext, user_id: &str) -> CacheResult<bool> {
        ctx.check()?;
        Ok(self.lock()?.remove(user_id).is_some())
    }

    fn contains(&self, ctx: &SyncContext, user_id: &str) -> CacheResult<bool> {
        ctx.check()?;
        Ok(self.lock()?.contains_key(user_id))
    }
}
