// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! Contact records as kept in the local store, the pending-visibility
//! entries kept in the cache, and the user entries returned by the
//! directory.

use serde::{Deserialize, Serialize};

/// A contact known to saga.
///
/// `id` is assigned by the store and is empty until the record has been
/// persisted. `user_id` is the directory identity and is unique.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Store-assigned record ID
    pub id: String,
    /// Directory user ID (unique identity key)
    pub user_id: String,
    /// Directory display name
    pub user_name: String,
    /// Alias / nickname from the directory
    pub nick_name: String,
    /// Whether the saga application is visible to this user
    pub visible_saga: bool,
}

impl ContactInfo {
    /// Creates an unsaved, not-yet-visible contact.
    pub fn new(user_id: &str, user_name: &str, nick_name: &str) -> Self {
        ContactInfo {
            id: String::new(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            nick_name: nick_name.to_string(),
            visible_saga: false,
        }
    }

    /// Compares only the fields that come from the directory.
    ///
    /// The store-assigned `id` and the internal `visible_saga` flag are
    /// ignored, so a freshly fetched record compares equal to its stored
    /// counterpart as long as the directory has not changed it.
    pub fn almost_equal(&self, other: &ContactInfo) -> bool {
        self.user_id == other.user_id
            && self.user_name == other.user_name
            && self.nick_name == other.nick_name
    }

    /// Replaces the directory-sourced fields with those of `user`.
    ///
    /// Returns true if anything changed.
    pub fn refresh_from(&mut self, user: &DirectoryUser) -> bool {
        let changed = self.user_name != user.name || self.nick_name != user.alias;
        self.user_name = user.name.clone();
        self.nick_name = user.alias.clone();
        changed
    }
}

/// A pending request to make the saga application visible to a user.
///
/// Stored in the visibility cache under the user's directory ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequireVisibleUser {
    pub user_name: String,
    pub nick_name: String,
}

impl From<&ContactInfo> for RequireVisibleUser {
    fn from(contact: &ContactInfo) -> Self {
        RequireVisibleUser {
            user_name: contact.user_name.clone(),
            nick_name: contact.nick_name.clone(),
        }
    }
}

/// One user entry from the authoritative directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: String,
}

impl DirectoryUser {
    pub fn new(user_id: &str, name: &str, alias: &str) -> Self {
        DirectoryUser {
            user_id: user_id.to_string(),
            name: name.to_string(),
            alias: alias.to_string(),
        }
    }

    /// Converts the entry into an unsaved contact record.
    pub fn to_contact(&self) -> ContactInfo {
        ContactInfo::new(&self.user_id, &self.name, &self.alias)
    }
}

/// Returns true if `user_id` is usable as an identity key.
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.trim().is_empty()
}
