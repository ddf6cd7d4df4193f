// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Fixtures shared across test binaries. Every fixture builds fresh
//! collaborators, so tests never share store, cache or directory state.

#![allow(dead_code)]


use saga_core::{
    ContactInfo, DirectoryUser, MemoryVisibilityCache, MockDirectoryClient, Storage, SyncContext,
    SyncService,
};

/// Service wired to an in-memory store, memory cache and mock directory.
pub type TestService = SyncService<MemoryVisibilityCache, MockDirectoryClient>;

pub fn ctx() -> SyncContext {
    SyncContext::background()
}

pub fn create_test_storage() -> Storage {
    Storage::in_memory().unwrap()
}

pub fn create_test_service() -> TestService {
    SyncService::new(
        create_test_storage(),
        MemoryVisibilityCache::new(),
        MockDirectoryClient::new(),
    )
}

/// Service whose directory lists `users` as `(user_id, name, alias)`.
pub fn create_service_with_directory(users: &[(&str, &str, &str)]) -> TestService {
    let directory = MockDirectoryClient::with_users(
        users
            .iter()
            .map(|(id, name, alias)| DirectoryUser::new(id, name, alias))
            .collect(),
    );
    SyncService::new(create_test_storage(), MemoryVisibilityCache::new(), directory)
}

/// Inserts a contact straight into the store and returns it with its ID.
pub fn seed_contact(
    service: &TestService,
    user_id: &str,
    user_name: &str,
    nick_name: &str,
    visible: bool,
) -> ContactInfo {
    let mut contact = ContactInfo::new(user_id, user_name, nick_name);
    contact.visible_saga = visible;
    contact.id = service.storage().create_contact(&contact).unwrap();
    contact
}
