// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration Tests for Saga Core
//!
//! These tests drive the sync service end to end against an in-memory
//! store, a memory cache and a mock directory.
//!
//! Run with: cargo test --test integration

#[path = "../common/mod.rs"]
mod common;

mod analysis_workflow_test;
mod push_workflow_test;
mod sync_workflow_test;
mod visibility_workflow_test;
