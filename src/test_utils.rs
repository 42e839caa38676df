//! Shared test utilities for FocusFlow.
//!
//! This module provides common setup functions used across test modules.

#![cfg(test)]

use crate::store::{migrations, Store};
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

/// Create a temporary test store with migrations applied.
///
/// Returns a tuple of (store, TempDir). The TempDir must be kept alive for
/// the duration of the test to prevent the database file from being deleted.
pub fn setup_test_store() -> (Arc<Mutex<Store>>, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test store");
    let path = dir.path().join("test.db");
    let store = Store::open(&path).expect("Failed to open test store");
    migrations::run(store.connection()).expect("Failed to run migrations on test store");
    (Arc::new(Mutex::new(store)), dir)
}
