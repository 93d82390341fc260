#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use wishlist::WishlistApp;
use wishlist_core::FixedClock;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
}

/// Fresh data directory that outlives the test body.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// App over `base` whose clock is pinned to `now`.
pub fn app_at(base: &PathBuf, now: DateTime<Utc>) -> WishlistApp {
    WishlistApp::with_base_dir(base, Arc::new(FixedClock(now))).expect("open wishlist app")
}
