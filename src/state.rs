// File: state.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Counters shared by all workers of one run.
#[derive(Debug)]
pub struct ScanState {
    targets: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    reported: AtomicUsize,
    vulnerable: AtomicUsize,
    start_time: Mutex<DateTime<Utc>>,
    end_time: Mutex<Option<DateTime<Utc>>>,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            targets: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            reported: AtomicUsize::new(0),
            vulnerable: AtomicUsize::new(0),
            start_time: Mutex::new(Utc::now()),
            end_time: Mutex::new(None),
        }
    }

    /// Counts a non-empty URL handed to the engine. Blank lines are never counted.
    pub fn add_target(&self) {
        self.targets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_reported(&self) {
        self.reported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_vulnerable(&self) {
        self.vulnerable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn targets(&self) -> usize {
        self.targets.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn reported(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }

    pub fn vulnerable(&self) -> usize {
        self.vulnerable.load(Ordering::Relaxed)
    }

    pub fn mark_started(&self) {
        let mut start = self.start_time.lock().unwrap_or_else(|e| e.into_inner());
        *start = Utc::now();
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        *self.start_time.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn mark_finished(&self) {
        let mut end = self.end_time.lock().unwrap_or_else(|e| e.into_inner());
        *end = Some(Utc::now());
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        *self.end_time.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn summary(&self) -> String {
        let start = self.start_time();
        let end = self.end_time().unwrap_or_else(Utc::now);
        let elapsed = (end - start).num_milliseconds();
        format!(
            "{} URLs. Started at {} / Ended at {}. {} ms. Skipped: {}. Failed: {}. Reported: {}. Suspicious: {}.",
            self.targets(),
            start.format("%Y-%m-%d %H:%M:%S"),
            end.format("%Y-%m-%d %H:%M:%S"),
            elapsed,
            self.skipped(),
            self.failed(),
            self.reported(),
            self.vulnerable()
        )
    }
}
