// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::engine::ScanMode;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 12;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    workers: usize,
    silent: bool,
    output_path: PathBuf,
    timeout: u64,
    skip_threshold: Duration,
    report_threshold: Duration,
    progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            silent: false,
            output_path: PathBuf::from("results.txt"),
            timeout: DEFAULT_TIMEOUT_SECS,
            skip_threshold: Duration::from_secs(3),
            report_threshold: Duration::from_secs(8),
            progress: false,
        }
    }

    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    /// Number of worker tasks. Never less than one.
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn mode(&self) -> ScanMode {
        if self.silent {
            ScanMode::Silent
        } else {
            ScanMode::Normal
        }
    }

    pub fn set_output_path<P: Into<PathBuf>>(&mut self, output_path: P) {
        self.output_path = output_path.into();
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn set_skip_threshold(&mut self, skip_threshold: Duration) {
        self.skip_threshold = skip_threshold;
    }

    pub fn skip_threshold(&self) -> Duration {
        self.skip_threshold
    }

    pub fn set_report_threshold(&mut self, report_threshold: Duration) {
        self.report_threshold = report_threshold;
    }

    pub fn report_threshold(&self) -> Duration {
        self.report_threshold
    }

    pub fn set_progress(&mut self, progress: bool) {
        self.progress = progress;
    }

    pub fn progress(&self) -> bool {
        self.progress
    }
}
