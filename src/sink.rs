// File: sink.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use colored::*;
use indicatif::ProgressBar;
use log::warn;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Console plus append-only result file, shared by every worker.
///
/// Each `record` call holds the lock for exactly one console write and one
/// open/write/flush/close cycle on the file, so lines never interleave and
/// nothing is buffered between calls.
#[derive(Debug)]
pub struct ResultSink {
    output_path: PathBuf,
    lock: Mutex<()>,
    progress: Option<ProgressBar>,
    lines_written: AtomicUsize,
}

impl ResultSink {
    pub fn new<P: Into<PathBuf>>(output_path: P) -> Self {
        Self {
            output_path: output_path.into(),
            lock: Mutex::new(()),
            progress: None,
            lines_written: AtomicUsize::new(0),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written.load(Ordering::Relaxed)
    }

    pub fn record(&self, text: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        self.print(text);

        match self.append(text) {
            Ok(()) => {
                self.lines_written.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                warn!("Could not append to {}: {}", self.output_path.display(), e);
                self.print(&format!("{} {}", "Error writing to file:".red(), e));
            }
        }
    }

    fn print(&self, text: &str) {
        match &self.progress {
            Some(pb) => pb.println(text),
            None => println!("{}", text),
        }
    }

    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.output_path)?;
        writeln!(file, "{}", text)?;
        file.flush()
    }
}
