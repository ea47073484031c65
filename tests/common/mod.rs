// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use sleepprobe::config::ScanConfig;
use sleepprobe::error::{ProbeError, ProbeResult};
use sleepprobe::payload::SLEEP_PAYLOAD;
use sleepprobe::probe::Prober;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Outcome of one scripted probe, `None` meaning a transport failure.
#[derive(Debug, Clone, Copy)]
pub struct Script {
    pub baseline: Option<Duration>,
    pub payload: Option<Duration>,
}

impl Script {
    pub fn secs(baseline: f64, payload: f64) -> Self {
        Self {
            baseline: Some(Duration::from_secs_f64(baseline)),
            payload: Some(Duration::from_secs_f64(payload)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            baseline: None,
            payload: None,
        }
    }
}

/// Prober double keyed by the original (trimmed) URL.
pub struct ScriptedProber {
    scripts: HashMap<String, Script>,
    fallback: Script,
    latency: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(fallback: Script) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback,
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_script(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    /// Real wall-clock delay added to every call, to keep workers busy.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Prober for ScriptedProber {
    async fn measure(&self, url: &str) -> ProbeResult<Duration> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let (original, is_payload) = match url.strip_suffix(SLEEP_PAYLOAD) {
            Some(original) => (original, true),
            None => (url, false),
        };
        let script = self.scripts.get(original).copied().unwrap_or(self.fallback);
        let outcome = if is_payload {
            script.payload
        } else {
            script.baseline
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome.ok_or_else(|| ProbeError::Connect(format!("scripted failure for {}", url)))
    }
}

pub fn config_for(output: &Path, workers: usize, silent: bool) -> ScanConfig {
    let mut config = ScanConfig::new();
    config.set_output_path(output);
    config.set_workers(workers);
    config.set_silent(silent);
    config
}
