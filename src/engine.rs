// File: engine.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ScanConfig;
use crate::payload;
use crate::probe::Prober;
use crate::state::ScanState;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every evaluated URL is written with both timings.
    Normal,
    /// Only URLs whose payload probe crossed the report threshold are written.
    Silent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Skipped {
        url: String,
        baseline: Duration,
    },
    Reported {
        url: String,
        baseline: Duration,
        modified_url: String,
        payload: Duration,
        vulnerable: bool,
    },
    Suspicious {
        modified_url: String,
        payload: Duration,
    },
    SilentSuppressed {
        modified_url: String,
        payload: Duration,
    },
}

impl Verdict {
    pub fn output_line(&self, mode: ScanMode) -> Option<String> {
        match self {
            Verdict::Skipped { url, .. } => match mode {
                ScanMode::Normal => Some(format!(
                    "{} [SKIPPED: Response time exceeded 3 seconds]",
                    url
                )),
                ScanMode::Silent => None,
            },
            Verdict::Reported {
                url,
                baseline,
                modified_url,
                payload,
                ..
            } => Some(format!(
                "{} [{:.3} sec] -> {} [{:.3} sec]",
                url,
                baseline.as_secs_f64(),
                modified_url,
                payload.as_secs_f64()
            )),
            Verdict::Suspicious { modified_url, .. } => Some(modified_url.clone()),
            Verdict::SilentSuppressed { .. } => None,
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        match self {
            Verdict::Suspicious { .. } => true,
            Verdict::Reported { vulnerable, .. } => *vulnerable,
            _ => false,
        }
    }
}

/// Drives one URL through the baseline and payload probes.
pub struct DecisionEngine<P: Prober> {
    prober: P,
    mode: ScanMode,
    skip_threshold: Duration,
    report_threshold: Duration,
    state_ptr: Arc<ScanState>,
}

impl<P: Prober> DecisionEngine<P> {
    pub fn new(prober: P, config: &ScanConfig, state_ptr: Arc<ScanState>) -> Self {
        Self {
            prober,
            mode: config.mode(),
            skip_threshold: config.skip_threshold(),
            report_threshold: config.report_threshold(),
            state_ptr,
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn state(&self) -> &Arc<ScanState> {
        &self.state_ptr
    }

    /// Runs the probe protocol for `raw`. `None` means the URL was empty or a probe failed.
    pub async fn assess(&self, raw: &str) -> Option<Verdict> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        self.state_ptr.add_target();

        let baseline = match self.prober.measure(url).await {
            Ok(elapsed) => elapsed,
            Err(e) => {
                debug!("Baseline probe for {} failed: {}", url, e);
                self.state_ptr.add_failure();
                return None;
            }
        };

        if baseline > self.skip_threshold {
            debug!(
                "Skipping {}: baseline {:.3}s exceeds {:.3}s",
                url,
                baseline.as_secs_f64(),
                self.skip_threshold.as_secs_f64()
            );
            self.state_ptr.add_skipped();
            return Some(Verdict::Skipped {
                url: url.to_string(),
                baseline,
            });
        }

        let modified_url = payload::inject(url);
        let payload = match self.prober.measure(&modified_url).await {
            Ok(elapsed) => elapsed,
            Err(e) => {
                debug!("Payload probe for {} failed: {}", modified_url, e);
                self.state_ptr.add_failure();
                return None;
            }
        };

        let vulnerable = payload > self.report_threshold;
        if vulnerable {
            info!(
                "Payload delay on {}: {:.3}s (baseline {:.3}s)",
                url,
                payload.as_secs_f64(),
                baseline.as_secs_f64()
            );
            self.state_ptr.add_vulnerable();
        }

        let verdict = match self.mode {
            ScanMode::Normal => Verdict::Reported {
                url: url.to_string(),
                baseline,
                modified_url,
                payload,
                vulnerable,
            },
            ScanMode::Silent if vulnerable => Verdict::Suspicious {
                modified_url,
                payload,
            },
            ScanMode::Silent => Verdict::SilentSuppressed {
                modified_url,
                payload,
            },
        };
        Some(verdict)
    }

    /// Returns the line to record for `raw`, if any.
    pub async fn evaluate(&self, raw: &str) -> Option<String> {
        let verdict = self.assess(raw).await?;
        if matches!(
            verdict,
            Verdict::Reported { .. } | Verdict::Suspicious { .. }
        ) {
            self.state_ptr.add_reported();
        }
        verdict.output_line(self.mode)
    }
}
