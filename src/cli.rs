// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::{ScanConfig, DEFAULT_WORKERS};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(
        short = 'l',
        long = "list",
        help = "Path to the text file containing URLs"
    )]
    pub list: PathBuf,

    #[arg(short = 'o', long = "output", help = "Output file path")]
    pub output: PathBuf,

    #[arg(
        long = "silent",
        help = "Only display URLs where the crafted payload exceeds 8 seconds"
    )]
    pub silent: bool,

    #[arg(
        short = 'w',
        long = "workers",
        default_value_t = DEFAULT_WORKERS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        help = "Number of concurrent workers"
    )]
    pub workers: usize,

    #[arg(short = 'p', long = "progress", help = "Show a progress bar on stderr")]
    pub progress: bool,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn to_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new();
        config.set_workers(self.workers);
        config.set_silent(self.silent);
        config.set_output_path(self.output.clone());
        config.set_progress(self.progress);
        config
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }
}
