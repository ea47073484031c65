// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::Parser;
use colored::*;
use log::info;
use simple_logger::SimpleLogger;
use sleepprobe::cli::Cli;
use sleepprobe::dispatcher::Dispatcher;
use sleepprobe::input::load_targets;
use sleepprobe::probe::HttpProber;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new()
        .with_level(cli.log_level_filter())
        .init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = cli.to_config();

    let targets = match load_targets(&cli.list) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("{} {}", "Error opening file:".red(), e);
            std::process::exit(1);
        }
    };

    let prober = match HttpProber::from_config(&config) {
        Ok(prober) => prober,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    };

    info!(
        "Probing {} with {} workers, results appended to {}",
        cli.list.display(),
        config.workers(),
        config.output_path().display()
    );

    let dispatcher = Dispatcher::from_config(prober, &config);
    let state = dispatcher.run(targets).await;

    if config.silent() {
        info!("{}", state.summary());
    } else {
        eprintln!();
        eprintln!("{}", state.summary());
    }
}
