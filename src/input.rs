// File: input.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::ProbeResult;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lazily yields one raw line per target. Lines are kept as-is; the engine trims them.
///
/// Lines that are not valid UTF-8 are skipped. A read error ends the stream.
pub fn read_targets<R: BufRead>(reader: R) -> impl Iterator<Item = String> {
    reader
        .split(b'\n')
        .map_while(|chunk| match chunk {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Stopped reading targets: {}", e);
                None
            }
        })
        .filter_map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            match String::from_utf8(bytes) {
                Ok(line) => Some(line),
                Err(e) => {
                    debug!("Skipping target line that is not valid UTF-8: {}", e);
                    None
                }
            }
        })
}

pub fn load_targets<P: AsRef<Path>>(path: P) -> ProbeResult<impl Iterator<Item = String>> {
    let file = File::open(path.as_ref())?;
    debug!("Reading targets from {}", path.as_ref().display());
    Ok(read_targets(BufReader::new(file)))
}
