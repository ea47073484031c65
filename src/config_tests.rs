// File: config_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::config::ScanConfig;
    use crate::engine::ScanMode;
    use rstest::*;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();

        assert_eq!(config.workers(), 12);
        assert_eq!(config.silent(), false);
        assert_eq!(config.timeout(), 10);
        assert_eq!(config.skip_threshold(), Duration::from_secs(3));
        assert_eq!(config.report_threshold(), Duration::from_secs(8));
        assert_eq!(config.progress(), false);
        assert_eq!(config.mode(), ScanMode::Normal);
    }

    #[test]
    fn test_set_silent_switches_mode() {
        let mut config = ScanConfig::new();

        config.set_silent(true);
        assert_eq!(config.silent(), true);
        assert_eq!(config.mode(), ScanMode::Silent);

        config.set_silent(false);
        assert_eq!(config.mode(), ScanMode::Normal);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(12, 12)]
    #[case(64, 64)]
    fn test_set_workers(#[case] requested: usize, #[case] expected: usize) {
        let mut config = ScanConfig::new();

        config.set_workers(requested);
        assert_eq!(config.workers(), expected);
    }

    #[test]
    fn test_set_output_path() {
        let mut config = ScanConfig::new();

        config.set_output_path("out/hits.txt");
        assert_eq!(config.output_path(), Path::new("out/hits.txt"));
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(30)]
    fn test_set_timeout(#[case] timeout_value: u64) {
        let mut config = ScanConfig::new();

        config.set_timeout(timeout_value);
        assert_eq!(config.timeout(), timeout_value);
    }

    #[test]
    fn test_set_thresholds() {
        let mut config = ScanConfig::new();

        config.set_skip_threshold(Duration::from_millis(200));
        config.set_report_threshold(Duration::from_millis(900));

        assert_eq!(config.skip_threshold(), Duration::from_millis(200));
        assert_eq!(config.report_threshold(), Duration::from_millis(900));
    }
}
