// File: probe.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ScanConfig;
use crate::error::ProbeResult;
use log::trace;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Measures how long a target takes to answer a single GET request.
pub trait Prober: Send + Sync {
    fn measure(&self, url: &str) -> impl Future<Output = ProbeResult<Duration>> + Send;
}

impl<P: Prober> Prober for Arc<P> {
    fn measure(&self, url: &str) -> impl Future<Output = ProbeResult<Duration>> + Send {
        (**self).measure(url)
    }
}

/// Prober backed by a shared `reqwest` client.
///
/// Certificate validation is turned off: targets are frequently test hosts with
/// self-signed certificates, and only the latency matters here.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ScanConfig) -> ProbeResult<Self> {
        Self::new(Duration::from_secs(config.timeout()))
    }
}

impl Prober for HttpProber {
    async fn measure(&self, url: &str) -> ProbeResult<Duration> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let elapsed = start.elapsed();

        // The clock stops at the response head; the body is only drained to free the connection.
        if let Err(e) = response.bytes().await {
            trace!("Discarding body of {} failed: {}", url, e);
        }

        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_measure_returns_elapsed_time() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("ok")
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let elapsed = prober
            .measure(&format!("{}/slow", mock_server.uri()))
            .await
            .unwrap();

        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_error_status_still_counts_as_measurement() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        assert!(prober.measure(&mock_server.uri()).await.is_ok());
    }

    #[tokio::test]
    async fn test_measure_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let prober = HttpProber::new(Duration::from_millis(200)).unwrap();
        let result = prober.measure(&mock_server.uri()).await;

        assert!(matches!(result, Err(ProbeError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_fails() {
        let prober = HttpProber::from_config(&ScanConfig::new()).unwrap();
        assert!(prober.measure("not a url").await.is_err());
    }
}
