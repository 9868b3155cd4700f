use anyhow::Context;
use bytes::Bytes;
use lazy_static::lazy_static;
use reqwest::Response;
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use url::Url;

lazy_static! {
    static ref CLIENT: ClientWithMiddleware = {
        // Retry failed requests, with the wait between attempts capped.
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);
        ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TracingMiddleware::default())
            .build()
    };
}

pub struct HttpClient;

impl HttpClient {
    async fn get(url: Url) -> anyhow::Result<Response> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;
        response
            .error_for_status()
            .with_context(|| format!("Request to {url} returned an error status"))
    }

    pub async fn get_bytes(url: Url) -> anyhow::Result<Bytes> {
        Self::get(url.clone())
            .await?
            .bytes()
            .await
            .context("Failed to get bytes response")
    }
}
