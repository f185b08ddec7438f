use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;

use super::types::{SimulationOutcome, StatsSummary, Transaction};

/// Failure of a single gateway call. Callers always get one of these instead
/// of a panic.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error on {path}: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} on {path}")]
    Status {
        path: &'static str,
        status: StatusCode,
    },
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The three outbound calls made against the scoring backend.
pub trait FetchGateway: Send + Sync {
    fn fetch_summary(&self) -> BoxFuture<'_, Result<StatsSummary, FetchError>>;

    fn fetch_transactions(&self) -> BoxFuture<'_, Result<Vec<Transaction>, FetchError>>;

    fn trigger_simulation(&self) -> BoxFuture<'_, Result<SimulationOutcome, FetchError>>;
}

const STATS_PATH: &str = "/stats";
const TRANSACTIONS_PATH: &str = "/transactions";
const SIMULATE_PATH: &str = "/simulate";

/// `FetchGateway` over HTTP. One request per call, no retries, transport
/// default timeouts.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    api_root: String,
}

impl HttpGateway {
    pub fn new(config: &BackendConfig) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("riskwatch-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            api_root: config.api_root(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, FetchError> {
        let request = self.http.get(self.url(path));
        read_json(request, path).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, FetchError> {
        let request = self.http.post(self.url(path));
        read_json(request, path).await
    }
}

/// Send a request and decode its body. Status is checked before decoding so a
/// 500 with an HTML body surfaces as `Status`, not `Decode`.
async fn read_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    path: &'static str,
) -> Result<T, FetchError> {
    let resp = request
        .send()
        .await
        .map_err(|source| FetchError::Transport { path, source })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { path, status });
    }

    let body = resp
        .bytes()
        .await
        .map_err(|source| FetchError::Transport { path, source })?;

    let value = serde_json::from_slice(&body).map_err(|source| FetchError::Decode { path, source })?;
    tracing::debug!(path, bytes = body.len(), "Fetched backend resource");
    Ok(value)
}

impl FetchGateway for HttpGateway {
    fn fetch_summary(&self) -> BoxFuture<'_, Result<StatsSummary, FetchError>> {
        Box::pin(self.get_json::<StatsSummary>(STATS_PATH))
    }

    fn fetch_transactions(&self) -> BoxFuture<'_, Result<Vec<Transaction>, FetchError>> {
        Box::pin(self.get_json::<Vec<Transaction>>(TRANSACTIONS_PATH))
    }

    fn trigger_simulation(&self) -> BoxFuture<'_, Result<SimulationOutcome, FetchError>> {
        Box::pin(self.post_json::<SimulationOutcome>(SIMULATE_PATH))
    }
}
