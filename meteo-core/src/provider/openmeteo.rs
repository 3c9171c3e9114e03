use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    Config, DomainQuery, DomainResult, LocationCandidate, NetworkError,
    provider::{
        Endpoint, FeatureFetcher, LocationResolver,
        endpoints::{self, GEOCODING},
    },
};

/// Client for the public Open-Meteo APIs. No API key is needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    config: Config,
}

impl OpenMeteoClient {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            self.config.endpoints.base_url(endpoint.host),
            endpoint.path
        )
    }

    fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("name", query.to_string()),
            ("count", self.config.search.count.to_string()),
            ("language", self.config.search.language.clone()),
        ];
        params.extend(GEOCODING.params.iter().map(|(k, v)| (*k, v.to_string())));
        params
    }

    fn feature_params(&self, query: &DomainQuery) -> Vec<(&'static str, String)> {
        endpoints::request_params(query, &self.config.climate)
    }

    /// Send a GET and return the body of a successful response.
    async fn get(
        &self,
        name: &'static str,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, NetworkError> {
        debug!(url = %url, ?params, "Sending {name} request");

        let res = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|source| NetworkError::Transport { endpoint: name, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| NetworkError::Transport { endpoint: name, source })?;

        if !status.is_success() {
            let err = NetworkError::from_status(name, status, &body);
            warn!(%status, reason = %err.reason(), "{name} request failed");
            return Err(err);
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent when nothing matched.
    #[serde(default)]
    results: Vec<LocationCandidate>,
}

#[async_trait]
impl LocationResolver for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, NetworkError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty query, skipping geocoding request");
            return Ok(Vec::new());
        }

        let url = self.url(&GEOCODING);
        let body = self.get("geocoding", &url, &self.search_params(query)).await?;

        let parsed: GeocodingResponse = serde_json::from_str(&body)
            .map_err(|e| NetworkError::decode("geocoding", e.to_string()))?;

        debug!(count = parsed.results.len(), "Geocoding returned candidates");
        Ok(parsed.results)
    }
}

#[async_trait]
impl FeatureFetcher for OpenMeteoClient {
    #[instrument(skip(self), fields(kind = %query.kind, lat = query.latitude, lon = query.longitude))]
    async fn fetch(&self, query: &DomainQuery) -> Result<DomainResult, NetworkError> {
        let endpoint = query.kind.endpoint();
        let url = self.url(&endpoint);
        let body = self
            .get(query.kind.as_str(), &url, &self.feature_params(query))
            .await?;

        DomainResult::decode(query.kind, &body).inspect_err(|e| {
            warn!(error = %e, "Discarding undecodable {} response", query.kind);
        })
    }
}
