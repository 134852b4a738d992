//! HTTP backend client.
//!
//! Talks to the dashboard server's JSON API with a blocking reqwest client.
//! There is no retry: one request per call, failures are reported to the caller.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::{ApiError, PortfolioApi};
use crate::model::{
    HistoricalResponse, HistoricalSeries, MutationResponse, NewPosition, PortfolioSnapshot,
    RiskMetrics,
};

/// Client for a running dashboard server.
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        log::debug!("GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<T>()
            .map_err(|e| ApiError::Decode(format!("{url}: {e}")))
    }

    /// Send a mutation and decode its `{success, error}` body.
    ///
    /// The server answers a rejected add with HTTP 400 and a JSON body, so the
    /// body is decoded before the status is considered.
    fn send_mutation(&self, request: RequestBuilder, url: &Url) -> Result<MutationResponse, ApiError> {
        let resp = request
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match serde_json::from_str::<MutationResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            Err(e) => Err(ApiError::Decode(format!("{url}: {e}"))),
        }
    }
}

impl PortfolioApi for HttpApi {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_portfolio(&self) -> Result<PortfolioSnapshot, ApiError> {
        let url = self.endpoint(&["api", "portfolio"])?;
        self.get_json(url)
    }

    fn fetch_risk_metrics(&self) -> Result<RiskMetrics, ApiError> {
        let url = self.endpoint(&["api", "risk-metrics"])?;
        self.get_json(url)
    }

    fn fetch_historical(&self, ticker: &str, days: u32) -> Result<HistoricalSeries, ApiError> {
        let mut url = self.endpoint(&["api", "historical", ticker])?;
        url.query_pairs_mut().append_pair("days", &days.to_string());

        let raw: HistoricalResponse = self.get_json(url)?;
        let (dates, prices) = (raw.dates.len(), raw.prices.len());
        HistoricalSeries::new(ticker, raw.dates, raw.prices)
            .ok_or(ApiError::MisalignedSeries { dates, prices })
    }

    fn add_position(&self, position: &NewPosition) -> Result<MutationResponse, ApiError> {
        let url = self.endpoint(&["api", "portfolio", "add"])?;
        log::debug!("POST {url} ticker={}", position.ticker);
        let request = self.client.post(url.clone()).json(position);
        self.send_mutation(request, &url)
    }

    fn delete_position(&self, ticker: &str) -> Result<MutationResponse, ApiError> {
        let url = self.endpoint(&["api", "portfolio", "delete", ticker])?;
        log::debug!("DELETE {url}");
        let request = self.client.delete(url.clone());
        self.send_mutation(request, &url)
    }

    fn clear_positions(&self) -> Result<MutationResponse, ApiError> {
        let url = self.endpoint(&["api", "portfolio", "clear"])?;
        log::debug!("POST {url}");
        let request = self.client.post(url.clone());
        self.send_mutation(request, &url)
    }
}
