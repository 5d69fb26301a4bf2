//! API Client
//!
//! HTTP client for the FuelEU API. Response bodies deserialize into the
//! server's own DTOs.

use fueleu_api::{
    AdjustedCbResponse, ApplyRequest, BankRecordsResponse, BankRequest, BankedResponse,
    BaselineResponse, ComplianceCbResponse, CreatePoolRequest, ErrorResponse, HealthResponse,
    LedgerEntryResponse, PoolResponse, ResetResponse,
};
use fueleu_core::{Comparison, PoolMemberRef, Route, RouteFilter};
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{CliError, CliResult};

/// FuelEU API client
pub struct FuelEuClient {
    /// HTTP client
    client: Client,
    /// Base URL
    base_url: String,
}

impl FuelEuClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> CliResult<Self> {
        Self::with_timeout(base_url, 30)
    }

    /// Create with custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CliError::connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// API URL with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> CliResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url(""))
            .map_err(|e| CliError::config(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CliError::config(format!("API URL has no path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the JSON body, or the API error body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> CliResult<T> {
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(body) => Err(CliError::api(status, body.code, body.message)),
                Err(_) => Err(CliError::api(status, "UNKNOWN", text)),
            }
        }
    }

    /// Get health status
    pub async fn health(&self) -> CliResult<HealthResponse> {
        self.send(self.client.get(self.url("/health"))).await
    }

    /// List routes
    pub async fn list_routes(&self, filter: &RouteFilter) -> CliResult<Vec<Route>> {
        self.send(self.client.get(self.url("/routes")).query(filter)).await
    }

    /// Designate the baseline route
    pub async fn set_baseline(&self, route_id: &str) -> CliResult<BaselineResponse> {
        let url = self.endpoint(&["routes", route_id, "baseline"])?;
        self.send(self.client.post(url)).await
    }

    /// Compare routes against the baseline
    pub async fn comparison(&self) -> CliResult<Comparison> {
        self.send(self.client.get(self.url("/routes/comparison"))).await
    }

    /// Baseline-relative CB
    pub async fn compliance_cb(&self, route_id: &str, year: i32) -> CliResult<ComplianceCbResponse> {
        let request = self
            .client
            .get(self.url("/compliance/cb"))
            .query(&[("routeId", route_id.to_string()), ("year", year.to_string())]);
        self.send(request).await
    }

    /// Baseline-relative CB with the adjusted figure
    pub async fn adjusted_cb(&self, route_id: &str, year: i32) -> CliResult<AdjustedCbResponse> {
        let request = self
            .client
            .get(self.url("/compliance/adjusted-cb"))
            .query(&[("routeId", route_id.to_string()), ("year", year.to_string())]);
        self.send(request).await
    }

    /// Banked balance
    pub async fn banked(&self, route_id: &str) -> CliResult<BankedResponse> {
        let request = self
            .client
            .get(self.url("/banking/banked"))
            .query(&[("routeId", route_id)]);
        self.send(request).await
    }

    /// Bank surplus CB
    pub async fn bank(&self, route_id: &str, year: i32) -> CliResult<LedgerEntryResponse> {
        let body = BankRequest {
            route_id: route_id.to_string(),
            year,
        };
        self.send(self.client.post(self.url("/banking/bank")).json(&body)).await
    }

    /// Apply banked CB
    pub async fn apply(&self, route_id: &str, amount: Decimal) -> CliResult<LedgerEntryResponse> {
        let body = ApplyRequest {
            route_id: route_id.to_string(),
            amount,
        };
        self.send(self.client.post(self.url("/banking/apply")).json(&body)).await
    }

    /// Ledger entries of a route
    pub async fn bank_records(&self, route_id: &str) -> CliResult<BankRecordsResponse> {
        let request = self
            .client
            .get(self.url("/banking/records"))
            .query(&[("routeId", route_id)]);
        self.send(request).await
    }

    /// Reset the ledger
    pub async fn reset_ledger(&self) -> CliResult<ResetResponse> {
        self.send(self.client.delete(self.url("/banking/records"))).await
    }

    /// Create a pool
    pub async fn create_pool(&self, year: i32, members: &[String]) -> CliResult<PoolResponse> {
        let body = CreatePoolRequest {
            year,
            members: members.iter().map(PoolMemberRef::new).collect(),
        };
        self.send(self.client.post(self.url("/pooling")).json(&body)).await
    }

    /// List pools
    pub async fn list_pools(&self, year: Option<i32>) -> CliResult<Vec<PoolResponse>> {
        let mut request = self.client.get(self.url("/pooling"));
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FuelEuClient::new("http://localhost:4000");
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_building() {
        let client = FuelEuClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.url("/routes"), "http://localhost:4000/api/v1/routes");
    }

    #[test]
    fn test_endpoint_encodes_route_id() {
        let client = FuelEuClient::new("http://localhost:4000").unwrap();

        let url = client.endpoint(&["routes", "R2", "baseline"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/v1/routes/R2/baseline");

        let url = client.endpoint(&["routes", "A/B?x#y", "baseline"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/v1/routes/A%2FB%3Fx%23y/baseline");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let client = FuelEuClient::new("not a url").unwrap();
        let err = client.endpoint(&["routes"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
