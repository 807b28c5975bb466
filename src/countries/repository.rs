//! Remote country data access against the restcountries v3.1 API.
//!
//! Two queries only: list everything, look one country up by exact name.
//! Transport and parse failures surface as tagged [`RepositoryError`]
//! variants so callers can always tell "fetch failed" from "fetch
//! succeeded with zero rows". A legitimate miss on the name lookup is
//! `Ok(None)`, never an error.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::normalize::normalize;
use super::types::{NormalizedCountry, RawCountry};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Explicit request bound; the upstream specifies none, and hanging on the
/// transport default is worse than failing.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching country data.
#[derive(Debug)]
pub enum RepositoryError {
    /// Client could not be constructed (bad timeout, TLS backend failure).
    Config(String),
    /// Caller-side contract violation, rejected before any I/O.
    InvalidInput(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Response body does not match the expected shape.
    Parse(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Config(msg) => write!(f, "config error: {msg}"),
            RepositoryError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            RepositoryError::Network(msg) => write!(f, "network error: {msg}"),
            RepositoryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RepositoryError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Seam for anything that can supply country data. The REST client is the
/// only production implementation; tests substitute in-memory sources.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetches the full country list, in upstream order.
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, RepositoryError>;

    /// Looks up one country by exact, case-sensitive common name.
    /// `Ok(None)` means the upstream had no match.
    async fn fetch_by_name(
        &self,
        name: &str,
    ) -> Result<Option<NormalizedCountry>, RepositoryError>;
}

/// HTTP client for the restcountries API.
pub struct RestCountriesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to restcountries.com)
    /// * `timeout` - Per-request bound applied to every call
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, RepositoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        })
    }

    /// Issues one GET and returns the body text, with non-2xx statuses
    /// mapped to `Api` errors before the body is parsed.
    async fn get_body(&self, url: &str) -> Result<String, RepositoryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        debug!("Response status for {url}: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("restcountries API error: {status} - {message}");
            return Err(RepositoryError::Api { status, message });
        }

        response
            .text()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))
    }
}

/// Percent-encodes a country name for use as a path segment.
fn encode_name(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, RepositoryError> {
        let url = format!("{}/all", self.base_url);
        info!("Fetching all countries from {url}");

        let body = self.get_body(&url).await?;
        let countries: Vec<RawCountry> =
            serde_json::from_str(&body).map_err(|e| RepositoryError::Parse(e.to_string()))?;

        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn fetch_by_name(
        &self,
        name: &str,
    ) -> Result<Option<NormalizedCountry>, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::InvalidInput(
                "country name must not be blank".to_string(),
            ));
        }

        // fullText requests exact full-name matching server-side.
        let url = format!(
            "{}/name/{}?fullText=true",
            self.base_url,
            encode_name(name)
        );
        info!("Fetching details for {name}");

        let body = match self.get_body(&url).await {
            Ok(body) => body,
            // The upstream answers 404 when no country carries the name;
            // that is a legitimate miss, not a fault.
            Err(RepositoryError::Api { status: 404, .. }) => {
                info!("No country matched {name:?}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let matches: Vec<RawCountry> =
            serde_json::from_str(&body).map_err(|e| RepositoryError::Parse(e.to_string()))?;

        if matches.len() > 1 {
            warn!("{} matches for {name:?}, taking the first", matches.len());
        }

        // Exactly one canonical match is expected; take the first as
        // received if the upstream ever returns more.
        Ok(matches.into_iter().next().map(|raw| normalize(&raw)))
    }
}
