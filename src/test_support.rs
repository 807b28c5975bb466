//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::countries::normalize::normalize;
use crate::countries::repository::{CountrySource, RepositoryError};
use crate::countries::types::{CountryName, NormalizedCountry, RawCountry};

/// Builds a minimal raw record carrying only a name and code.
pub fn country(name: &str, code: &str) -> RawCountry {
    RawCountry {
        cca3: Some(code.to_string()),
        name: CountryName {
            common: name.to_string(),
        },
        ..Default::default()
    }
}

/// In-memory source serving a fixed list, for tests that don't need HTTP.
pub struct StaticSource(pub Vec<RawCountry>);

#[async_trait]
impl CountrySource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, RepositoryError> {
        Ok(self.0.clone())
    }

    async fn fetch_by_name(
        &self,
        name: &str,
    ) -> Result<Option<NormalizedCountry>, RepositoryError> {
        if name.trim().is_empty() {
            return Err(RepositoryError::InvalidInput(
                "country name must not be blank".to_string(),
            ));
        }
        // Exact, case-sensitive match, like the fullText endpoint.
        Ok(self
            .0
            .iter()
            .find(|c| c.name.common == name)
            .map(normalize))
    }
}

/// Source whose every call fails at the transport level.
pub struct FailingSource;

#[async_trait]
impl CountrySource for FailingSource {
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, RepositoryError> {
        Err(RepositoryError::Network("connection refused".to_string()))
    }

    async fn fetch_by_name(
        &self,
        _name: &str,
    ) -> Result<Option<NormalizedCountry>, RepositoryError> {
        Err(RepositoryError::Network("connection refused".to_string()))
    }
}
