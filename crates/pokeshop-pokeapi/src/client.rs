//! HTTP client for the PokéAPI v2 REST API.
//!
//! Wraps `reqwest` with typed response deserialization for the two resources
//! the harvester needs. Requests are never retried; the harvest loop treats
//! any error as a skip for that identifier.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PokeApiError;
use crate::types::{PokemonResponse, SpeciesResponse};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Client for the PokéAPI.
///
/// Use [`PokeApiClient::new`] for production or
/// [`PokeApiClient::with_base_url`] to point at a mock server in tests.
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Creates a client pointed at the public PokéAPI.
    ///
    /// # Errors
    ///
    /// Returns [`PokeApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PokeApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PokeApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PokeApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PokeApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Url::join replaces the last path segment unless the base ends in a
        // slash, so normalise to exactly one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PokeApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches `pokemon/{id}/`.
    ///
    /// # Errors
    ///
    /// - [`PokeApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PokeApiError::Deserialize`] if a required key is missing.
    pub async fn get_pokemon(&self, id: i64) -> Result<PokemonResponse, PokeApiError> {
        let url = self.resource_url("pokemon", id)?;
        self.request_json(url).await
    }

    /// Fetches `pokemon-species/{id}/`.
    ///
    /// # Errors
    ///
    /// - [`PokeApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PokeApiError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_species(&self, id: i64) -> Result<SpeciesResponse, PokeApiError> {
        let url = self.resource_url("pokemon-species", id)?;
        self.request_json(url).await
    }

    fn resource_url(&self, resource: &str, id: i64) -> Result<Url, PokeApiError> {
        self.base_url
            .join(&format!("{resource}/{id}/"))
            .map_err(|e| PokeApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and decodes the body.
    async fn request_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, PokeApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PokeApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
