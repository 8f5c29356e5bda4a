//! # Spotify Module
//!
//! Clients for the two Spotify services the console talks to:
//!
//! - the **accounts service**, which issues the authorization code and trades
//!   it for a bearer token ([`auth`]);
//! - the **Web API**, from which the browse collections are read a page at a
//!   time ([`CatalogClient`] and the typed fetchers in [`browse`]).
//!
//! ## Paging
//!
//! Every browse endpoint nests its result under an entity key, for example
//! `{"albums": {"items": [...], "total": 42}}`. [`CatalogClient::fetch_page`]
//! reads that shape for any item type; the typed fetchers only supply the path
//! and the key. Page numbers are 1-based and turned into `offset`/`limit`
//! query parameters. A lookup without a page number sends neither.
//!
//! ## Errors
//!
//! Non-success responses become [`AdvisorError::Api`], with the message taken
//! from the `{"error": {"message": ...}}` envelope when present and the raw
//! body otherwise. Connection and decoding failures become
//! [`AdvisorError::Transport`]. No request is retried.

pub mod auth;
pub mod browse;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Settings,
    error::AdvisorError,
    types::{ErrorEnvelope, Page, PageRequest, Paging},
};

/// Reads pages of browse collections from the Web API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    country: String,
    locale: String,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        country: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        CatalogClient {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            country: country.into(),
            locale: locale.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.resource_server,
            &settings.country,
            &settings.locale,
        )
    }

    /// Fetches one page of `path`, reading the items nested under `entity_key`.
    ///
    /// With `page` set to `None` no paging parameters are sent and the result
    /// is reported as page 1.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        entity_key: &str,
        page: Option<PageRequest>,
        token: &str,
    ) -> Result<Page<T>, AdvisorError> {
        let url = format!("{}{}", self.base_url, path);

        let mut query: Vec<(&str, String)> = vec![
            ("country", self.country.clone()),
            ("locale", self.locale.clone()),
        ];
        if let Some(req) = page {
            query.push(("offset", req.offset().to_string()));
            query.push(("limit", req.size.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let mut json: Value = serde_json::from_str(&body)?;
        let nested = json
            .get_mut(entity_key)
            .map(Value::take)
            .ok_or_else(|| {
                AdvisorError::Transport(format!("response has no `{}` field", entity_key))
            })?;
        let paging: Paging<T> = serde_json::from_value(nested)?;

        Ok(Page {
            elements: paging.items,
            total: paging.total,
            page_number: page.map_or(1, |req| req.page),
        })
    }
}

/// Classifies a non-success response body.
pub(crate) fn api_error(status: u16, body: &str) -> AdvisorError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("empty response body")
            .to_string(),
        Err(_) => body.to_string(),
    };
    AdvisorError::Api { status, message }
}
