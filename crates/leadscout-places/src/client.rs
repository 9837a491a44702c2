//! HTTP client for the Google Places Web Service.
//!
//! Thin transport layer: builds request URLs, sends them, and decodes the
//! JSON envelope. It does not interpret the provider's `"status"` field;
//! that is left to the pagination and enrichment stages, which apply
//! different policies to the same statuses. No retries, no caching.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::pagination::PAGE_TOKEN_DELAY;
use crate::types::{DetailsResponse, TextSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Field mask sent with every details request.
pub const DETAILS_FIELDS: &str = "name,formatted_address,website,formatted_phone_number,types,\
rating,user_ratings_total,business_status,opening_hours,url,photos";

/// Width requested for synthesized photo references.
pub const PHOTO_MAX_WIDTH: u32 = 400;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "leadscout/0.1 (lead-search)";
const DEFAULT_DETAILS_CONCURRENCY: usize = 4;

/// Explicit construction parameters for [`PlacesClient`].
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Wait before each continuation-page request.
    pub page_delay: Duration,
    /// Maximum in-flight details requests during enrichment.
    pub details_concurrency: usize,
}

impl PlacesConfig {
    /// Production defaults for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            page_delay: PAGE_TOKEN_DELAY,
            details_concurrency: DEFAULT_DETAILS_CONCURRENCY,
        }
    }

    /// Maps the application config onto client settings. The pacing delay
    /// is not configurable from the environment.
    #[must_use]
    pub fn from_app_config(config: &leadscout_core::AppConfig) -> Self {
        Self {
            api_key: config.places_api_key.clone(),
            base_url: config.places_base_url.clone(),
            timeout_secs: config.places_request_timeout_secs,
            user_agent: config.places_user_agent.clone(),
            page_delay: PAGE_TOKEN_DELAY,
            details_concurrency: config.places_details_concurrency,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    #[must_use]
    pub fn with_details_concurrency(mut self, details_concurrency: usize) -> Self {
        self.details_concurrency = details_concurrency;
        self
    }
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay", &self.page_delay)
            .field("details_concurrency", &self.details_concurrency)
            .finish()
    }
}

/// Binary photo content fetched through [`PlacesClient::fetch_photo`].
#[derive(Debug, Clone)]
pub struct PhotoPayload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Client for the text search, details and photo endpoints.
///
/// Use [`PlacesClient::new`] with a [`PlacesConfig`]; point
/// [`PlacesConfig::base_url`] at a mock server in tests.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    text_search_endpoint: Url,
    details_endpoint: Url,
    photo_endpoint: Url,
    page_delay: Duration,
    details_concurrency: usize,
}

impl PlacesClient {
    /// Builds the client and resolves the three endpoint URLs up front.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` cannot serve as a URL base.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(PlacesError::transport)?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_owned()));
        }
        let join = |path: &str| base.join(path).map_err(|e| invalid(e.to_string()));

        Ok(Self {
            client,
            api_key: config.api_key,
            text_search_endpoint: join("textsearch/json")?,
            details_endpoint: join("details/json")?,
            photo_endpoint: join("photo")?,
            page_delay: config.page_delay,
            details_concurrency: config.details_concurrency.max(1),
        })
    }

    #[must_use]
    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    #[must_use]
    pub fn details_concurrency(&self) -> usize {
        self.details_concurrency
    }

    /// Fetches one page of text search results.
    ///
    /// `page_token` is the previous page's `next_page_token`; when present
    /// the provider ignores `query` and continues the original search.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, PlacesError> {
        let mut params = vec![("query", query)];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }
        let url = self.endpoint_url(&self.text_search_endpoint, &params);

        tracing::debug!(
            query,
            continuation = page_token.is_some(),
            "requesting places text search page"
        );
        self.get_json(url, "textsearch").await
    }

    /// Fetches details for one place using the fixed [`DETAILS_FIELDS`] mask.
    ///
    /// # Errors
    ///
    /// Same transport errors as [`Self::text_search`].
    pub async fn place_details(&self, place_id: &str) -> Result<DetailsResponse, PlacesError> {
        let url = self.endpoint_url(
            &self.details_endpoint,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        );

        tracing::debug!(place_id, "requesting place details");
        self.get_json(url, "details").await
    }

    /// Composes the photo reference handed out with search results.
    ///
    /// The reference carries no credential; [`Self::fetch_photo`] signs it
    /// with the API key when the image is actually requested.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str) -> String {
        let mut url = self.photo_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("maxwidth", &PHOTO_MAX_WIDTH.to_string())
            .append_pair("photo_reference", photo_reference);
        url.into()
    }

    /// Returns `true` if `url` targets this client's photo endpoint.
    #[must_use]
    pub fn is_photo_url(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|candidate| self.targets_photo_endpoint(&candidate))
    }

    /// Downloads the binary content behind a reference produced by
    /// [`Self::photo_url`]. Redirects to the image CDN are followed.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ForeignPhotoUrl`] if `url` does not target the
    ///   configured photo endpoint or has no `photo_reference` (nothing is
    ///   requested).
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    pub async fn fetch_photo(&self, url: &str) -> Result<PhotoPayload, PlacesError> {
        let upstream = self.signed_photo_url(url)?;

        let response = self
            .client
            .get(upstream)
            .send()
            .await
            .map_err(PlacesError::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: "photo".to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(PlacesError::transport)?;

        Ok(PhotoPayload {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    fn targets_photo_endpoint(&self, candidate: &Url) -> bool {
        candidate.scheme() == self.photo_endpoint.scheme()
            && candidate.host_str() == self.photo_endpoint.host_str()
            && candidate.port_or_known_default() == self.photo_endpoint.port_or_known_default()
            && candidate.path() == self.photo_endpoint.path()
    }

    /// Rebuilds a photo reference as an upstream request. Only `maxwidth`
    /// and `photo_reference` are carried over; any caller-supplied `key` is
    /// discarded in favour of the configured one.
    fn signed_photo_url(&self, url: &str) -> Result<Url, PlacesError> {
        let foreign = || PlacesError::ForeignPhotoUrl(url.to_owned());
        let candidate = Url::parse(url).map_err(|_| foreign())?;
        if !self.targets_photo_endpoint(&candidate) {
            return Err(foreign());
        }

        let mut photo_reference = None;
        let mut max_width = None;
        for (name, value) in candidate.query_pairs() {
            match name.as_ref() {
                "photo_reference" => photo_reference = Some(value.into_owned()),
                "maxwidth" => max_width = Some(value.into_owned()),
                _ => {}
            }
        }
        let photo_reference = photo_reference
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(foreign)?;
        let max_width = max_width.unwrap_or_else(|| PHOTO_MAX_WIDTH.to_string());

        Ok(self.endpoint_url(
            &self.photo_endpoint,
            &[
                ("maxwidth", max_width.as_str()),
                ("photo_reference", photo_reference.as_str()),
            ],
        ))
    }

    /// Clones `endpoint` and appends `params` followed by the API key, all
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn endpoint_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and decodes the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        endpoint: &str,
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(PlacesError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }

        let body = response.text().await.map_err(PlacesError::transport)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
