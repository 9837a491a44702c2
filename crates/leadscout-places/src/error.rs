use thiserror::Error;

/// Errors returned by the Places client and the search aggregation flow.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The caller supplied an empty or whitespace-only query.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// Network, TLS or timeout failure reaching the provider.
    ///
    /// The request URL is stripped before wrapping so the API key never
    /// ends up in logs or error bodies.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The provider answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider returned a well-formed body whose `status` is neither
    /// `OK` nor `ZERO_RESULTS`.
    #[error("Places API returned {status}: {message}")]
    Provider { status: String, message: String },

    #[error("invalid Places base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A photo relay request pointed somewhere other than the configured
    /// photo endpoint.
    #[error("photo URL is not a Places photo reference: {0}")]
    ForeignPhotoUrl(String),
}

impl PlacesError {
    /// Wraps a `reqwest` failure, dropping the URL (it carries the API key).
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }

    /// `true` when the provider could not be reached or did not answer with a
    /// usable body, as opposed to answering with an error status.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::UnexpectedStatus { .. } | Self::Deserialize { .. }
        )
    }
}
