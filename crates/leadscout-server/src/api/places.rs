use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use leadscout_places::{EnrichedResult, PlacesError, SearchOutcome};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    /// `"ok"` or `"no_results"`.
    pub status: &'static str,
    pub results: Vec<EnrichedResult>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PhotoParams {
    pub url: Option<String>,
}

pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let query = params.query.unwrap_or_default();

    let outcome = leadscout_places::search_places(&state.places, &query)
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    let data = match outcome {
        SearchOutcome::NoResults => SearchData {
            status: "no_results",
            results: Vec::new(),
        },
        SearchOutcome::Results(results) => SearchData {
            status: "ok",
            results,
        },
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Streams back the image behind a photo URL produced by a search.
pub(super) async fn relay_photo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PhotoParams>,
) -> Result<Response, ApiError> {
    let Some(url) = params.url.filter(|u| !u.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "url query parameter is required",
        ));
    };

    let photo = state
        .places
        .fetch_photo(&url)
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    let content_type = photo
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], photo.bytes).into_response())
}

fn map_places_error(request_id: String, error: &PlacesError) -> ApiError {
    match error {
        PlacesError::EmptyQuery => {
            ApiError::new(request_id, "validation_error", "query must not be empty")
        }
        PlacesError::ForeignPhotoUrl(_) => ApiError::new(
            request_id,
            "validation_error",
            "url is not a places photo reference",
        ),
        PlacesError::Provider { status, .. } => {
            tracing::warn!(error = %error, "places provider rejected request");
            ApiError::new(
                request_id,
                "upstream_error",
                format!("places provider returned {status}"),
            )
        }
        _ if error.is_transport() => {
            tracing::error!(error = %error, "places provider unreachable");
            ApiError::new(
                request_id,
                "upstream_unavailable",
                "places provider unavailable",
            )
        }
        _ => {
            tracing::error!(error = %error, "places request failed");
            ApiError::new(request_id, "internal_error", "places request failed")
        }
    }
}
