use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use super::session::Session;
use crate::app::AppState;
use crate::error::SearchError;
use crate::search::SearchRequest;
use crate::search::request::{BandSearchBody, WeightedSearchBody};

/// Handler for POST /api/songs_weighted
pub async fn songs_weighted_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<WeightedSearchBody>, JsonRejection>,
) -> Response {
    let session = Session::resolve(&headers);
    let request = body
        .map_err(malformed_body)
        .and_then(|Json(body)| SearchRequest::weighted(body, state.max_results));

    info!(session_issued = session.issued, "Received weighted search request");
    respond(&state, session, request).await
}

/// Handler for POST /api/songs_bands
pub async fn songs_bands_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<BandSearchBody>, JsonRejection>,
) -> Response {
    let session = Session::resolve(&headers);
    let request = body
        .map_err(malformed_body)
        .and_then(|Json(body)| SearchRequest::bands(body, state.max_results));

    info!(session_issued = session.issued, "Received band search request");
    respond(&state, session, request).await
}

async fn respond(
    state: &AppState,
    session: Session,
    request: Result<SearchRequest, SearchError>,
) -> Response {
    let result = match request {
        Ok(request) => state.search.search(&session.id, &request).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!(status = e.status_code().as_u16(), error = %e, "Search request failed");
    }

    (session.set_cookie(), result.map(Json)).into_response()
}

fn malformed_body(rejection: JsonRejection) -> SearchError {
    SearchError::Validation(format!("malformed request body: {}", rejection.body_text()))
}
