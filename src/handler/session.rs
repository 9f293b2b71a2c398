//! Session identity carried in the `riff_session` cookie, and the session
//! reset route.

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};
use uuid::Uuid;

use crate::app::AppState;

pub const SESSION_COOKIE: &str = "riff_session";

/// The caller's session id, and whether it was minted for this request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub issued: bool,
}

impl Session {
    /// Reuses a well-formed session cookie, otherwise issues a fresh id.
    pub fn resolve(headers: &HeaderMap) -> Self {
        match session_from_headers(headers) {
            Some(id) => Self { id, issued: false },
            None => {
                let id = Uuid::new_v4().to_string();
                debug!(session = %id, "issued new session");
                Self { id, issued: true }
            }
        }
    }

    /// `Set-Cookie` header to attach to the response, if the id is new.
    pub fn set_cookie(&self) -> Option<[(HeaderName, String); 1]> {
        self.issued.then(|| {
            [(
                SET_COOKIE,
                format!("{SESSION_COOKIE}={}; HttpOnly; Path=/; SameSite=Lax", self.id),
            )]
        })
    }
}

/// Extract a valid session id from the `Cookie` headers.
///
/// Values that are not UUIDs are ignored so clients cannot pick arbitrary
/// cache keys.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == SESSION_COOKIE)
        .find_map(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

/// Handler for DELETE /api/session
pub async fn clear_session_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = session_from_headers(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state.search.clear_session(&session_id).await {
        Ok(removed) => {
            info!(removed, "Cleared session searches");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => e.into_response(),
    }
}
