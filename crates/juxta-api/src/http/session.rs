//! Session cookie resolution.
//!
//! # Design
//! - A missing or malformed `juxta_session` cookie starts a fresh session.
//! - Fresh sessions are announced with `Set-Cookie`; known sessions are left untouched.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::Response;
use tracing::debug;
use uuid::Uuid;

use crate::http::constants::SESSION_COOKIE;
use crate::session::SessionId;

/// Session bound to the current request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RequestSession {
    pub(crate) id: SessionId,
    pub(crate) issued: bool,
}

impl RequestSession {
    /// Read the session cookie, or start a new session.
    pub(crate) fn resolve(headers: &HeaderMap) -> Self {
        match session_from_cookies(headers) {
            Some(id) => Self { id, issued: false },
            None => {
                let id = Uuid::new_v4();
                debug!(session = %id, "issuing comparison session");
                Self { id, issued: true }
            }
        }
    }

    /// Attach `Set-Cookie` to the response when this session was just issued.
    pub(crate) fn attach(self, mut response: Response) -> Response {
        if !self.issued {
            return response;
        }
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        response
    }
}

fn session_from_cookies(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
