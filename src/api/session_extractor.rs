use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

const SESSION_HEADER: &str = "x-session-id";

/// Interaction source a request belongs to, taken from the `X-Session-Id` header.
///
/// Requests sharing a session supersede each other: starting a new chain
/// cancels the one still in flight. Requests without the header are
/// independent of everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionKey(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionKey(extract_header_value(&parts.headers, SESSION_HEADER)))
    }
}

/// Extract a non-blank header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
