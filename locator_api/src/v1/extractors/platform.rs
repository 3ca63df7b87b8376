use axum::{
    extract::FromRequestParts,
    http::{header::USER_AGENT, request::Parts},
};
use shared::platform::Platform;
use std::convert::Infallible;

/// The caller's [`Platform`] from its `User-Agent`, or `None` when the header is absent.
pub struct ClientPlatform(pub Option<Platform>);

impl<S> FromRequestParts<S> for ClientPlatform
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(USER_AGENT)
                .and_then(|ua| ua.to_str().ok())
                .map(Platform::from_user_agent),
        ))
    }
}
