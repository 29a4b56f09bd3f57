//! Extractors that reject with [`ApiError`] so every failure keeps the JSON error shape.
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use models::user::Role;
use serde::de::DeserializeOwned;
use service::auth::domain::Actor;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const TOKEN_COOKIE: &str = "token";
pub const CSRF_HEADER: &str = "x-csrf-token";

pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Path parameters; anything that fails to parse is a malformed id.
pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(_) => Err(ApiError::BadRequest("malformatted id".into())),
        }
    }
}

/// Caller authenticated by the `token` cookie plus a matching `X-CSRF-Token` header.
pub struct CurrentUser(pub Actor);

impl CurrentUser {
    pub fn require(&self, roles: &[Role]) -> Result<&Actor, ApiError> {
        if self.0.has_any_role(roles) {
            Ok(&self.0)
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn require_admin(&self) -> Result<&Actor, ApiError> {
        self.require(&[Role::Admin])
    }

    pub fn require_staff(&self) -> Result<&Actor, ApiError> {
        self.require(&[Role::Barbero, Role::Admin])
    }
}

#[axum::async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string());
        let csrf = parts.headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok());
        let actor = state.services.auth.verify(token.as_deref(), csrf).map_err(|e| {
            tracing::debug!(path = %parts.uri.path(), error = %e, "authentication rejected");
            ApiError::from(e)
        })?;
        Ok(Self(actor))
    }
}
