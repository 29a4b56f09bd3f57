use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{LoginInput, UserView};

use crate::errors::ApiError;
use crate::extract::{CurrentUser, JsonBody, CSRF_HEADER, TOKEN_COOKIE};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in; sets the `token` cookie and the `X-CSRF-Token` header", body = crate::openapi::UserDoc),
              (status = 401, description = "invalid username or password", body = crate::openapi::ErrorBody)))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, [(&'static str, String); 1], Json<UserView>), ApiError> {
    let session = state.services.auth.login(input).await?;
    let cookie = Cookie::build((TOKEN_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.secure_cookies);
    Ok((jar.add(cookie), [(CSRF_HEADER, session.csrf)], Json(session.user)))
}

#[utoipa::path(post, path = "/api/login/logout", tag = "auth", responses((status = 200, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(Cookie::build((TOKEN_COOKIE, "")).path("/"));
    (StatusCode::OK, jar, Json(serde_json::json!({"message": "Logged out successfully"})))
}

#[utoipa::path(get, path = "/api/login/me", tag = "auth",
    responses((status = 200, description = "Current user", body = crate::openapi::UserDoc),
              (status = 401, description = "Missing or invalid session", body = crate::openapi::ErrorBody)))]
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> Result<Json<UserView>, ApiError> {
    Ok(Json(state.services.users.get(user.0.user_id).await?))
}
