use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use service::auth::domain::{RegisterInput, UserView};
use service::users::domain::UserWithReservations;

use crate::errors::ApiError;
use crate::extract::{CurrentUser, JsonBody};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(register))
        .route("/admin", post(create_with_role))
        .route("/barbers", get(barbers))
}

#[utoipa::path(get, path = "/api/users", tag = "users",
    responses((status = 200, description = "All users with their reservations"), (status = 403, description = "Admins only", body = crate::openapi::ErrorBody)))]
pub async fn list(State(state): State<ServerState>, user: CurrentUser) -> Result<Json<Vec<UserWithReservations>>, ApiError> {
    user.require_admin()?;
    Ok(Json(state.services.users.list_with_reservations().await?))
}

#[utoipa::path(post, path = "/api/users", tag = "users", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered", body = crate::openapi::UserDoc),
              (status = 400, description = "Validation failed or duplicate", body = crate::openapi::ErrorBody),
              (status = 403, description = "Staff roles cannot self-register", body = crate::openapi::ErrorBody)))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let created = state.services.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(post, path = "/api/users/admin", tag = "users", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Created with the requested role", body = crate::openapi::UserDoc),
              (status = 403, description = "Admins only", body = crate::openapi::ErrorBody)))]
pub async fn create_with_role(
    State(state): State<ServerState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    user.require_admin()?;
    let created = state.services.auth.register_with_role(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/users/barbers", tag = "users", responses((status = 200, description = "Barbers", body = [crate::openapi::UserDoc])))]
pub async fn barbers(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ApiError> {
    Ok(Json(state.services.users.list_barbers().await?))
}
