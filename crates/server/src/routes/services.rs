use axum::http::StatusCode;
use axum::routing::get;
use axum::{extract::State, Json, Router};
use models::service::Model as ServiceModel;
use service::catalog::{ServiceInput, ServicePatch};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{ApiPath, CurrentUser, JsonBody};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(create).delete(delete_all))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "Service catalog", body = [crate::openapi::ServiceDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ServiceModel>>, ApiError> {
    Ok(Json(state.services.catalog.list().await?))
}

#[utoipa::path(get, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 200, description = "Service", body = crate::openapi::ServiceDoc), (status = 404, description = "Unknown service", body = crate::openapi::ErrorBody)))]
pub async fn get_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<ServiceModel>, ApiError> {
    Ok(Json(state.services.catalog.get(id).await?))
}

#[utoipa::path(post, path = "/api/services", tag = "services", request_body = crate::openapi::ServiceRequest,
    responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Invalid fields", body = crate::openapi::ErrorBody)))]
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<ServiceInput>,
) -> Result<(StatusCode, Json<ServiceModel>), ApiError> {
    user.require_admin()?;
    let created = state.services.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::ServiceRequest,
    responses((status = 200, description = "Updated", body = crate::openapi::ServiceDoc), (status = 404, description = "Unknown service", body = crate::openapi::ErrorBody)))]
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    JsonBody(patch): JsonBody<ServicePatch>,
) -> Result<Json<ServiceModel>, ApiError> {
    user.require_admin()?;
    Ok(Json(state.services.catalog.update(id, patch).await?))
}

#[utoipa::path(delete, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Unknown service", body = crate::openapi::ErrorBody)))]
pub async fn delete_one(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state.services.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/services", tag = "services", responses((status = 204, description = "Catalog emptied")))]
pub async fn delete_all(State(state): State<ServerState>, user: CurrentUser) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state.services.catalog.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
