use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{extract::State, Json, Router};
use models::working_hours;
use service::schedule::HoursInput;

use crate::errors::ApiError;
use crate::extract::{ApiPath, CurrentUser, JsonBody};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(list))
        .route("/:weekday", put(set_day).delete(close_day))
}

#[utoipa::path(get, path = "/api/hours", tag = "hours", responses((status = 200, description = "Opening hours per weekday; missing days are closed", body = [crate::openapi::HoursDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<working_hours::Model>>, ApiError> {
    Ok(Json(state.services.schedule.list().await?))
}

#[utoipa::path(put, path = "/api/hours/{weekday}", tag = "hours", params(("weekday" = i16, Path, description = "0 = Monday .. 6 = Sunday")), request_body = crate::openapi::HoursRequest,
    responses((status = 200, description = "Saved", body = crate::openapi::HoursDoc), (status = 400, description = "Invalid hours", body = crate::openapi::ErrorBody)))]
pub async fn set_day(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(weekday): ApiPath<i16>,
    JsonBody(input): JsonBody<HoursInput>,
) -> Result<Json<working_hours::Model>, ApiError> {
    user.require_admin()?;
    Ok(Json(state.services.schedule.set_hours(weekday, input).await?))
}

#[utoipa::path(delete, path = "/api/hours/{weekday}", tag = "hours", params(("weekday" = i16, Path, description = "0 = Monday .. 6 = Sunday")),
    responses((status = 204, description = "Day closed"), (status = 404, description = "Already closed", body = crate::openapi::ErrorBody)))]
pub async fn close_day(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(weekday): ApiPath<i16>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    state.services.schedule.close_day(weekday).await?;
    Ok(StatusCode::NO_CONTENT)
}
