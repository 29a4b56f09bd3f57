use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{extract::State, Json, Router};
use chrono::NaiveDate;
use models::reservation;
use serde::Deserialize;
use service::booking::domain::{
    Availability, ConfirmedReservation, CreateReservation, ReservationQuery, ReservationWithService, UpdateReservation,
};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{ApiPath, ApiQuery, CurrentUser, JsonBody};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/availability", get(availability))
        .route("/my-reservations", get(my_reservations))
        .route("/confirmed-by-day", get(confirmed_by_day))
        .route("/:id", put(update).delete(cancel))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub service_id: Uuid,
    pub barber_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: NaiveDate,
}

#[utoipa::path(get, path = "/api/reservations", tag = "reservations",
    params(("date" = Option<String>, Query, description = "YYYY-MM-DD"), ("serviceId" = Option<Uuid>, Query,), ("status" = Option<String>, Query,)),
    responses((status = 200, description = "Reservations", body = [crate::openapi::ReservationDoc]), (status = 403, description = "Staff only", body = crate::openapi::ErrorBody)))]
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<ReservationQuery>,
) -> Result<Json<Vec<reservation::Model>>, ApiError> {
    user.require_staff()?;
    Ok(Json(state.services.booking.list(query).await?))
}

#[utoipa::path(post, path = "/api/reservations", tag = "reservations", request_body = crate::openapi::ReservationRequest,
    responses((status = 201, description = "Booked (pending)", body = crate::openapi::ReservationDoc),
              (status = 400, description = "Not a bookable slot", body = crate::openapi::ErrorBody),
              (status = 409, description = "time slot not available", body = crate::openapi::ErrorBody)))]
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<CreateReservation>,
) -> Result<(StatusCode, Json<reservation::Model>), ApiError> {
    let created = state.services.booking.create(&user.0, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/reservations/availability", tag = "reservations",
    params(("date" = String, Query, description = "YYYY-MM-DD"), ("serviceId" = Uuid, Query,), ("barberId" = Option<Uuid>, Query,)),
    responses((status = 200, description = "Slots of the day", body = crate::openapi::AvailabilityDoc), (status = 404, description = "Unknown service", body = crate::openapi::ErrorBody)))]
pub async fn availability(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<AvailabilityQuery>,
) -> Result<Json<Availability>, ApiError> {
    Ok(Json(state.services.booking.availability(q.date, q.service_id, q.barber_id).await?))
}

#[utoipa::path(get, path = "/api/reservations/my-reservations", tag = "reservations",
    responses((status = 200, description = "Caller's reservations with service details")))]
pub async fn my_reservations(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<ReservationWithService>>, ApiError> {
    Ok(Json(state.services.booking.my_reservations(&user.0).await?))
}

#[utoipa::path(get, path = "/api/reservations/confirmed-by-day", tag = "reservations",
    params(("date" = String, Query, description = "YYYY-MM-DD")),
    responses((status = 200, description = "Confirmed agenda of the day"), (status = 403, description = "Staff only", body = crate::openapi::ErrorBody)))]
pub async fn confirmed_by_day(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> Result<Json<Vec<ConfirmedReservation>>, ApiError> {
    let actor = user.require_staff()?;
    Ok(Json(state.services.booking.confirmed_by_day(actor, q.date).await?))
}

#[utoipa::path(put, path = "/api/reservations/{id}", tag = "reservations", params(("id" = Uuid, Path,)), request_body = crate::openapi::ReservationUpdateRequest,
    responses((status = 200, description = "Updated", body = crate::openapi::ReservationDoc),
              (status = 403, description = "Not the owner, or a client changing more than the status", body = crate::openapi::ErrorBody),
              (status = 409, description = "time slot not available", body = crate::openapi::ErrorBody)))]
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    JsonBody(changes): JsonBody<UpdateReservation>,
) -> Result<Json<reservation::Model>, ApiError> {
    Ok(Json(state.services.booking.update(&user.0, id, changes).await?))
}

#[utoipa::path(delete, path = "/api/reservations/{id}", tag = "reservations", params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Cancelled", body = crate::openapi::ReservationDoc), (status = 404, description = "Unknown reservation", body = crate::openapi::ErrorBody)))]
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<reservation::Model>, ApiError> {
    Ok(Json(state.services.booking.cancel(&user.0, id).await?))
}
