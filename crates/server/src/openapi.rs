//! OpenAPI document. The schemas below describe the wire shapes only.
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// `cliente` (default), `barbero` or `admin`
    pub role: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub name: String,
    /// `hair`, `beardeyebrow`, `hairbeard` or `full_service`
    pub kind: Option<String>,
    pub description: Option<String>,
    pub duration_min: i32,
    pub price: f64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: Uuid,
    pub name: String,
    pub kind: Option<String>,
    pub description: String,
    pub duration_min: i32,
    pub price: f64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct HoursRequest {
    /// `HH:MM`
    pub opens_at: String,
    pub closes_at: String,
    pub lunch_start: Option<String>,
    pub lunch_end: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct HoursDoc {
    pub id: Uuid,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: i16,
    pub opens_at: String,
    pub closes_at: String,
    pub lunch_start: Option<String>,
    pub lunch_end: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub service_id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, one of the slots returned by availability
    pub time: String,
    pub barber_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReservationUpdateRequest {
    pub service_id: Option<Uuid>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// `null` removes the assigned barber
    pub barber_id: Option<Uuid>,
    /// `pending`, `confirmed` or `cancelled`
    pub status: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReservationDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub duration_min: i32,
    pub status: String,
}

#[derive(ToSchema)]
pub struct SlotDoc { pub time: String, pub available: bool }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AvailabilityDoc {
    pub date: String,
    pub service_id: Uuid,
    pub duration_min: i32,
    pub slots: Vec<SlotDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::login::login,
        crate::routes::login::logout,
        crate::routes::login::me,
        crate::routes::users::list,
        crate::routes::users::register,
        crate::routes::users::create_with_role,
        crate::routes::users::barbers,
        crate::routes::services::list,
        crate::routes::services::get_one,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete_one,
        crate::routes::services::delete_all,
        crate::routes::hours::list,
        crate::routes::hours::set_day,
        crate::routes::hours::close_day,
        crate::routes::reservations::list,
        crate::routes::reservations::create,
        crate::routes::reservations::availability,
        crate::routes::reservations::my_reservations,
        crate::routes::reservations::confirmed_by_day,
        crate::routes::reservations::update,
        crate::routes::reservations::cancel,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            LoginRequest,
            RegisterRequest,
            UserDoc,
            ServiceRequest,
            ServiceDoc,
            HoursRequest,
            HoursDoc,
            ReservationRequest,
            ReservationUpdateRequest,
            ReservationDoc,
            SlotDoc,
            AvailabilityDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "services"),
        (name = "hours"),
        (name = "reservations")
    )
)]
pub struct ApiDoc;
