use chrono::{NaiveDate, NaiveTime};
use models::reservation::{self, ReservationStatus};
use models::service;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::schedule::Slot;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: NaiveDate,
    pub service_id: Uuid,
    pub duration_min: i32,
    pub slots: Vec<Slot>,
}

/// Body of `POST /reservations`. Customer fields default to the caller's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub service_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "models::hhmm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub barber_id: Option<Uuid>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Body of `PUT /reservations/:id`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservation {
    pub service_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "models::hhmm::option")]
    pub time: Option<NaiveTime>,
    /// `null` unassigns the barber; an absent field keeps the current one.
    #[serde(default, deserialize_with = "present")]
    pub barber_id: Option<Option<Uuid>>,
    pub status: Option<ReservationStatus>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl UpdateReservation {
    pub fn touches_slot(&self) -> bool {
        self.service_id.is_some() || self.date.is_some() || self.time.is_some() || self.barber_id.is_some()
    }
}

/// Query string of `GET /reservations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQuery {
    pub date: Option<NaiveDate>,
    pub service_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub duration_min: i32,
    pub price: f64,
}

impl From<&service::Model> for ServiceSummary {
    fn from(s: &service::Model) -> Self {
        Self { id: s.id, name: s.name.clone(), duration_min: s.duration_min, price: s.price }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWithService {
    #[serde(flatten)]
    pub reservation: reservation::Model,
    pub service: Option<ServiceSummary>,
}

/// Agenda row for barbers: the reservation plus client and service names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedReservation {
    #[serde(flatten)]
    pub reservation: reservation::Model,
    pub client_name: String,
    pub service_name: Option<String>,
}
