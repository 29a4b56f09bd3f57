use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use models::reservation::{self, NewReservation, ReservationStatus};
use models::service;
use models::user::Role;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{
    Availability, ConfirmedReservation, CreateReservation, ReservationQuery, ReservationWithService, ServiceSummary,
    UpdateReservation,
};
use super::repository::{ReservationFilter, ReservationRepository};
use crate::auth::domain::Actor;
use crate::catalog::repository::ServiceRepository;
use crate::errors::ServiceError;
use crate::schedule::availability::{compute_slots, DayWindow};
use crate::schedule::repository::HoursRepository;
use crate::users::repository::UserRepository;

pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub const SLOT_NOT_AVAILABLE: &str = "time slot not available";

pub struct BookingService {
    reservations: Arc<dyn ReservationRepository>,
    services: Arc<dyn ServiceRepository>,
    hours: Arc<dyn HoursRepository>,
    users: Arc<dyn UserRepository>,
    slot_minutes: i64,
    clock: Clock,
}

/// Weekday index used by working hours: 0 = Monday.
fn weekday_of(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

impl BookingService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        services: Arc<dyn ServiceRepository>,
        hours: Arc<dyn HoursRepository>,
        users: Arc<dyn UserRepository>,
        slot_minutes: u32,
    ) -> Self {
        Self {
            reservations,
            services,
            hours,
            users,
            slot_minutes: i64::from(slot_minutes),
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Replace the wall clock, mainly for tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start-time cutoff for `date`: nothing on past days, not before now today.
    fn cutoff(&self, date: NaiveDate, closes_at: NaiveTime) -> Option<NaiveTime> {
        let now = (self.clock)();
        if date < now.date() {
            Some(closes_at)
        } else if date == now.date() {
            Some(now.time())
        } else {
            None
        }
    }

    async fn booked_intervals(
        &self,
        date: NaiveDate,
        barber_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<(NaiveTime, i64)>, ServiceError> {
        let rows = self.reservations
            .list(ReservationFilter { date: Some(date), exclude_cancelled: true, ..Default::default() })
            .await?;
        Ok(rows
            .into_iter()
            .filter(|r| Some(r.id) != exclude)
            .filter(|r| barber_id.map_or(true, |b| r.barber_id == Some(b)))
            .map(|r| (r.time, i64::from(r.duration_min)))
            .collect())
    }

    async fn service_or(&self, id: Uuid, missing: impl FnOnce() -> ServiceError) -> Result<service::Model, ServiceError> {
        self.services.get(id).await?.ok_or_else(missing)
    }

    /// Free and taken start times for `service_id` on `date`.
    #[instrument(skip(self))]
    pub async fn availability(
        &self,
        date: NaiveDate,
        service_id: Uuid,
        barber_id: Option<Uuid>,
    ) -> Result<Availability, ServiceError> {
        let svc = self.service_or(service_id, || ServiceError::not_found("service")).await?;
        let slots = match self.hours.get(weekday_of(date)).await? {
            None => Vec::new(),
            Some(day) => {
                let booked = self.booked_intervals(date, barber_id, None).await?;
                compute_slots(
                    &DayWindow::from(&day),
                    i64::from(svc.duration_min),
                    self.slot_minutes,
                    &booked,
                    self.cutoff(date, day.closes_at),
                )
            }
        };
        Ok(Availability { date, service_id, duration_min: svc.duration_min, slots })
    }

    /// Check that `time` on `date` is a free slot for `svc`, ignoring `exclude`.
    async fn ensure_bookable(
        &self,
        svc: &service::Model,
        date: NaiveDate,
        time: NaiveTime,
        barber_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let now = (self.clock)();
        if date < now.date() {
            return Err(ServiceError::Validation("reservation date cannot be in the past".into()));
        }
        if date == now.date() && time < now.time() {
            return Err(ServiceError::Validation("reservation time cannot be in the past".into()));
        }
        if let Some(barber) = barber_id {
            let is_barber = self.users.find_by_id(barber).await?.is_some_and(|u| u.role == Role::Barbero);
            if !is_barber {
                return Err(ServiceError::Validation("barber not found".into()));
            }
        }
        let day = self.hours
            .get(weekday_of(date))
            .await?
            .ok_or_else(|| ServiceError::Validation("the barbershop is closed on that day".into()))?;
        let booked = self.booked_intervals(date, barber_id, exclude).await?;
        let slots = compute_slots(&DayWindow::from(&day), i64::from(svc.duration_min), self.slot_minutes, &booked, None);
        match slots.iter().find(|s| s.time == time) {
            None => Err(ServiceError::Validation("requested time is not a bookable slot".into())),
            Some(slot) if !slot.available => Err(ServiceError::Conflict(SLOT_NOT_AVAILABLE.into())),
            Some(_) => Ok(()),
        }
    }

    #[instrument(skip(self, actor, input), fields(user_id = %actor.user_id, date = %input.date, time = %input.time))]
    pub async fn create(&self, actor: &Actor, input: CreateReservation) -> Result<reservation::Model, ServiceError> {
        let svc = self
            .service_or(input.service_id, || ServiceError::Validation("unknown service".into()))
            .await?;
        self.ensure_bookable(&svc, input.date, input.time, input.barber_id, None).await?;

        let client = self.users.find_by_id(actor.user_id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        let created = self.reservations
            .insert(NewReservation {
                user_id: client.id,
                service_id: svc.id,
                barber_id: input.barber_id,
                customer_name: input.full_name.filter(|n| !n.trim().is_empty()).unwrap_or(client.name),
                email: input.email.filter(|e| !e.trim().is_empty()).unwrap_or(client.email),
                phone: input.phone.or(client.phone),
                date: input.date,
                time: input.time,
                duration_min: svc.duration_min,
            })
            .await?;
        info!(reservation_id = %created.id, service_id = %svc.id, barber_id = ?created.barber_id, "reservation_created");
        Ok(created)
    }

    pub async fn list(&self, query: ReservationQuery) -> Result<Vec<reservation::Model>, ServiceError> {
        self.reservations
            .list(ReservationFilter {
                date: query.date,
                service_id: query.service_id,
                status: query.status,
                ..Default::default()
            })
            .await
    }

    async fn service_index(&self) -> Result<HashMap<Uuid, service::Model>, ServiceError> {
        Ok(self.services.list().await?.into_iter().map(|s| (s.id, s)).collect())
    }

    pub async fn my_reservations(&self, actor: &Actor) -> Result<Vec<ReservationWithService>, ServiceError> {
        let rows = self.reservations
            .list(ReservationFilter { user_id: Some(actor.user_id), ..Default::default() })
            .await?;
        let services = self.service_index().await?;
        Ok(rows
            .into_iter()
            .map(|r| ReservationWithService {
                service: services.get(&r.service_id).map(ServiceSummary::from),
                reservation: r,
            })
            .collect())
    }

    /// Confirmed agenda of a day. Barbers see their own and unassigned reservations.
    #[instrument(skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn confirmed_by_day(&self, actor: &Actor, date: NaiveDate) -> Result<Vec<ConfirmedReservation>, ServiceError> {
        if !actor.is_staff() {
            return Err(ServiceError::Forbidden);
        }
        let rows = self.reservations
            .list(ReservationFilter { date: Some(date), status: Some(ReservationStatus::Confirmed), ..Default::default() })
            .await?;
        let services = self.service_index().await?;
        let clients: HashMap<Uuid, String> = self.users.list().await?.into_iter().map(|u| (u.id, u.name)).collect();
        let out: Vec<_> = rows
            .into_iter()
            .filter(|r| actor.role != Role::Barbero || r.barber_id.map_or(true, |b| b == actor.user_id))
            .map(|r| ConfirmedReservation {
                service_name: services.get(&r.service_id).map(|s| s.name.clone()),
                client_name: clients.get(&r.user_id).cloned().unwrap_or_else(|| r.customer_name.clone()),
                reservation: r,
            })
            .collect();
        debug!(count = out.len(), "confirmed reservations loaded");
        Ok(out)
    }

    async fn load_for(&self, actor: &Actor, id: Uuid) -> Result<reservation::Model, ServiceError> {
        let found = self.reservations.get(id).await?.ok_or_else(|| ServiceError::not_found("reservation"))?;
        if !actor.is_staff() && found.user_id != actor.user_id {
            return Err(ServiceError::Forbidden);
        }
        Ok(found)
    }

    /// Clients may only cancel their own reservations; staff may change anything.
    #[instrument(skip(self, actor, changes), fields(user_id = %actor.user_id))]
    pub async fn update(&self, actor: &Actor, id: Uuid, changes: UpdateReservation) -> Result<reservation::Model, ServiceError> {
        let mut current = self.load_for(actor, id).await?;
        if !actor.is_staff() && (changes.touches_slot() || matches!(changes.status, Some(s) if s != ReservationStatus::Cancelled)) {
            return Err(ServiceError::Forbidden);
        }

        // a cancelled reservation gave its slot back, so reactivating it has to claim it again
        let reactivates = current.status == ReservationStatus::Cancelled
            && changes.status.is_some_and(|s| s != ReservationStatus::Cancelled);
        if changes.touches_slot() || reactivates {
            let svc = match changes.service_id {
                Some(sid) => self.service_or(sid, || ServiceError::Validation("unknown service".into())).await?,
                None => self.service_or(current.service_id, || ServiceError::not_found("service")).await?,
            };
            let date = changes.date.unwrap_or(current.date);
            let time = changes.time.unwrap_or(current.time);
            let barber_id = changes.barber_id.unwrap_or(current.barber_id);
            self.ensure_bookable(&svc, date, time, barber_id, Some(current.id)).await?;
            current.service_id = svc.id;
            current.duration_min = svc.duration_min;
            current.date = date;
            current.time = time;
            current.barber_id = barber_id;
        }
        if let Some(status) = changes.status {
            current.status = status;
        }
        let saved = self.reservations.save(current).await?;
        info!(reservation_id = %saved.id, status = ?saved.status, "reservation_updated");
        Ok(saved)
    }

    #[instrument(skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn cancel(&self, actor: &Actor, id: Uuid) -> Result<reservation::Model, ServiceError> {
        let mut current = self.load_for(actor, id).await?;
        current.status = ReservationStatus::Cancelled;
        let saved = self.reservations.save(current).await?;
        info!(reservation_id = %saved.id, "reservation_cancelled");
        Ok(saved)
    }
}
