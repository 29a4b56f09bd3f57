use std::sync::Arc;

use chrono::NaiveTime;
use models::working_hours::{self, DayHours};
use serde::Deserialize;
use tracing::{info, instrument};

use super::repository::HoursRepository;
use crate::errors::ServiceError;

/// Body of `PUT /hours/:weekday`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursInput {
    #[serde(with = "models::hhmm")]
    pub opens_at: NaiveTime,
    #[serde(with = "models::hhmm")]
    pub closes_at: NaiveTime,
    #[serde(default, with = "models::hhmm::option")]
    pub lunch_start: Option<NaiveTime>,
    #[serde(default, with = "models::hhmm::option")]
    pub lunch_end: Option<NaiveTime>,
}

pub struct ScheduleService {
    repo: Arc<dyn HoursRepository>,
}

impl ScheduleService {
    pub fn new(repo: Arc<dyn HoursRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<working_hours::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Hours for a weekday, `None` when the shop is closed.
    pub async fn for_weekday(&self, weekday: i16) -> Result<Option<working_hours::Model>, ServiceError> {
        self.repo.get(weekday).await
    }

    #[instrument(skip(self, input))]
    pub async fn set_hours(&self, weekday: i16, input: HoursInput) -> Result<working_hours::Model, ServiceError> {
        let saved = self.repo
            .upsert(DayHours {
                weekday,
                opens_at: input.opens_at,
                closes_at: input.closes_at,
                lunch_start: input.lunch_start,
                lunch_end: input.lunch_end,
            })
            .await?;
        info!(weekday, "working_hours_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn close_day(&self, weekday: i16) -> Result<(), ServiceError> {
        if !self.repo.delete(weekday).await? {
            return Err(ServiceError::NotFound(format!("no working hours for weekday {weekday}")));
        }
        info!(weekday, "working_day_closed");
        Ok(())
    }

    /// Seed the default week when no hours exist at all.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<usize, ServiceError> {
        if !self.repo.list().await?.is_empty() {
            return Ok(0);
        }
        let days = working_hours::defaults();
        for day in &days {
            self.repo.upsert(*day).await?;
        }
        info!(days = days.len(), "default_hours_seeded");
        Ok(days.len())
    }
}
