use chrono::{NaiveTime, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Opening hours of one weekday (0 = Monday .. 6 = Sunday).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "working_hours")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub weekday: i16,
    #[serde(with = "crate::hhmm")]
    pub opens_at: NaiveTime,
    #[serde(with = "crate::hhmm")]
    pub closes_at: NaiveTime,
    #[serde(default, with = "crate::hhmm::option")]
    pub lunch_start: Option<NaiveTime>,
    #[serde(default, with = "crate::hhmm::option")]
    pub lunch_end: Option<NaiveTime>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn lunch(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.lunch_start.zip(self.lunch_end)
    }
}

/// Desired hours for a weekday; `validate` enforces the ordering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub weekday: i16,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub lunch_start: Option<NaiveTime>,
    pub lunch_end: Option<NaiveTime>,
}

impl DayHours {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(0..=6).contains(&self.weekday) {
            return Err(ModelError::Validation("weekday must be between 0 (Monday) and 6 (Sunday)".into()));
        }
        if self.opens_at >= self.closes_at {
            return Err(ModelError::Validation("opening time must be before closing time".into()));
        }
        match (self.lunch_start, self.lunch_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if start >= end {
                    return Err(ModelError::Validation("lunch start must be before lunch end".into()));
                }
                if start < self.opens_at || end > self.closes_at {
                    return Err(ModelError::Validation("lunch break must fall within opening hours".into()));
                }
                Ok(())
            }
            _ => Err(ModelError::Validation("lunch break needs both start and end".into())),
        }
    }
}

/// Insert or replace the row for `hours.weekday`.
pub async fn upsert(db: &DatabaseConnection, hours: DayHours) -> Result<Model, ModelError> {
    hours.validate()?;
    let now = Utc::now().into();
    match Entity::find().filter(Column::Weekday.eq(hours.weekday)).one(db).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.opens_at = Set(hours.opens_at);
            am.closes_at = Set(hours.closes_at);
            am.lunch_start = Set(hours.lunch_start);
            am.lunch_end = Set(hours.lunch_end);
            am.updated_at = Set(now);
            Ok(am.update(db).await?)
        }
        None => {
            let am = ActiveModel {
                id: Set(Uuid::new_v4()),
                weekday: Set(hours.weekday),
                opens_at: Set(hours.opens_at),
                closes_at: Set(hours.closes_at),
                lunch_start: Set(hours.lunch_start),
                lunch_end: Set(hours.lunch_end),
                updated_at: Set(now),
            };
            Ok(am.insert(db).await?)
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

/// Monday to Saturday, 09:00-19:00 with a 12:00-13:00 lunch break.
pub fn defaults() -> Vec<DayHours> {
    (0..6)
        .map(|weekday| DayHours {
            weekday,
            opens_at: hm(9, 0),
            closes_at: hm(19, 0),
            lunch_start: Some(hm(12, 0)),
            lunch_end: Some(hm(13, 0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(open: (u32, u32), close: (u32, u32), lunch: Option<((u32, u32), (u32, u32))>) -> DayHours {
        DayHours {
            weekday: 2,
            opens_at: hm(open.0, open.1),
            closes_at: hm(close.0, close.1),
            lunch_start: lunch.map(|l| hm(l.0 .0, l.0 .1)),
            lunch_end: lunch.map(|l| hm(l.1 .0, l.1 .1)),
        }
    }

    #[test]
    fn ordering_rules() {
        assert!(day((9, 0), (19, 0), Some(((12, 0), (13, 0)))).validate().is_ok());
        assert!(day((19, 0), (9, 0), None).validate().is_err());
        assert!(day((9, 0), (19, 0), Some(((13, 0), (12, 0)))).validate().is_err());
        assert!(day((9, 0), (19, 0), Some(((8, 0), (9, 30)))).validate().is_err());
        let mut half = day((9, 0), (19, 0), None);
        half.lunch_start = Some(hm(12, 0));
        assert!(half.validate().is_err());
        let mut sunday_plus = day((9, 0), (19, 0), None);
        sunday_plus.weekday = 7;
        assert!(sunday_plus.validate().is_err());
    }

    #[test]
    fn defaults_skip_sunday() {
        let days: Vec<i16> = defaults().iter().map(|d| d.weekday).collect();
        assert_eq!(days, vec![0, 1, 2, 3, 4, 5]);
        assert!(defaults().iter().all(|d| d.validate().is_ok()));
    }
}
