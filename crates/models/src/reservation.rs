use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "crate::hhmm")]
    pub time: NaiveTime,
    /// Service duration at booking time.
    pub duration_min: i32,
    pub status: ReservationStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    Barber,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Barber => Entity::belongs_to(user::Entity)
                .from(Column::BarberId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn end_time(&self) -> NaiveTime {
        self.time + chrono::Duration::minutes(i64::from(self.duration_min))
    }

    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_min: i32,
}

pub async fn create(db: &DatabaseConnection, new: NewReservation) -> Result<Model, ModelError> {
    if new.customer_name.trim().is_empty() {
        return Err(ModelError::Validation("customer name required".into()));
    }
    user::validate_email(&new.email)?;
    if new.duration_min <= 0 {
        return Err(ModelError::Validation("duration must be positive".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        service_id: Set(new.service_id),
        barber_id: Set(new.barber_id),
        customer_name: Set(new.customer_name.trim().to_string()),
        email: Set(new.email.trim().to_string()),
        phone: Set(new.phone.filter(|p| !p.trim().is_empty())),
        date: Set(new.date),
        time: Set(new.time),
        duration_min: Set(new.duration_min),
        status: Set(ReservationStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
