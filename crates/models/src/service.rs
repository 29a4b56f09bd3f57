use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ServiceKind {
    #[sea_orm(string_value = "hair")]
    #[serde(rename = "hair")]
    Hair,
    #[sea_orm(string_value = "beardeyebrow")]
    #[serde(rename = "beardeyebrow")]
    BeardEyebrow,
    #[sea_orm(string_value = "hairbeard")]
    #[serde(rename = "hairbeard")]
    HairBeard,
    #[sea_orm(string_value = "full_service")]
    #[serde(rename = "full_service")]
    FullService,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub kind: Option<ServiceKind>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub duration_min: i32,
    pub price: f64,
    pub created_at: DateTimeWithTimeZone,
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

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub kind: Option<ServiceKind>,
    pub description: String,
    pub duration_min: i32,
    pub price: f64,
}

pub fn validate_fields(name: &str, duration_min: i32, price: f64) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if duration_min <= 0 {
        return Err(ModelError::Validation("duration must be a positive number of minutes".into()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewService) -> Result<Model, ModelError> {
    validate_fields(&new.name, new.duration_min, new.price)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new.name.trim().to_string()),
        kind: Set(new.kind),
        description: Set(new.description),
        duration_min: Set(new.duration_min),
        price: Set(new.price),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// The four services every shop starts with.
pub fn defaults() -> Vec<NewService> {
    vec![
        NewService {
            name: "Corte de cabello".into(),
            kind: Some(ServiceKind::Hair),
            description: "Corte de cabello".into(),
            duration_min: 30,
            price: 10.0,
        },
        NewService {
            name: "Corte de barba y perfilado".into(),
            kind: Some(ServiceKind::BeardEyebrow),
            description: "Corte de barba y cejas".into(),
            duration_min: 20,
            price: 8.0,
        },
        NewService {
            name: "Corte de cabello y barba".into(),
            kind: Some(ServiceKind::HairBeard),
            description: "Corte de cabello y barba".into(),
            duration_min: 40,
            price: 15.0,
        },
        NewService {
            name: "Servicio completo".into(),
            kind: Some(ServiceKind::FullService),
            description: "Servicio completo".into(),
            duration_min: 50,
            price: 18.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_duration_and_negative_price() {
        assert!(validate_fields("Corte", 0, 10.0).is_err());
        assert!(validate_fields("Corte", 30, -1.0).is_err());
        assert!(validate_fields("  ", 30, 1.0).is_err());
        assert!(validate_fields("Corte", 30, 0.0).is_ok());
    }

    #[test]
    fn defaults_are_valid() {
        for s in defaults() {
            validate_fields(&s.name, s.duration_min, s.price).unwrap();
        }
        let kinds: Vec<_> = defaults().into_iter().filter_map(|s| s.kind).collect();
        assert_eq!(serde_json::to_value(kinds).unwrap(), serde_json::json!(["hair", "beardeyebrow", "hairbeard", "full_service"]));
    }
}
