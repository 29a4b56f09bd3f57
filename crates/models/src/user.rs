use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "cliente")]
    Cliente,
    #[sea_orm(string_value = "barbero")]
    Barbero,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cliente => "cliente",
            Role::Barbero => "barbero",
            Role::Admin => "admin",
        }
    }

    /// Barbers and admins manage the shop's agenda.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Barbero | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
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

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().chars().count() < 3 {
        return Err(ModelError::Validation("username must be at least 3 characters long".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(&self.username)?;
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        validate_email(&self.email)
    }
}

pub async fn create(db: &DatabaseConnection, new: NewUser) -> Result<Model, ModelError> {
    new.validate()?;
    let username = new.username.trim().to_string();
    let email = new.email.trim().to_lowercase();
    if Entity::find().filter(Column::Username.eq(username.clone())).one(db).await?.is_some() {
        return Err(ModelError::Duplicate("username"));
    }
    if Entity::find().filter(Column::Email.eq(email.clone())).one(db).await?.is_some() {
        return Err(ModelError::Duplicate("email"));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        name: Set(new.name.trim().to_string()),
        email: Set(email),
        password_hash: Set(new.password_hash),
        role: Set(new.role),
        phone: Set(new.phone.filter(|p| !p.trim().is_empty())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(map_unique_violation)
}

/// Concurrent inserts can still race past the lookups above.
fn map_unique_violation(e: DbErr) -> ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => ModelError::Duplicate("email"),
        Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Duplicate("username"),
        _ => ModelError::Db(e.to_string()),
    }
}
