use models::user::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::users::domain::UserView;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login result (session). `token` goes into the cookie, `csrf` into the response header.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserView,
    pub token: String,
    pub csrf: String,
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub csrf: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller a service operation runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

impl From<Claims> for Actor {
    fn from(c: Claims) -> Self {
        Self { user_id: c.sub, username: c.username, role: c.role }
    }
}
