use models::reservation;
use models::user::{self, Role};
use serde::Serialize;
use uuid::Uuid;

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
}

impl From<&user::Model> for UserView {
    fn from(u: &user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            phone: u.phone.clone(),
        }
    }
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self::from(&u)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithReservations {
    #[serde(flatten)]
    pub user: UserView,
    pub reservations: Vec<reservation::Model>,
}
