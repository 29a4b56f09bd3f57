//! Service layer providing the booking business rules on top of models.
//! - Separates business logic from data access via repository traits.
//! - Each repository has a SeaORM implementation and an in-memory mock.
//! - Reuses validation and entity definitions from the `models` crate.

pub mod errors;
pub mod auth;
pub mod users;
pub mod catalog;
pub mod schedule;
pub mod booking;
pub mod repositories;
pub(crate) mod sync;
#[cfg(test)]
pub mod test_support;

pub use repositories::{Repositories, Services};
