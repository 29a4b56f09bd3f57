//! SeaORM entities for the booking schema plus connection helpers.
pub mod errors;
pub mod db;
pub mod hhmm;
pub mod user;
pub mod service;
pub mod working_hours;
pub mod reservation;

pub use reservation::ReservationStatus;
pub use service::ServiceKind;
pub use user::Role;
