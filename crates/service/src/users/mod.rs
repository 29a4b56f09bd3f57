//! Users: accounts, barber listing and the repository every other module
//! resolves people through.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::UserService;
