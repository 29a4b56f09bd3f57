//! Auth module: domain types, password hashing, token issue and verification.
//!
//! This module centralizes registration, login and session checks under the service crate.
//! Persistence goes through [`crate::users::repository::UserRepository`].

pub mod domain;
pub mod errors;
pub mod password;
pub mod service;

pub use service::{AuthConfig, AuthService};
