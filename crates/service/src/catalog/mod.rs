//! Catalog of barbershop services (name, kind, duration, price).

pub mod repository;
pub mod repo;
pub mod service;

pub use service::{CatalogService, ServiceInput, ServicePatch};
