//! Reservations: availability queries, booking, updates and cancellation.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::BookingService;
