//! Working hours per weekday and the slot computation built on them.

pub mod availability;
pub mod repository;
pub mod repo;
pub mod service;

pub use availability::{compute_slots, DayWindow, Slot};
pub use service::{HoursInput, ScheduleService};
