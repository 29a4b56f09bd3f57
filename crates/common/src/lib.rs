//! Shared helpers for the barbershop workspace: logging setup, runtime
//! directory checks and the small wire types every crate agrees on.

pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
        let v = serde_json::to_value(&h).unwrap_or_default();
        assert_eq!(v["status"], "ok");
    }
}
