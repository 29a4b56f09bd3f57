//! Environment/runtime helpers
//!
//! Sanity checks on the directories the server expects at startup.

use tracing::{info, warn};

/// Warn when the SPA bundle directory is missing; the API still works without it.
pub async fn ensure_env(static_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => {
            info!(%static_dir, "serving frontend bundle");
        }
        Ok(_) => {
            anyhow::bail!("{static_dir} exists but is not a directory");
        }
        Err(_) => {
            warn!(%static_dir, "frontend bundle directory not found; non-API paths will 404");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_env;

    #[tokio::test]
    async fn missing_directory_is_only_a_warning() {
        assert!(ensure_env("definitely/not/here").await.is_ok());
    }

    #[tokio::test]
    async fn regular_file_is_rejected() {
        assert!(ensure_env("Cargo.toml").await.is_err());
    }
}
