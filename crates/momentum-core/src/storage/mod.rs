mod config;
pub mod state;

pub use config::{Config, HistoryConfig};
pub use state::{StateStore, StoredMomentum};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `MOMENTUM_DATA_DIR` wins when set. Otherwise `~/.config/momentum[-dev]/`
/// based on MOMENTUM_ENV; set MOMENTUM_ENV=dev to use the development
/// directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MOMENTUM_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("momentum-dev")
            } else {
                base_dir.join("momentum")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
