mod config;
mod save_file;

pub use config::{Config, DisplayConfig, ViewConfig};
pub use save_file::SaveFile;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the habitrack data directory, creating it if needed.
///
/// `HABITRACK_HOME` overrides the location. Otherwise the directory is
/// `~/.config/habitrack[-dev]/`, with the `-dev` suffix selected by
/// `HABITRACK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITRACK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITRACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitrack-dev")
            } else {
                base_dir.join("habitrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
