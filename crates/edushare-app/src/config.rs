//! Application configuration.

use edushare_core::{UserId, WidgetConfig};
use std::path::PathBuf;

/// Overrides the data directory (library snapshots live in `<dir>/libraries`).
pub const DATA_DIR_ENV: &str = "EDUSHARE_DATA_DIR";
/// Selects which stored library the command line works on.
pub const LIBRARY_ENV: &str = "EDUSHARE_LIBRARY";
/// Account the command line acts as (a UUID).
pub const USER_ENV: &str = "EDUSHARE_USER";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Ids and class names of the rating widget.
    pub widget: WidgetConfig,
    /// Data directory; the platform default when `None`.
    pub data_dir: Option<PathBuf>,
    /// Id of the library snapshot to load.
    pub library_id: String,
    /// Account that owns uploads, folders and reviews made from this process.
    /// The nil UUID unless configured.
    pub user: UserId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "EduShare".to_string(),
            widget: WidgetConfig::default(),
            data_dir: None,
            library_id: "default".to_string(),
            user: UserId::nil(),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `EDUSHARE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = value(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(id) = value(LIBRARY_ENV) {
            config.library_id = id.trim().to_string();
        }
        if let Some(user) = value(USER_ENV) {
            match UserId::parse_str(user.trim()) {
                Ok(user) => config.user = user,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", USER_ENV, user, e),
            }
        }
        config
    }

    /// Data directory: the configured one or the platform default.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn data_dir(&self) -> edushare_core::StorageResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => edushare_core::storage::default_data_dir(),
        }
    }

    /// Directory holding library snapshots.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn libraries_dir(&self) -> edushare_core::StorageResult<PathBuf> {
        Ok(self.data_dir()?.join("libraries"))
    }

    /// Directory holding uploaded files.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn uploads_dir(&self) -> edushare_core::StorageResult<PathBuf> {
        Ok(self.data_dir()?.join("uploads"))
    }
}
