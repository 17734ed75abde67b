use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default countdown duration in minutes.
    #[serde(default)]
    pub focus_minutes: Option<u8>,

    /// Grace period before a checked-off todo is permanently removed, in seconds.
    #[serde(default)]
    pub delete_grace_secs: Option<u64>,

    /// Quiet period before a move/resize burst is persisted, in milliseconds.
    #[serde(default)]
    pub geometry_debounce_ms: Option<u64>,

    /// Pause after programmatic window placement before user events are trusted,
    /// in milliseconds.
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/perch/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("perch/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("perch\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_focus_minutes(&self) -> u8 {
        self.focus_minutes.unwrap_or(45).min(60)
    }

    pub fn effective_delete_grace(&self) -> Duration {
        Duration::from_secs(self.delete_grace_secs.unwrap_or(15))
    }

    pub fn effective_geometry_debounce(&self) -> Duration {
        Duration::from_millis(self.geometry_debounce_ms.unwrap_or(500))
    }

    pub fn effective_settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms.unwrap_or(300))
    }
}
