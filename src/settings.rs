use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagenotes";

pub const DEFAULT_PAGE_COUNT: u32 = 10;
pub const DEFAULT_MARKER: &str = "✎";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Total pages offered for navigation. Documents are not inspected.
    #[serde(default = "default_page_count")]
    pub page_count: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,

    /// Glyph drawn at a note's position on the page.
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default = "default_hud_seconds")]
    pub hud_seconds: u64,
}

fn default_page_count() -> u32 {
    DEFAULT_PAGE_COUNT
}

fn default_theme() -> String {
    "Oceanic Next".to_string()
}

fn default_sidebar_width() -> u16 {
    32
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_hud_seconds() -> u64 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_count: default_page_count(),
            theme: default_theme(),
            sidebar_width: default_sidebar_width(),
            marker: default_marker(),
            hud_seconds: default_hud_seconds(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

impl Settings {
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_yaml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&content, path)?;
        debug!("Loaded settings from {path:?}");
        Ok(settings)
    }

    /// Loads settings, falling back to defaults on any failure. A missing
    /// file at the default location is created with default values.
    pub fn load(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            return Self::load_from_path(path).unwrap_or_else(|e| {
                error!("{e}");
                Self::default()
            });
        }

        let Some(path) = default_config_path() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if path.exists() {
            Self::load_from_path(&path).unwrap_or_else(|e| {
                error!("{e}");
                Self::default()
            })
        } else {
            info!("Settings file not found, creating with defaults at {path:?}");
            let settings = Self::default();
            settings.save_to_file(&path);
            settings
        }
    }

    pub fn save_to_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!("Failed to create config directory {parent:?}: {e}");
                    return;
                }
            }
        }

        match fs::write(path, self.to_yaml()) {
            Ok(()) => debug!("Saved settings to {path:?}"),
            Err(e) => error!("Failed to save settings to {path:?}: {e}"),
        }
    }

    fn to_yaml(&self) -> String {
        let mut content = String::new();
        content.push_str("# Number of pages available for navigation\n");
        content.push_str(&format!("page_count: {}\n", self.page_count));
        content.push_str("# One of: \"Oceanic Next\", \"Catppuccin Mocha\"\n");
        content.push_str(&format!("theme: \"{}\"\n", self.theme));
        content.push_str(&format!("sidebar_width: {}\n", self.sidebar_width));
        content.push_str(&format!("marker: \"{}\"\n", self.marker));
        content.push_str("# How long status messages stay visible\n");
        content.push_str(&format!("hud_seconds: {}\n", self.hud_seconds));
        content
    }
}
