use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::deck::{LocatorTemplate, DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::gesture::DEFAULT_SWIPE_THRESHOLD;
use crate::runtime::CellSize;
use crate::session::SessionConfig;
use crate::view::ViewTuning;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub swipe_threshold: f64,
    pub image_base_url: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Fetch images over the network; when off every card stays on its stand-in
    pub load_images: bool,
    pub request_timeout_secs: u64,
    /// Distance units per terminal column
    pub cell_width: f64,
    /// Distance units per terminal row
    pub cell_height: f64,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let cell = CellSize::default();
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            load_images: true,
            request_timeout_secs: 20,
            cell_width: cell.width,
            cell_height: cell.height,
            log_level: None,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            swipe_threshold: self.swipe_threshold,
            locator: LocatorTemplate {
                base_url: self.image_base_url.clone(),
                width: self.image_width,
                height: self.image_height,
            },
            tuning: ViewTuning::default(),
        }
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize {
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reset distances that would break gesture resolution to their defaults.
    /// A threshold at or below zero commits on a plain tap, and a zero cell
    /// size collapses every drag to no movement.
    pub fn validate(&mut self) {
        let defaults = Config::default();
        if !is_positive_distance(self.swipe_threshold) {
            tracing::warn!(
                value = self.swipe_threshold,
                default = defaults.swipe_threshold,
                "invalid swipe_threshold, using default"
            );
            self.swipe_threshold = defaults.swipe_threshold;
        }
        if !is_positive_distance(self.cell_width) {
            tracing::warn!(value = self.cell_width, "invalid cell_width, using default");
            self.cell_width = defaults.cell_width;
        }
        if !is_positive_distance(self.cell_height) {
            tracing::warn!(value = self.cell_height, "invalid cell_height, using default");
            self.cell_height = defaults.cell_height;
        }
    }
}

fn is_positive_distance(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> crate::error::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("kitty-match.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(mut cfg) => {
                cfg.validate();
                cfg
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
