//! Runtime configuration, read from command-line flags with environment
//! fallbacks.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_PAGE_ID: &str = "default";
const DEFAULT_CACHE_DIR: &str = ".sketchboard";
const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 1.0;
const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("page id must not be empty")]
    EmptyPageId,
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("remote timeout must be non-zero")]
    ZeroTimeout,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sketchboard", about = "Headless sketchboard canvas session")]
pub struct Config {
    /// Base URL of the remote shape store.
    #[arg(long, env = "SKETCHBOARD_REMOTE_URL", default_value = DEFAULT_REMOTE_URL)]
    pub remote_url: String,

    /// Page whose shapes are loaded and created.
    #[arg(long, env = "SKETCHBOARD_PAGE_ID", default_value = DEFAULT_PAGE_ID)]
    pub page_id: String,

    /// Directory for the local shape cache.
    #[arg(long, env = "SKETCHBOARD_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Initial logical canvas width in CSS pixels.
    #[arg(long, env = "SKETCHBOARD_CANVAS_WIDTH", default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub canvas_width: f64,

    /// Fixed logical canvas height in CSS pixels.
    #[arg(long, env = "SKETCHBOARD_CANVAS_HEIGHT", default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub canvas_height: f64,

    /// Physical pixels per logical pixel.
    #[arg(long, env = "SKETCHBOARD_DPR", default_value_t = DEFAULT_DEVICE_PIXEL_RATIO)]
    pub device_pixel_ratio: f64,

    /// Per-request timeout for remote calls, in milliseconds.
    #[arg(long, env = "SKETCHBOARD_REMOTE_TIMEOUT_MS", default_value_t = DEFAULT_REMOTE_TIMEOUT_MS)]
    pub remote_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_owned(),
            page_id: DEFAULT_PAGE_ID.to_owned(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
            remote_timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Reject settings the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_id.trim().is_empty() {
            return Err(ConfigError::EmptyPageId);
        }
        for (name, value) in [
            ("canvas width", self.canvas_width),
            ("canvas height", self.canvas_height),
            ("device pixel ratio", self.device_pixel_ratio),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.remote_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    #[must_use]
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}
