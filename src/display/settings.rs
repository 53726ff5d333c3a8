//! # Settings File
//!
//! A JSON document bundling everything a session needs at startup:
//!
//! ```json
//! {
//!   "config": { "row": 4, "halign": "center", "valign": "center" },
//!   "restricted": { "font_mult": 3, "font": "ibm" },
//!   "console": { "capacity": 8, "top_row": 2 }
//! }
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::{Config, RestrictedConfig};
use crate::console::{DEFAULT_CAPACITY, DEFAULT_COL, DEFAULT_TOP_ROW};
use crate::error::{InkError, Result};

/// Layout of the scrolling console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Maximum number of buffered lines
    pub capacity: usize,
    /// Row the console is drawn from
    pub top_row: i16,
    /// Column every console line starts at
    pub col: i16,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            top_row: DEFAULT_TOP_ROW,
            col: DEFAULT_COL,
        }
    }
}

impl ConsoleSettings {
    /// Reject layouts the console cannot draw.
    pub fn validate(&self) -> Result<()> {
        if self.top_row < 0 {
            return Err(InkError::Config(format!(
                "console.top_row must not be negative (got {})",
                self.top_row
            )));
        }
        Ok(())
    }
}

/// Startup settings for a [`Session`](crate::Session)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub config: Config,
    pub restricted: RestrictedConfig,
    pub console: ConsoleSettings,
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| InkError::Config(e.to_string()))?;
        settings.console.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| InkError::Config(format!("{}: {}", path.display(), e)))?;
        settings.console.validate()?;
        Ok(settings)
    }

    /// The render config with the restricted options folded in.
    pub fn resolved_config(&self) -> Config {
        let mut config = self.config;
        config.apply_restricted(&self.restricted);
        config
    }
}
