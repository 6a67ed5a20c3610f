//! Binding configuration
//!
//! Every field has a default matching the historical behaviour of the
//! binding, so an empty JSON object is a valid configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capacity of the text buffer handed to the engine for profile info lookups
pub const DEFAULT_INFO_BUFFER_CAPACITY: usize = 1000;

/// Largest accepted text buffer; the engine takes its size as a `u32`
pub const MAX_INFO_BUFFER_CAPACITY: usize = 1 << 20;

/// Gamma of the built-in gray profile
pub const DEFAULT_GRAY_GAMMA: f64 = 2.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes available to the engine when filling profile text fields,
    /// including the terminating NUL
    pub info_buffer_capacity: usize,
    /// Gamma used when a gray profile is requested without one
    pub default_gray_gamma: f64,
    /// Reject unknown format tags instead of falling back to 8-bit gray
    pub strict_format_tags: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            info_buffer_capacity: DEFAULT_INFO_BUFFER_CAPACITY,
            default_gray_gamma: DEFAULT_GRAY_GAMMA,
            strict_format_tags: false,
        }
    }
}

impl Config {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.info_buffer_capacity < 2 {
            return Err(Error::Config(format!(
                "info_buffer_capacity must be at least 2, got {}",
                self.info_buffer_capacity
            )));
        }
        if self.info_buffer_capacity > MAX_INFO_BUFFER_CAPACITY {
            return Err(Error::Config(format!(
                "info_buffer_capacity must be at most {}, got {}",
                MAX_INFO_BUFFER_CAPACITY, self.info_buffer_capacity
            )));
        }
        if !(self.default_gray_gamma.is_finite() && self.default_gray_gamma > 0.0) {
            return Err(Error::Config(format!(
                "default_gray_gamma must be a positive finite number, got {}",
                self.default_gray_gamma
            )));
        }
        Ok(())
    }
}
