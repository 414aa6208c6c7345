//! Shop configuration loaded from TOML.
//!
//! ```toml
//! timezone = "Europe/Zagreb"
//!
//! [rules]
//! opening = "09:00:00"
//! closing = "19:00:00"
//! slot_step_minutes = 30
//! closed_days = ["Sun"]
//! horizon_months = 1
//! cancel_notice_hours = 2
//! ```
//!
//! Every key is optional; missing keys fall back to the shop defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{BusinessRules, SystemClock};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// IANA timezone the shop trades in.
    pub timezone: String,
    pub rules: BusinessRules,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            rules: BusinessRules::default(),
        }
    }
}

impl ShopConfig {
    /// Read and validate the config at `path`, or the defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("Invalid config: {}", path.display()))?
            }
            None => Self::default(),
        };
        config.rules.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn system_clock(&self) -> Result<SystemClock> {
        Ok(SystemClock::from_name(&self.timezone)?)
    }
}
