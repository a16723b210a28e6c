//! Planner configuration.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! max_months = 600
//! timeout_ms = 2000
//! ```
//!
//! Missing keys fall back to the defaults. `max_months` must be at least 1.

use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Hundred years of monthly payments.
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Upper bound on simulated months before a calculation is abandoned.
    pub max_months: u32,
    /// Wall-clock limit for a single calculation, checked between simulated
    /// months.
    pub timeout_ms: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            timeout_ms: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_months == 0 {
            return Err(PlannerError::ValidationError(
                "max_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
