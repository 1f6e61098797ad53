//! Configuration for the standard catalog
//!
//! This module contains the configuration type and its loading functionality.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::error::{CaseFrameError, CaseFrameResult};

/// Environment variable holding the tracing filter
pub const ENV_LOG_FILTER: &str = "SEMNET_LOG_FILTER";
/// Environment variable switching JSON log output
pub const ENV_JSON_LOGS: &str = "SEMNET_JSON_LOGS";
/// Environment variable switching duplicate-relation warnings
pub const ENV_WARN_DUPLICATE_RELATIONS: &str = "SEMNET_WARN_DUPLICATE_RELATIONS";

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Tracing filter directive (e.g. "info,semnet_core=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,

    /// Warn when a frame definition repeats a relation name
    #[serde(default = "default_warn_duplicate_relations")]
    pub warn_on_duplicate_relations: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_warn_duplicate_relations() -> bool {
    true
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn load() -> CaseFrameResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn load_from<F>(lookup: F) -> CaseFrameResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        if let Some(json_logs) = lookup(ENV_JSON_LOGS) {
            match parse_flag(&json_logs) {
                Some(flag) => config.json_logs = flag,
                None => warn!("Invalid {} value: {}", ENV_JSON_LOGS, json_logs),
            }
        }

        if let Some(warn_duplicates) = lookup(ENV_WARN_DUPLICATE_RELATIONS) {
            match parse_flag(&warn_duplicates) {
                Some(flag) => config.warn_on_duplicate_relations = flag,
                None => warn!(
                    "Invalid {} value: {}",
                    ENV_WARN_DUPLICATE_RELATIONS, warn_duplicates
                ),
            }
        }

        config.validate()?;
        info!("Loaded catalog configuration");
        Ok(config)
    }

    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> CaseFrameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that required fields are usable
    pub fn validate(&self) -> CaseFrameResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CaseFrameError::Configuration(
                "Log filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json_logs: false,
            warn_on_duplicate_relations: default_warn_duplicate_relations(),
        }
    }
}
