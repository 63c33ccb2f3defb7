// Copyright 2025 Cowboy AI, LLC.

//! Configuration for the pizzeria server and the customer client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How the pizzeria answers an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    /// Look the pizza up locally and send the description as reply text
    Inline,
    /// Send the pizza's class id and let the customer resolve it against
    /// its own copy of the ontology
    #[default]
    Reference,
}

impl fmt::Display for WireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireMode::Inline => write!(f, "inline"),
            WireMode::Reference => write!(f, "reference"),
        }
    }
}

/// Error for wire mode names that are neither "inline" nor "reference"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown wire mode: {0} (expected \"inline\" or \"reference\")")]
pub struct ParseWireModeError(String);

impl FromStr for WireMode {
    type Err = ParseWireModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(WireMode::Inline),
            "reference" => Ok(WireMode::Reference),
            other => Err(ParseWireModeError(other.to_string())),
        }
    }
}

/// Configuration for the pizzeria server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host to bind the listener on
    pub host: String,
    /// Port to bind the listener on
    pub port: u16,
    /// How many bind attempts to make before giving up
    pub bind_attempts: u32,
    /// Delay between bind attempts, in seconds
    pub bind_retry_delay_secs: u64,
    /// How order replies are sent
    pub wire_mode: WireMode,
    /// Catalog JSON file to serve from; the built-in catalog when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9999,
            bind_attempts: 60,
            bind_retry_delay_secs: 1,
            wire_mode: WireMode::default(),
            catalog_path: None,
        }
    }
}

impl ServiceConfig {
    /// The address the listener binds
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Delay between bind attempts
    pub fn bind_retry_delay(&self) -> Duration {
        Duration::from_secs(self.bind_retry_delay_secs)
    }
}

/// Configuration for the customer client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerConfig {
    /// Host the pizzeria is expected on
    pub host: String,
    /// Port the pizzeria is expected on
    pub port: u16,
    /// Pause before dialling, in seconds
    pub connect_delay_secs: u64,
    /// Catalog JSON file to resolve pizzas from; the built-in catalog
    /// when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9999,
            connect_delay_secs: 1,
            catalog_path: None,
        }
    }
}

impl CustomerConfig {
    /// The address the customer dials
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pause before dialling
    pub fn connect_delay(&self) -> Duration {
        Duration::from_secs(self.connect_delay_secs)
    }
}
