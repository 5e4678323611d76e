// =============================================================================
// CONFIGURATION MODULE
// =============================================================================
// Loads configuration from environment variables into a typed struct, so bad
// values fail at startup rather than mid-request.
// =============================================================================

use anyhow::{Context, Result};
use std::env;

const DEFAULT_PORT: &str = "8003";
const DEFAULT_APP_TITLE: &str = "Staff Portal";

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 8003)
    pub port: u16,

    /// Title shown in the layout header (default: "Staff Portal")
    pub app_title: String,
}

impl Config {
    /// Creates a Config by reading environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` when every variable is absent or parses
    /// - `Err` if `PORT` is not a valid port number
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .context("Failed to parse PORT as a number")?,

            app_title: env::var("APP_TITLE").unwrap_or_else(|_| DEFAULT_APP_TITLE.to_string()),
        })
    }
}
