//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{batch::DEFAULT_EXTENSIONS, index::DEFAULT_HEADING};
use crate::error::{Error, Result};
use crate::songbook::Options;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// LaTeX template the fragment is substituted into
    pub template_path: Option<PathBuf>,
    /// Heading of the topical index section
    pub index_heading: String,
    /// Source file extensions picked up in batch mode
    pub extensions: Vec<String>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            template_path: None,
            index_heading: DEFAULT_HEADING.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("SONGPRESS_TEMPLATE") {
            let path = PathBuf::from(shellexpand::tilde(&path).to_string());
            if !path.is_file() {
                return Err(Error::config(
                    format!("Template not found: {}", path.display()),
                    "Check the SONGPRESS_TEMPLATE environment variable",
                ));
            }
            config.template_path = Some(path);
        }

        if let Ok(heading) = env::var("SONGPRESS_INDEX_HEADING") {
            if !heading.trim().is_empty() {
                config.index_heading = heading.trim().to_string();
            }
        }

        if let Ok(list) = env::var("SONGPRESS_EXTENSIONS") {
            let extensions = parse_extensions(&list);
            if !extensions.is_empty() {
                config.extensions = extensions;
            }
        }

        Ok(config)
    }

    /// Rendering options derived from this configuration.
    pub fn options(&self) -> Options {
        Options {
            index_heading: self.index_heading.clone(),
        }
    }
}

/// Parse a comma-separated extension list, tolerating leading dots and blanks.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
