//! Storefront configuration.

use std::path::Path;

use kiosk_commerce::{cart::PricingMode, search::FilterMode};
use kiosk_media::{ImageType, UploadPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the file.
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// Failed to serialize the config.
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Page sizes per viewport tier.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Cart behaviour.
    #[serde(default)]
    pub cart: CartConfig,

    /// How category filters and search combine.
    #[serde(default)]
    pub filters: FilterConfig,

    /// Image upload limits.
    #[serde(default)]
    pub media: MediaConfig,

    /// Inline editing.
    #[serde(default)]
    pub editing: EditingConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file, in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.render(is_json(path))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Serialize as pretty JSON or TOML.
    pub fn render(&self, json: bool) -> Result<String, ConfigError> {
        if json {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
        } else {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
        }
    }

    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.narrow_page_size == 0 || self.pagination.wide_page_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be at least 1".into()));
        }
        if self.media.max_bytes == 0 {
            return Err(ConfigError::Invalid("media.max_bytes cannot be 0".into()));
        }
        if self.media.allowed_types.is_empty() {
            return Err(ConfigError::Invalid("media.allowed_types cannot be empty".into()));
        }
        if self.media.public_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("media.public_dir cannot be empty".into()));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Pagination configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Widths up to and including this value use the narrow tier.
    pub narrow_breakpoint: u32,
    /// Items per page on narrow viewports.
    pub narrow_page_size: usize,
    /// Items per page otherwise.
    pub wide_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: 768,
            narrow_page_size: 10,
            wide_page_size: 24,
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// How repeated adds are priced.
    pub pricing: PricingMode,
}

/// Filter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Search/category composition.
    pub mode: FilterMode,
}

/// Media configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Maximum image size in bytes.
    pub max_bytes: u64,
    /// Accepted image formats.
    pub allowed_types: Vec<ImageType>,
    /// Public path images are served from.
    pub public_dir: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        let policy = UploadPolicy::default();
        Self {
            max_bytes: policy.max_bytes,
            allowed_types: policy.allowed_types,
            public_dir: "/images/products".to_string(),
        }
    }
}

impl MediaConfig {
    /// The upload policy these settings describe.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new()
            .with_max_bytes(self.max_bytes)
            .with_allowed_types(self.allowed_types.iter().copied())
    }
}

/// Inline editing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    /// Whether opening the price editor needs a signed-in user. Cost edits
    /// always do.
    pub price_edit_requires_auth: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}
