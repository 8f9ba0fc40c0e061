//! Validator defaults loaded from TOML.
//!
//! ```toml
//! allowed_formats = ["png", "jpeg", "svg"]
//! max_file_size = 52428800
//! enable_security_checks = true
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::format::FormatSet;
use crate::limits::LARGEST_FORMAT_LIMIT;
use crate::validate::ValidateOptions;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Formats accepted when the caller does not pass its own allow-list.
    pub allowed_formats: FormatSet,
    /// Generic size ceiling in bytes.
    pub max_file_size: u64,
    /// SVG script / handler / external-reference blocklist.
    pub enable_security_checks: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allowed_formats: FormatSet::all(),
            max_file_size: LARGEST_FORMAT_LIMIT,
            enable_security_checks: true,
        }
    }
}

impl ValidatorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ValidatorConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject settings that would refuse every upload.
    pub fn check(&self) -> Result<()> {
        if self.allowed_formats.is_empty() {
            return Err(Error::InvalidConfig(
                "allowed_formats must name at least one format".to_string(),
            ));
        }
        if self.max_file_size == 0 {
            return Err(Error::InvalidConfig(
                "max_file_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_options(&self) -> ValidateOptions {
        ValidateOptions {
            allowed_formats: self.allowed_formats.clone(),
            max_size: self.max_file_size,
            target_format: None,
            security_checks: self.enable_security_checks,
        }
    }
}
