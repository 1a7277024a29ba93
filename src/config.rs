//! Declarative configuration.
//!
//! [`Options`] carries a function value and cannot be deserialized, so the
//! configuration file names one of the stock header strategies instead:
//!
//! ```json
//! { "attribute_name": "data-label", "skip_empty_headers": true, "header_style": "slug" }
//! ```
//!
//! Every field is optional and defaults to the [`Options`] default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::is_valid_attribute_name;
use crate::text;
use crate::transform::{DEFAULT_ATTRIBUTE_NAME, Options};

/// Stock header-text derivations selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Plain text of the header cell.
    #[default]
    Text,
    /// GitHub-style slug of the plain text (`"Unit Price"` → `"unit-price"`).
    Slug,
}

/// Serializable form of [`Options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub attribute_name: String,
    pub skip_empty_headers: bool,
    pub header_style: HeaderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            skip_empty_headers: false,
            header_style: HeaderStyle::Text,
        }
    }
}

impl Config {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Convert into transform options, validating the attribute name.
    pub fn into_options(self) -> Result<Options> {
        validate_attribute_name(&self.attribute_name)?;
        let options = Options::new()
            .with_attribute_name(self.attribute_name)
            .with_skip_empty_headers(self.skip_empty_headers);
        Ok(match self.header_style {
            HeaderStyle::Text => options,
            HeaderStyle::Slug => options.with_header_transform(text::slug),
        })
    }
}

/// Reject names that cannot be emitted as an HTML attribute.
pub fn validate_attribute_name(name: &str) -> Result<()> {
    if !is_valid_attribute_name(name) {
        return Err(Error::InvalidAttributeName(name.to_string()));
    }
    Ok(())
}
