//! Session configuration.
//!
//! ```
//! use horizon_tk_core::SessionConfig;
//!
//! let config = SessionConfig::from_toml_str(r#"
//! image_id_prefix = "icon"
//! trace_scripts = true
//! "#).unwrap();
//! assert_eq!(config.image_id_prefix, "icon");
//! assert_eq!(config.action_id_prefix, "horizon_bind");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{TkError, TkResult};

/// Settings for a binding session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prefix for generated photo image ids.
    pub image_id_prefix: String,
    /// Prefix for generated event action ids.
    pub action_id_prefix: String,
    /// Log every evaluated script at trace level.
    pub trace_scripts: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            image_id_prefix: "horizon_image".to_string(),
            action_id_prefix: "horizon_bind".to_string(),
            trace_scripts: false,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> TkResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| TkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> TkResult<String> {
        toml::to_string(self).map_err(|e| TkError::Config(e.to_string()))
    }

    /// Set the image id prefix.
    pub fn image_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_id_prefix = prefix.into();
        self
    }

    /// Set the action id prefix.
    pub fn action_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.action_id_prefix = prefix.into();
        self
    }

    /// Enable or disable script tracing.
    pub fn trace_scripts(mut self, enabled: bool) -> Self {
        self.trace_scripts = enabled;
        self
    }

    /// Generated ids become interpreter command and image names, so the
    /// prefixes must be non-empty single words.
    pub fn validate(&self) -> TkResult<()> {
        for (name, prefix) in [
            ("image_id_prefix", &self.image_id_prefix),
            ("action_id_prefix", &self.action_id_prefix),
        ] {
            if prefix.is_empty() {
                return Err(TkError::Config(format!("{name} must not be empty")));
            }
            if prefix.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
                return Err(TkError::Config(format!(
                    "{name} must contain only ASCII letters, digits and '_': {prefix:?}"
                )));
            }
        }
        Ok(())
    }
}
