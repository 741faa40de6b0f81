//! Combine configuration and validation.

use std::error::Error;
use std::fmt;

use pointmerge_core::{COMBINED_DATASET_IDS, COMBINED_DATASET_OFFSETS};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CombineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The combined dataset name is empty.
    EmptyName,
    /// A property key is empty.
    EmptyPropertyKey {
        /// Which key: `"ids_property"` or `"offsets_property"`.
        which: &'static str,
    },
    /// Both properties would be written under the same key.
    DuplicatePropertyKey {
        /// The shared key.
        key: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "combined dataset name must not be empty"),
            Self::EmptyPropertyKey { which } => write!(f, "{which} must not be empty"),
            Self::DuplicatePropertyKey { key } => {
                write!(f, "ids and offsets properties share the key '{key}'")
            }
        }
    }
}

impl Error for ConfigError {}

// ── CombineConfig ──────────────────────────────────────────────────

/// Settings for one combine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombineConfig {
    /// Name given to the new dataset. Default: `"Combined data"`.
    pub name: String,
    /// Property key for the ordered source IDs.
    /// Default: [`COMBINED_DATASET_IDS`].
    pub ids_property: String,
    /// Property key for the ordered start offsets.
    /// Default: [`COMBINED_DATASET_OFFSETS`].
    pub offsets_property: String,
}

impl CombineConfig {
    /// Default name of the combined dataset.
    pub const DEFAULT_NAME: &'static str = "Combined data";

    /// Default settings with a custom dataset name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check that the name and both property keys are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.ids_property.is_empty() {
            return Err(ConfigError::EmptyPropertyKey {
                which: "ids_property",
            });
        }
        if self.offsets_property.is_empty() {
            return Err(ConfigError::EmptyPropertyKey {
                which: "offsets_property",
            });
        }
        if self.ids_property == self.offsets_property {
            return Err(ConfigError::DuplicatePropertyKey {
                key: self.ids_property.clone(),
            });
        }
        Ok(())
    }
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            ids_property: COMBINED_DATASET_IDS.to_string(),
            offsets_property: COMBINED_DATASET_OFFSETS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        let config = CombineConfig::default();
        assert_eq!(config.name, "Combined data");
        assert_eq!(config.ids_property, "Combined Dataset IDs");
        assert_eq!(config.offsets_property, "Combined Dataset Offsets");
        config.validate().unwrap();
    }

    #[test]
    fn named_keeps_default_keys() {
        let config = CombineConfig::named("merged");
        assert_eq!(config.name, "merged");
        assert_eq!(config.ids_property, COMBINED_DATASET_IDS);
    }

    #[test]
    fn blank_name_rejected() {
        let config = CombineConfig::named("   ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyName));
    }

    #[test]
    fn empty_key_rejected() {
        let config = CombineConfig {
            offsets_property: String::new(),
            ..CombineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPropertyKey {
                which: "offsets_property"
            })
        );
    }

    #[test]
    fn shared_key_rejected() {
        let config = CombineConfig {
            ids_property: "k".into(),
            offsets_property: "k".into(),
            ..CombineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePropertyKey { key: "k".into() })
        );
    }
}
