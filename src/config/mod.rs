//! Decoding options for yamlshape.
//!
//! [`YamlConfiguration`] controls how documents are parsed and decoded. It can
//! be built in code or loaded from a TOML file; every field has a default so
//! a partial file is fine.
//!
//! # Example
//!
//! ```
//! use yamlshape::config::{NamingStrategy, YamlConfiguration};
//!
//! // Use default configuration
//! let config = YamlConfiguration::default();
//! assert!(config.strict_mode);
//!
//! // Skip unknown keys and expect kebab-case keys in documents
//! let lenient = YamlConfiguration {
//!     strict_mode: false,
//!     naming_strategy: Some(NamingStrategy::KebabCase),
//!     ..YamlConfiguration::default()
//! };
//! assert!(!lenient.strict_mode);
//! ```

pub mod naming;

pub use naming::NamingStrategy;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether documents may use anchors (`&name`) and aliases (`*name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorsAndAliases {
    /// Any anchor or alias is an error.
    Forbidden,
    /// Aliases are resolved, up to `max_alias_count` expansions per document.
    /// Copying an anchor that itself contains aliases counts each of those too.
    Permitted { max_alias_count: Option<usize> },
}

impl Default for AnchorsAndAliases {
    fn default() -> Self {
        AnchorsAndAliases::Permitted {
            max_alias_count: Some(default_max_alias_count()),
        }
    }
}

/// Returns the default limit on alias uses in one document.
fn default_max_alias_count() -> usize {
    100
}

/// Configuration for parsing and decoding.
///
/// # Fields
///
/// * `strict_mode` - Reject document keys that match no field (default: true)
/// * `naming_strategy` - Spelling of field names in documents (default: as declared)
/// * `anchors_and_aliases` - Alias policy (default: permitted, at most 100 uses)
/// * `decode_enum_case_insensitive` - Match enum variants ignoring case (default: false)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlConfiguration {
    /// Reject document keys that match no field
    pub strict_mode: bool,

    /// Spelling of declared field names in documents
    pub naming_strategy: Option<NamingStrategy>,

    /// Whether anchors and aliases may be used, and how often
    pub anchors_and_aliases: AnchorsAndAliases,

    /// Match enum variant names ignoring case
    pub decode_enum_case_insensitive: bool,
}

impl Default for YamlConfiguration {
    fn default() -> Self {
        Self {
            strict_mode: true,
            naming_strategy: None,
            anchors_and_aliases: AnchorsAndAliases::default(),
            decode_enum_case_insensitive: false,
        }
    }
}

impl YamlConfiguration {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlshape/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlshape");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// The alias limit in effect, if aliases are permitted at all.
    pub(crate) fn alias_limit(&self) -> Option<Option<usize>> {
        match self.anchors_and_aliases {
            AnchorsAndAliases::Forbidden => None,
            AnchorsAndAliases::Permitted { max_alias_count } => Some(max_alias_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_mode_default() {
        let config = YamlConfiguration::default();
        assert!(config.strict_mode);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: YamlConfiguration = toml::from_str("strict_mode = false").unwrap();
        assert!(!config.strict_mode);
        assert!(config.naming_strategy.is_none());
        assert_eq!(config.anchors_and_aliases, AnchorsAndAliases::default());
    }

    #[test]
    fn test_alias_limit() {
        let forbidden = YamlConfiguration {
            anchors_and_aliases: AnchorsAndAliases::Forbidden,
            ..Default::default()
        };
        assert_eq!(forbidden.alias_limit(), None);
        assert_eq!(YamlConfiguration::default().alias_limit(), Some(Some(100)));
    }
}
