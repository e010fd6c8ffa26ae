//! Models for GitHub Action manifests (`action.yml`) and their typings
//! (`action-types.yml`).
//!
//! Both are decoded leniently: real-world manifests carry plenty of keys
//! these models don't describe (`runs`, `branding` and so on).

use crate::config::YamlConfiguration;
use crate::Yaml;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An action's `action.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub inputs: IndexMap<String, Input>,
    #[serde(default)]
    pub outputs: IndexMap<String, Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub deprecation_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub description: String,
}

/// An action's `action-types.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Typing {
    #[serde(default)]
    pub inputs: IndexMap<String, ActionType>,
    #[serde(default)]
    pub outputs: IndexMap<String, ActionType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ActionType {
    #[serde(rename = "type")]
    pub kind: ActionTypeEnum,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub named_values: IndexMap<String, i32>,
    #[serde(default)]
    pub separator: String,
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub list_item: Option<Box<ActionType>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTypeEnum {
    String,
    Boolean,
    Integer,
    Float,
    List,
    Enum,
}

impl std::fmt::Display for ActionTypeEnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionTypeEnum::String => "string",
            ActionTypeEnum::Boolean => "boolean",
            ActionTypeEnum::Integer => "integer",
            ActionTypeEnum::Float => "float",
            ActionTypeEnum::List => "list",
            ActionTypeEnum::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// The configuration manifests are decoded with: lenient, otherwise default.
pub fn manifest_configuration() -> YamlConfiguration {
    YamlConfiguration {
        strict_mode: false,
        ..YamlConfiguration::default()
    }
}

/// Decodes `source` leniently, logging and discarding any failure.
///
/// # Example
///
/// ```
/// use yamlshape::manifest::{decode_or_none, Typing};
///
/// let typing: Option<Typing> = decode_or_none("inputs:\n  retries:\n    type: integer\n");
/// assert_eq!(typing.map(|t| t.inputs.len()), Some(1));
///
/// assert!(decode_or_none::<Typing>("inputs: [1, 2]").is_none());
/// ```
pub fn decode_or_none<T: DeserializeOwned>(source: &str) -> Option<T> {
    decode_or_none_with(&Yaml::new(manifest_configuration()), source)
}

/// Like [`decode_or_none`], with a caller-supplied decoder.
pub fn decode_or_none_with<T: DeserializeOwned>(yaml: &Yaml, source: &str) -> Option<T> {
    match yaml.decode_from_str(source) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, "could not decode document");
            None
        }
    }
}
