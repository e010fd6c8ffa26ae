//! yamlshape decodes YAML documents into strongly typed Rust values.
//!
//! Documents are parsed into a node tree in which every node remembers the
//! path it was reached by, including hops through aliases and merge keys.
//! Decoding then matches map keys against the fields a type declares, so
//! a failure reports both what went wrong and exactly where:
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server: Server = yamlshape::from_str("host: localhost\nport: 8080\n").unwrap();
//! assert_eq!(server.port, 8080);
//!
//! let err = yamlshape::from_str::<Server>("host: localhost\nport: 8080\ncolour: red\n").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unknown property 'colour'. Known properties are: host, port (at colour, line 3, column 1)"
//! );
//! ```

pub mod config;
pub mod de;
pub mod document;
pub mod error;
pub mod file;
pub mod manifest;
pub mod path;

pub use config::{AnchorsAndAliases, NamingStrategy, YamlConfiguration};
pub use document::YamlNode;
pub use error::{Result, YamlError, YamlErrorKind};
pub use path::{Location, YamlPath};

use serde::de::{Deserialize, DeserializeOwned};

/// A configured YAML decoder.
#[derive(Debug, Clone, Default)]
pub struct Yaml {
    configuration: YamlConfiguration,
}

impl Yaml {
    pub fn new(configuration: YamlConfiguration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &YamlConfiguration {
        &self.configuration
    }

    /// Parses `source` into a node tree without decoding it.
    pub fn parse_to_node(&self, source: &str) -> Result<YamlNode> {
        document::parse_yaml(source, &self.configuration)
    }

    /// Parses and decodes `source` into a `T`.
    pub fn decode_from_str<T: DeserializeOwned>(&self, source: &str) -> Result<T> {
        let node = self.parse_to_node(source)?;
        self.decode_from_node(&node)
    }

    /// Decodes an already parsed node into a `T`.
    pub fn decode_from_node<'a, T: Deserialize<'a>>(&'a self, node: &'a YamlNode) -> Result<T> {
        de::from_node(node, &self.configuration).inspect_err(|err| {
            tracing::debug!(%err, "failed to decode document");
        })
    }
}

/// Decodes `source` with the default configuration.
pub fn from_str<T: DeserializeOwned>(source: &str) -> Result<T> {
    Yaml::default().decode_from_str(source)
}

/// Decodes `source` with `configuration`.
pub fn from_str_with_config<T: DeserializeOwned>(
    source: &str,
    configuration: &YamlConfiguration,
) -> Result<T> {
    Yaml::new(configuration.clone()).decode_from_str(source)
}

/// Decodes a parsed node with `configuration`.
pub fn from_node<'a, T: Deserialize<'a>>(
    node: &'a YamlNode,
    configuration: &'a YamlConfiguration,
) -> Result<T> {
    de::from_node(node, configuration)
}
