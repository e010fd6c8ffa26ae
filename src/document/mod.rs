//! Parsed YAML documents.
//!
//! [`parser::parse_yaml`] builds a [`node::YamlNode`] tree in which every
//! node knows its own [`YamlPath`](crate::path::YamlPath). The tree is
//! read-only input for the decoder in [`crate::de`].

pub mod node;
pub mod parser;
pub mod scalar;

pub use node::{ScalarStyle, YamlEntry, YamlNode, YamlScalar, YamlValue};
pub use parser::parse_yaml;
