//! Serde decoding of parsed YAML trees.
//!
//! [`Deserializer`] reads a [`YamlNode`] into any `serde::Deserialize` type.
//! The shape a type asks for decides how a node is read:
//!
//! * structs read maps through an [`ObjectDecoder`], matching keys against
//!   the declared fields
//! * maps read maps through a [`MapInput`]
//! * sequences and tuples read lists through a [`ListInput`]
//! * enums read scalars (unit variants) or single-entry maps
//! * everything else reads scalars
//!
//! Every failure carries the path of the node it happened at. Failures
//! inside a field's value are reported as
//! [`InvalidPropertyValue`](crate::error::YamlErrorKind::InvalidPropertyValue)
//! naming the field, still pointing at the innermost node.
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use yamlshape::config::YamlConfiguration;
//! use yamlshape::de::Deserializer;
//! use yamlshape::document::parse_yaml;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let config = YamlConfiguration::default();
//! let node = parse_yaml("y: 2\nx: 1\n", &config).unwrap();
//! let point = Point::deserialize(Deserializer::new(&node, &config)).unwrap();
//!
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

pub mod enums;
pub mod fields;
pub mod list;
pub mod map;
pub mod object;

pub use enums::EnumInput;
pub use fields::FieldMatcher;
pub use list::ListInput;
pub use map::MapInput;
pub use object::{ElementIndex, ObjectDecoder};

use crate::config::YamlConfiguration;
use crate::document::scalar;
use crate::document::{YamlNode, YamlScalar, YamlValue};
use crate::error::{Result, YamlError, YamlErrorKind};
use serde::de::{self, Visitor};

/// Deserializes one node, and through it the subtree below it.
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<'a> {
    node: &'a YamlNode,
    config: &'a YamlConfiguration,
}

impl<'a> Deserializer<'a> {
    pub fn new(node: &'a YamlNode, config: &'a YamlConfiguration) -> Self {
        Self { node, config }
    }

    pub fn node(&self) -> &'a YamlNode {
        self.node
    }

    /// Gives an unplaced error this node's path.
    fn place<T>(&self, result: Result<T>) -> Result<T> {
        result.map_err(|err| err.or_path(self.node.path()))
    }

    fn null_error(&self) -> YamlError {
        YamlError::new(YamlErrorKind::UnexpectedNull, self.node.path().clone())
    }

    fn type_error(&self, expected: &'static str) -> YamlError {
        YamlError::incorrect_type(expected, self.node.type_name(), self.node.path().clone())
    }

    /// Returns the node as a scalar, for a value described as `expected`.
    fn scalar(&self, expected: &'static str) -> Result<&'a YamlScalar> {
        match self.node.value() {
            YamlValue::Scalar(scalar) => Ok(scalar),
            YamlValue::Null => Err(self.null_error()),
            _ => Err(self.type_error(expected)),
        }
    }

    /// Reads a scalar with `parse`, reporting `name` if the text doesn't fit.
    fn parse_scalar<T>(
        &self,
        expected: &'static str,
        name: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T> {
        let scalar = self.scalar(expected)?;
        parse(&scalar.content).ok_or_else(|| {
            YamlError::scalar_format(scalar.content.as_str(), name, self.node.path().clone())
        })
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = YamlError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let result = match self.node.value() {
            YamlValue::Null => visitor.visit_unit(),
            YamlValue::Scalar(scalar) if scalar.is_plain() => {
                let content = scalar.content.as_str();
                if let Some(value) = scalar::parse_bool(content) {
                    visitor.visit_bool(value)
                } else if let Some(value) = scalar::parse_i64(content) {
                    visitor.visit_i64(value)
                } else if let Some(value) = scalar::parse_u64(content) {
                    visitor.visit_u64(value)
                } else if let Some(value) = scalar::parse_f64(content) {
                    visitor.visit_f64(value)
                } else {
                    visitor.visit_borrowed_str(content)
                }
            }
            YamlValue::Scalar(scalar) => visitor.visit_borrowed_str(&scalar.content),
            YamlValue::List(items) => {
                let mut input = ListInput::new(items, self.config);
                visitor
                    .visit_seq(&mut input)
                    .and_then(|value| input.end().map(|()| value))
            }
            YamlValue::Map(entries) => visitor.visit_map(MapInput::new(entries, self.config)),
        };
        self.place(result)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.parse_scalar("a boolean", "boolean", scalar::parse_bool)?;
        self.place(visitor.visit_bool(value))
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.parse_scalar("an integer", "integer", scalar::parse_i64)?;
        self.place(visitor.visit_i64(value))
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.parse_scalar("an integer", "unsigned integer", scalar::parse_u64)?;
        self.place(visitor.visit_u64(value))
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.parse_scalar("a number", "floating point", scalar::parse_f64)?;
        self.place(visitor.visit_f64(value))
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = self.parse_scalar("a character", "character", scalar::parse_char)?;
        self.place(visitor.visit_char(value))
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let scalar = self.scalar("a string")?;
        self.place(visitor.visit_borrowed_str(&scalar.content))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::List(_) => self.deserialize_seq(visitor),
            _ => {
                let scalar = self.scalar("a string or a list")?;
                self.place(visitor.visit_borrowed_bytes(scalar.content.as_bytes()))
            }
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::Null => self.place(visitor.visit_none()),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::Null => self.place(visitor.visit_unit()),
            _ => Err(self.type_error("a null value")),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.place(visitor.visit_newtype_struct(self))
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::List(items) => {
                let mut input = ListInput::new(items, self.config);
                let value = self.place(visitor.visit_seq(&mut input))?;
                self.place(input.end())?;
                Ok(value)
            }
            YamlValue::Null => Err(self.null_error()),
            _ => Err(self.type_error("a list")),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::Map(entries) => {
                self.place(visitor.visit_map(MapInput::new(entries, self.config)))
            }
            YamlValue::Null => Err(self.null_error()),
            _ => Err(self.type_error("a map")),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.node.value() {
            YamlValue::Map(entries) => {
                let decoder = ObjectDecoder::new(entries, fields, self.config);
                self.place(visitor.visit_map(decoder))
            }
            YamlValue::Null => Err(self.null_error()),
            _ => Err(self.type_error("a map")),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let (name, name_node, value) = enums::split_enum_node(self.node)?;
        let variant = enums::resolve_variant(
            name,
            variants,
            self.config.decode_enum_case_insensitive,
            name_node,
        )?;
        self.place(visitor.visit_enum(EnumInput::new(variant, name_node, value, self.config)))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.place(visitor.visit_unit())
    }
}

/// Deserializes `T` from a parsed node.
pub fn from_node<'a, T>(node: &'a YamlNode, config: &'a YamlConfiguration) -> Result<T>
where
    T: de::Deserialize<'a>,
{
    T::deserialize(Deserializer::new(node, config))
}
