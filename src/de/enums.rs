//! Decoding enums.
//!
//! Unit variants are written as a scalar (`shape: circle`). Every other
//! variant is a map with a single entry whose key names the variant
//! (`shape: {square: 4}`).

use super::Deserializer;
use crate::config::YamlConfiguration;
use crate::document::{YamlNode, YamlValue};
use crate::error::{Result, YamlError, YamlErrorKind};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, Visitor};

pub struct EnumInput<'a> {
    variant: &'a str,
    /// The node naming the variant, used for errors about the variant itself.
    name_node: &'a YamlNode,
    value: Option<&'a YamlNode>,
    config: &'a YamlConfiguration,
}

impl<'a> EnumInput<'a> {
    pub fn new(
        variant: &'a str,
        name_node: &'a YamlNode,
        value: Option<&'a YamlNode>,
        config: &'a YamlConfiguration,
    ) -> Self {
        Self {
            variant,
            name_node,
            value,
            config,
        }
    }

    fn value_or_err(&self, expected: &'static str) -> Result<&'a YamlNode> {
        self.value.ok_or_else(|| {
            YamlError::incorrect_type(expected, "a scalar value", self.name_node.path().clone())
        })
    }
}

/// Picks the declared variant that `name` refers to.
///
/// Exact matches win. With `case_insensitive`, a variant differing only in
/// ASCII case is accepted next.
pub(super) fn resolve_variant<'a>(
    name: &'a str,
    variants: &'static [&'static str],
    case_insensitive: bool,
    node: &YamlNode,
) -> Result<&'a str> {
    if variants.is_empty() || variants.contains(&name) {
        return Ok(name);
    }

    if case_insensitive {
        if let Some(variant) = variants.iter().copied().find(|v| v.eq_ignore_ascii_case(name)) {
            return Ok(variant);
        }
    }

    let mut choices: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
    choices.sort();

    Err(YamlError::new(
        YamlErrorKind::InvalidEnumValue {
            value: name.to_string(),
            choices,
        },
        node.path().clone(),
    ))
}

impl<'de> de::EnumAccess<'de> for EnumInput<'de> {
    type Error = YamlError;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed
            .deserialize(BorrowedStrDeserializer::<YamlError>::new(self.variant))
            .map_err(|err| err.or_path(self.name_node.path()))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for EnumInput<'de> {
    type Error = YamlError;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(node) if node.value().is_null() => Ok(()),
            Some(node) => Err(YamlError::incorrect_type(
                "a null value",
                node.type_name(),
                node.path().clone(),
            )),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let value = self.value_or_err("a single-key map")?;
        seed.deserialize(Deserializer::new(value, self.config))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.value_or_err("a single-key map")?;
        de::Deserializer::deserialize_seq(Deserializer::new(value, self.config), visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.value_or_err("a single-key map")?;
        de::Deserializer::deserialize_struct(
            Deserializer::new(value, self.config),
            "",
            fields,
            visitor,
        )
    }
}

/// Splits an enum node into the variant name, the node naming it and the
/// variant's value.
pub(super) fn split_enum_node(node: &YamlNode) -> Result<(&str, &YamlNode, Option<&YamlNode>)> {
    match node.value() {
        YamlValue::Scalar(scalar) => Ok((&scalar.content, node, None)),
        YamlValue::Map(entries) if entries.len() == 1 => match entries.values().next() {
            Some(entry) => Ok((entry.key_content(), &entry.key, Some(&entry.value))),
            None => Err(YamlError::incorrect_type(
                "a scalar value or a single-key map",
                node.type_name(),
                node.path().clone(),
            )),
        },
        YamlValue::Null => Err(YamlError::new(
            YamlErrorKind::UnexpectedNull,
            node.path().clone(),
        )),
        _ => Err(YamlError::incorrect_type(
            "a scalar value or a single-key map",
            node.type_name(),
            node.path().clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_yaml;
    use serde::de::EnumAccess;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Shape {
        Circle,
        Square,
    }

    #[test]
    fn test_variant_seed_names_the_variant() {
        let config = YamlConfiguration::default();
        let node = parse_yaml("square\n", &config).unwrap();

        let input = EnumInput::new("square", &node, None, &config);
        let (shape, _) = input.variant::<Shape>().unwrap();
        assert_eq!(shape, Shape::Square);

        let input = EnumInput::new("circle", &node, None, &config);
        assert_eq!(input.variant::<Shape>().unwrap().0, Shape::Circle);
    }

    #[test]
    fn test_unknown_variant_lists_sorted_choices() {
        let config = YamlConfiguration::default();
        let node = parse_yaml("triangle\n", &config).unwrap();

        let err = resolve_variant("triangle", &["square", "circle"], false, &node).unwrap_err();
        assert_eq!(
            err.message(),
            "Value 'triangle' is not a valid option, permitted choices are: circle, square"
        );
        assert_eq!(resolve_variant("CIRCLE", &["circle"], true, &node).unwrap(), "circle");
    }
}
