//! Decoding maps into structs.
//!
//! [`ObjectDecoder`] walks the entries of one map and pairs each with a
//! declared field. Its state is explicit: the entries and a cursor into
//! them, a [`FieldMatcher`] built on first use, and the value of the entry
//! most recently matched. Keeping that last piece separate is what lets the
//! caller ask for "the value of the field you just told me about" without
//! confusing it with the object itself.

use super::fields::FieldMatcher;
use super::Deserializer;
use crate::config::YamlConfiguration;
use crate::document::{YamlEntry, YamlNode};
use crate::error::{Result, YamlError};
use indexmap::IndexMap;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed};

/// What the next call to [`ObjectDecoder::decode_element_index`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementIndex {
    /// The next entry fills the declared field at this index.
    Field(usize),
    /// Every entry has been consumed.
    Done,
}

/// The entry whose value is waiting to be decoded.
#[derive(Debug, Clone, Copy)]
struct PendingValue<'a> {
    /// The key as written in the document.
    property: &'a str,
    value: &'a YamlNode,
}

/// Decodes one YAML map into a struct with a fixed set of fields.
///
/// # Example
///
/// ```
/// use yamlshape::config::YamlConfiguration;
/// use yamlshape::de::{ElementIndex, ObjectDecoder};
/// use yamlshape::document::{parse_yaml, YamlValue};
///
/// let config = YamlConfiguration::default();
/// let node = parse_yaml("b: 1\na: 2\n", &config).unwrap();
/// let YamlValue::Map(entries) = node.value() else { unreachable!() };
///
/// let mut decoder = ObjectDecoder::new(entries, &["a", "b"], &config);
/// assert_eq!(decoder.decode_element_index().unwrap(), ElementIndex::Field(1));
/// assert_eq!(decoder.decode_element_index().unwrap(), ElementIndex::Field(0));
/// assert_eq!(decoder.decode_element_index().unwrap(), ElementIndex::Done);
/// ```
pub struct ObjectDecoder<'a> {
    entries: Vec<&'a YamlEntry>,
    fields: &'static [&'static str],
    config: &'a YamlConfiguration,
    next_index: usize,
    matcher: Option<FieldMatcher>,
    pending: Option<PendingValue<'a>>,
}

impl<'a> ObjectDecoder<'a> {
    pub fn new(
        entries: &'a IndexMap<String, YamlEntry>,
        fields: &'static [&'static str],
        config: &'a YamlConfiguration,
    ) -> Self {
        Self {
            entries: entries.values().collect(),
            fields,
            config,
            next_index: 0,
            matcher: None,
            pending: None,
        }
    }

    /// Advances to the next entry that matches a declared field.
    ///
    /// Unmatched keys are an error in strict mode and skipped otherwise.
    pub fn decode_element_index(&mut self) -> Result<ElementIndex> {
        self.pending = None;

        let fields = self.fields;
        let naming_strategy = self.config.naming_strategy.as_ref();
        let matcher = self
            .matcher
            .get_or_insert_with(|| FieldMatcher::new(fields, naming_strategy));

        while let Some(&entry) = self.entries.get(self.next_index) {
            self.next_index += 1;
            let key = entry.key_content();

            match matcher.lookup(key) {
                Some(index) => {
                    tracing::trace!(key, field = fields[index], "matched property");
                    self.pending = Some(PendingValue {
                        property: key,
                        value: &entry.value,
                    });
                    return Ok(ElementIndex::Field(index));
                }
                None if self.config.strict_mode => {
                    return Err(YamlError::unknown_property(
                        key,
                        matcher.known_keys().map(str::to_string),
                        entry.key.path().clone(),
                    ));
                }
                None => {
                    tracing::debug!(key, path = %entry.key.path(), "skipping unknown property");
                }
            }
        }

        Ok(ElementIndex::Done)
    }

    /// True once at least one entry has been looked at.
    pub fn has_started_reading_entries(&self) -> bool {
        self.next_index > 0
    }

    /// The value of the entry returned by the last call to
    /// [`decode_element_index`](Self::decode_element_index), if it has not
    /// been decoded yet.
    pub fn current_value(&self) -> Option<&'a YamlNode> {
        self.pending.map(|pending| pending.value)
    }

    /// The number of entries not yet looked at.
    fn remaining(&self) -> usize {
        self.entries.len() - self.next_index
    }
}

impl<'de> de::MapAccess<'de> for ObjectDecoder<'de> {
    type Error = YamlError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.decode_element_index()? {
            ElementIndex::Field(index) => seed
                .deserialize(BorrowedStrDeserializer::<YamlError>::new(self.fields[index]))
                .map(Some),
            ElementIndex::Done => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let pending = self.pending.take().ok_or_else(|| {
            <YamlError as de::Error>::custom("value requested before its key")
        })?;

        seed.deserialize(Deserializer::new(pending.value, self.config))
            .map_err(|err| wrap_value_failure(pending.property, err, pending.value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining())
    }
}

/// Reports a bad value as a bad value for `property`, keeping the position
/// of the innermost failure.
pub(super) fn wrap_value_failure(property: &str, err: YamlError, value: &YamlNode) -> YamlError {
    let err = err.or_path(value.path());
    if err.is_value_failure() {
        YamlError::invalid_property_value(property, err)
    } else {
        err
    }
}
