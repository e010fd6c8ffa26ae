//! Decoding maps into map types.

use super::object::wrap_value_failure;
use super::Deserializer;
use crate::config::YamlConfiguration;
use crate::document::YamlEntry;
use crate::error::{Result, YamlError};
use serde::de::{self, DeserializeSeed};

/// Map access over every entry, for `HashMap`, `IndexMap` and friends.
///
/// Keys are decoded from their own nodes, so `HashMap<u32, _>` works when
/// the keys are plain integers.
pub struct MapInput<'a> {
    entries: indexmap::map::Values<'a, String, YamlEntry>,
    config: &'a YamlConfiguration,
    pending: Option<&'a YamlEntry>,
}

impl<'a> MapInput<'a> {
    pub fn new(
        entries: &'a indexmap::IndexMap<String, YamlEntry>,
        config: &'a YamlConfiguration,
    ) -> Self {
        Self {
            entries: entries.values(),
            config,
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapInput<'de> {
    type Error = YamlError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some(entry) => {
                self.pending = Some(entry);
                seed.deserialize(Deserializer::new(&entry.key, self.config))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let entry = self.pending.take().ok_or_else(|| {
            <YamlError as de::Error>::custom("value requested before its key")
        })?;

        seed.deserialize(Deserializer::new(&entry.value, self.config))
            .map_err(|err| wrap_value_failure(entry.key_content(), err, &entry.value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}
