//! Decoding lists into sequences and tuples.

use super::Deserializer;
use crate::config::YamlConfiguration;
use crate::document::YamlNode;
use crate::error::{Result, YamlError};
use serde::de::{self, DeserializeSeed};

/// Sequence access over the items of a list.
pub struct ListInput<'a> {
    items: std::slice::Iter<'a, YamlNode>,
    config: &'a YamlConfiguration,
    consumed: usize,
}

impl<'a> ListInput<'a> {
    pub fn new(items: &'a [YamlNode], config: &'a YamlConfiguration) -> Self {
        Self {
            items: items.iter(),
            config,
            consumed: 0,
        }
    }

    /// Fails if the visitor stopped before the end of the list, which happens
    /// for tuples shorter than the document's list.
    pub(super) fn end(self) -> Result<()> {
        let remaining = self.items.len();
        if remaining == 0 {
            Ok(())
        } else {
            Err(de::Error::invalid_length(
                self.consumed + remaining,
                &"fewer elements in list",
            ))
        }
    }
}

impl<'de> de::SeqAccess<'de> for ListInput<'de> {
    type Error = YamlError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => {
                self.consumed += 1;
                seed.deserialize(Deserializer::new(item, self.config))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}
