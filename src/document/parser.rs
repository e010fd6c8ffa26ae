//! YAML parsing with provenance tracking.
//!
//! This module turns YAML text into a [`YamlNode`] tree using `yaml-rust2`'s
//! event parser. While building the tree it:
//!
//! * gives every node the path it was reached by, with source locations;
//! * replaces each alias with a copy of the anchored subtree whose paths are
//!   re-rooted at the alias (`->&name`);
//! * folds merge keys (`<<`) into their maps, marking merged entries with a
//!   `>>(merged ...)` step;
//! * rejects duplicate keys and non-scalar keys.
//!
//! # Example
//!
//! ```
//! use yamlshape::config::YamlConfiguration;
//! use yamlshape::document::parser::parse_yaml;
//!
//! let yaml = "base: &base\n  port: 8080\ndev:\n  <<: *base\n  host: localhost\n";
//! let root = parse_yaml(yaml, &YamlConfiguration::default()).unwrap();
//!
//! let port = root.get("dev").and_then(|dev| dev.get("port")).unwrap();
//! assert_eq!(port.path().to_human_readable_string(), "dev>>(merged &base).port");
//! ```

use super::node::{ScalarStyle, YamlEntry, YamlNode, YamlScalar, YamlValue};
use super::scalar::is_null_literal;
use crate::config::YamlConfiguration;
use crate::error::{Result, YamlError, YamlErrorKind};
use crate::path::{Location, YamlPath};
use indexmap::IndexMap;
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, Scanner, TScalarStyle, Token, TokenType};

const MERGE_KEY: &str = "<<";

const INVALID_KEY_MESSAGE: &str = "Property name must not be a list, map or null value. \
     (To use 'null' as a property name, enclose it in quotes.)";

/// Parses the first document in `source` into a node tree.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not well-formed YAML (`MalformedYaml`)
/// - There is no document at all (`EmptyDocument`)
/// - A map repeats a key (`DuplicateKey`)
/// - Anchors are forbidden by `config`, or aliases exceed its limit
///
/// # Example
///
/// ```
/// use yamlshape::config::YamlConfiguration;
/// use yamlshape::document::parser::parse_yaml;
///
/// let err = parse_yaml("a: 1\na: 2\n", &YamlConfiguration::default()).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Duplicate key 'a'. It was previously given at line 1, column 1. (at a, line 2, column 1)"
/// );
/// ```
pub fn parse_yaml(source: &str, config: &YamlConfiguration) -> Result<YamlNode> {
    tracing::debug!(length = source.len(), "parsing YAML document");

    let mut builder = TreeBuilder::new(anchor_tokens(source), config);
    let mut parser = Parser::new_from_str(source);
    let loaded = parser.load(&mut builder, false);

    if let Some(err) = builder.error.take() {
        return Err(err);
    }

    if let Err(err) = loaded {
        let location = location_of(err.marker());
        return Err(YamlError::malformed(
            err.info().to_string(),
            YamlPath::root().with_error(location),
        ));
    }

    builder
        .root
        .ok_or_else(|| YamlError::new(YamlErrorKind::EmptyDocument, YamlPath::root()))
}

/// The name and position of every `&name` token, in source order.
///
/// The parser numbers anchors from 1 in the order their tokens appear, so
/// anchor id `n` is entry `n - 1`. Scanning stops at the first scan error,
/// which the parser reports itself.
fn anchor_tokens(source: &str) -> Vec<AnchorToken> {
    Scanner::new(source.chars())
        .filter_map(|Token(mark, token)| match token {
            TokenType::Anchor(name) => Some(AnchorToken {
                name,
                location: location_of(&mark),
            }),
            _ => None,
        })
        .collect()
}

/// `yaml-rust2` lines are 1-based and columns 0-based.
fn location_of(marker: &Marker) -> Location {
    Location::new(marker.line(), marker.col() + 1)
}

fn scalar_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        TScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}

fn is_merge_key(key: &YamlNode) -> bool {
    matches!(key.value(), YamlValue::Scalar(scalar) if scalar.is_plain() && scalar.content == MERGE_KEY)
}

/// A container whose end event has not been seen yet.
struct Frame {
    path: YamlPath,
    anchor_id: usize,
    /// Alias expansions made so far inside this container.
    expansions: usize,
    kind: FrameKind,
}

enum FrameKind {
    Map {
        entries: IndexMap<String, YamlEntry>,
        merges: Vec<YamlNode>,
        pending_key: Option<YamlNode>,
    },
    List {
        items: Vec<YamlNode>,
    },
}

struct AnchorToken {
    name: String,
    location: Location,
}

/// An anchored node and the alias expansions it contains.
struct Anchor {
    node: YamlNode,
    /// Copying this node repeats every expansion inside it.
    expansions: usize,
}

struct TreeBuilder<'a> {
    anchor_tokens: Vec<AnchorToken>,
    config: &'a YamlConfiguration,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Anchor>,
    alias_count: usize,
    root: Option<YamlNode>,
    error: Option<YamlError>,
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.handle(ev, location_of(&mark)) {
            self.error = Some(err);
        }
    }
}

impl<'a> TreeBuilder<'a> {
    fn new(anchor_tokens: Vec<AnchorToken>, config: &'a YamlConfiguration) -> Self {
        Self {
            anchor_tokens,
            config,
            stack: Vec::new(),
            anchors: HashMap::new(),
            alias_count: 0,
            root: None,
            error: None,
        }
    }

    fn handle(&mut self, ev: Event, location: Location) -> Result<()> {
        match ev {
            Event::Scalar(content, style, anchor_id, ..) => {
                self.scalar(content.to_string(), scalar_style(style), anchor_id, location)
            }
            Event::Alias(anchor_id) => self.alias(anchor_id, location),
            Event::MappingStart(anchor_id, ..) => self.start(
                anchor_id,
                location,
                FrameKind::Map {
                    entries: IndexMap::new(),
                    merges: Vec::new(),
                    pending_key: None,
                },
            ),
            Event::SequenceStart(anchor_id, ..) => {
                self.start(anchor_id, location, FrameKind::List { items: Vec::new() })
            }
            Event::MappingEnd | Event::SequenceEnd => self.end(),
            _ => Ok(()),
        }
    }

    /// The path of the map awaiting a key, if the next node is a key.
    fn key_slot(&self) -> Option<YamlPath> {
        match self.stack.last() {
            Some(Frame {
                kind: FrameKind::Map {
                    pending_key: None, ..
                },
                path,
                ..
            }) => Some(path.clone()),
            _ => None,
        }
    }

    /// The path the next node gets when it is not a key.
    fn value_path(&self, location: Location) -> YamlPath {
        match self.stack.last() {
            None => YamlPath::root(),
            Some(frame) => match &frame.kind {
                FrameKind::List { items } => frame.path.with_list_entry(items.len(), location),
                FrameKind::Map {
                    pending_key: Some(key),
                    ..
                } if is_merge_key(key) => frame.path.with_merge(key.location()),
                FrameKind::Map {
                    pending_key: Some(key),
                    ..
                } => key.path().with_map_element_value(location),
                FrameKind::Map {
                    pending_key: None, ..
                } => frame.path.with_error(location),
            },
        }
    }

    fn scalar(
        &mut self,
        content: String,
        style: ScalarStyle,
        anchor_id: usize,
        location: Location,
    ) -> Result<()> {
        let is_null = style == ScalarStyle::Plain && is_null_literal(&content);

        let node = if let Some(map_path) = self.key_slot() {
            if is_null {
                return Err(YamlError::malformed(
                    INVALID_KEY_MESSAGE,
                    map_path.with_error(location),
                ));
            }
            let path = map_path.with_map_element_key(content.as_str(), location);
            YamlNode::new(YamlValue::Scalar(YamlScalar::new(content, style)), path)
        } else {
            let value = if is_null {
                YamlValue::Null
            } else {
                YamlValue::Scalar(YamlScalar::new(content, style))
            };
            YamlNode::new(value, self.value_path(location))
        };

        self.register_anchor(anchor_id, &node, 0)?;
        self.push_node(node)
    }

    fn start(&mut self, anchor_id: usize, location: Location, kind: FrameKind) -> Result<()> {
        if let Some(map_path) = self.key_slot() {
            return Err(YamlError::malformed(
                INVALID_KEY_MESSAGE,
                map_path.with_error(location),
            ));
        }

        let path = self.value_path(location);
        self.stack.push(Frame {
            path,
            anchor_id,
            expansions: 0,
            kind,
        });
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };

        let value = match frame.kind {
            FrameKind::List { items } => YamlValue::List(items),
            FrameKind::Map {
                entries, merges, ..
            } => YamlValue::Map(merge_entries(entries, merges)?),
        };

        let node = YamlNode::new(value, frame.path);
        self.register_anchor(frame.anchor_id, &node, frame.expansions)?;
        self.add_expansions(frame.expansions);
        self.push_node(node)
    }

    fn alias(&mut self, anchor_id: usize, location: Location) -> Result<()> {
        let error_path = self.value_path(location);

        let Some(limit) = self.config.alias_limit() else {
            return Err(YamlError::new(
                YamlErrorKind::ForbiddenAnchorOrAlias,
                error_path.with_error(location),
            ));
        };

        let Some(token) = anchor_id
            .checked_sub(1)
            .and_then(|index| self.anchor_tokens.get(index))
        else {
            return Err(YamlError::new(
                YamlErrorKind::UnknownAnchor {
                    name: anchor_id.to_string(),
                },
                error_path.with_error(location),
            ));
        };

        let Some(anchor) = self.anchors.get(&anchor_id) else {
            return Err(YamlError::new(
                YamlErrorKind::UnknownAnchor {
                    name: token.name.clone(),
                },
                error_path.with_error(location),
            ));
        };

        // Count the copies nested inside the anchored node too, so that
        // aliases of aliases cannot grow the tree past the limit.
        let expansions = anchor.expansions.saturating_add(1);
        self.alias_count = self.alias_count.saturating_add(expansions);
        if let Some(max) = limit {
            if self.alias_count > max {
                return Err(YamlError::new(
                    YamlErrorKind::AliasLimitExceeded { limit: max },
                    error_path.with_error(location),
                ));
            }
        }

        let node = if let Some(map_path) = self.key_slot() {
            match anchor.node.value() {
                YamlValue::Scalar(scalar) => YamlNode::new(
                    YamlValue::Scalar(scalar.clone()),
                    map_path.with_map_element_key(scalar.content.as_str(), location),
                ),
                _ => {
                    return Err(YamlError::malformed(
                        INVALID_KEY_MESSAGE,
                        map_path.with_error(location),
                    ))
                }
            }
        } else {
            let reference_path = self
                .value_path(location)
                .with_alias_reference(token.name.as_str(), location)
                .with_alias_definition(token.name.as_str(), token.location);
            anchor
                .node
                .with_replaced_path_prefix(anchor.node.path(), &reference_path)
        };

        self.add_expansions(expansions);
        self.push_node(node)
    }

    /// Charges alias expansions to the innermost open container.
    fn add_expansions(&mut self, expansions: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.expansions = frame.expansions.saturating_add(expansions);
        }
    }

    fn register_anchor(&mut self, anchor_id: usize, node: &YamlNode, expansions: usize) -> Result<()> {
        if anchor_id == 0 {
            return Ok(());
        }

        if self.config.alias_limit().is_none() {
            let location = anchor_id
                .checked_sub(1)
                .and_then(|index| self.anchor_tokens.get(index))
                .map_or_else(|| node.location(), |token| token.location);
            return Err(YamlError::new(
                YamlErrorKind::ForbiddenAnchorOrAlias,
                node.path().with_error(location),
            ));
        }

        self.anchors.insert(
            anchor_id,
            Anchor {
                node: node.clone(),
                expansions,
            },
        );
        Ok(())
    }

    fn push_node(&mut self, node: YamlNode) -> Result<()> {
        let Some(frame) = self.stack.last_mut() else {
            if self.root.is_none() {
                self.root = Some(node);
            }
            return Ok(());
        };

        match &mut frame.kind {
            FrameKind::List { items } => items.push(node),
            FrameKind::Map {
                entries,
                merges,
                pending_key,
            } => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) if is_merge_key(&key) => merges.push(node),
                Some(key) => insert_entry(entries, key, node)?,
            },
        }

        Ok(())
    }
}

fn insert_entry(entries: &mut IndexMap<String, YamlEntry>, key: YamlNode, value: YamlNode) -> Result<()> {
    let entry = YamlEntry { key, value };
    let name = entry.key_content().to_string();

    if let Some(existing) = entries.get(&name) {
        return Err(YamlError::new(
            YamlErrorKind::DuplicateKey {
                key: name,
                original: existing.key.location(),
            },
            entry.key.path().clone(),
        ));
    }

    entries.insert(name, entry);
    Ok(())
}

/// Applies merge keys: keys of the map itself win over merged keys, and
/// earlier merge sources win over later ones.
fn merge_entries(
    local: IndexMap<String, YamlEntry>,
    sources: Vec<YamlNode>,
) -> Result<IndexMap<String, YamlEntry>> {
    if sources.is_empty() {
        return Ok(local);
    }

    let mut merged = IndexMap::new();
    for source in sources {
        let type_name = source.type_name();
        let YamlNode { value, path } = source;

        match value {
            YamlValue::Map(entries) => absorb(&mut merged, entries),
            YamlValue::List(items) => {
                for item in items {
                    let item_type = item.type_name();
                    let YamlNode { value, path } = item;
                    match value {
                        YamlValue::Map(entries) => absorb(&mut merged, entries),
                        _ => return Err(cannot_merge(item_type, path)),
                    }
                }
            }
            _ => return Err(cannot_merge(type_name, path)),
        }
    }

    for (name, entry) in local {
        merged.insert(name, entry);
    }

    Ok(merged)
}

fn absorb(merged: &mut IndexMap<String, YamlEntry>, entries: IndexMap<String, YamlEntry>) {
    for (name, entry) in entries {
        merged.entry(name).or_insert(entry);
    }
}

fn cannot_merge(type_name: &str, path: YamlPath) -> YamlError {
    YamlError::malformed(
        format!("Cannot merge {type_name} into a map. Only maps can be merged."),
        path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::YamlPathSegment;

    fn parse(yaml: &str) -> YamlNode {
        parse_yaml(yaml, &YamlConfiguration::default()).unwrap()
    }

    #[test]
    fn test_parse_simple_map() {
        let root = parse("name: test\ncount: 42\n");

        match root.value() {
            YamlValue::Map(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries.get_index(0).map(|(k, _)| k.as_str()), Some("name"));
                assert_eq!(entries.get_index(1).map(|(k, _)| k.as_str()), Some("count"));
            }
            other => panic!("Expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_key_and_value_locations() {
        let root = parse("first: 1\nsecond: two\n");
        let YamlValue::Map(entries) = root.value() else {
            panic!("Expected map");
        };
        let second = &entries["second"];

        assert_eq!(second.key.location(), Location::new(2, 1));
        assert_eq!(second.value.location(), Location::new(2, 9));
        assert_eq!(second.value.path().to_human_readable_string(), "second");
    }

    #[test]
    fn test_list_entry_paths() {
        let root = parse("items:\n  - a\n  - b\n");
        let items = root.get("items").unwrap();
        let YamlValue::List(items) = items.value() else {
            panic!("Expected list");
        };

        assert_eq!(items[1].path().to_human_readable_string(), "items[1]");
        assert_eq!(items[1].location(), Location::new(3, 5));
    }

    #[test]
    fn test_null_forms() {
        let root = parse("a: ~\nb:\nc: null\nd: 'null'\n");

        assert!(root.get("a").unwrap().value().is_null());
        assert!(root.get("b").unwrap().value().is_null());
        assert!(root.get("c").unwrap().value().is_null());
        assert!(root.get("d").unwrap().value().is_scalar());
    }

    #[test]
    fn test_null_key_rejected() {
        let err = parse_yaml("null: 1\n", &YamlConfiguration::default()).unwrap_err();
        assert!(matches!(err.kind(), YamlErrorKind::MalformedYaml(_)));
    }

    #[test]
    fn test_anchor_tokens_in_source_order() {
        let tokens = anchor_tokens("a: &first 1\nb:\n  - &second x\n");

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].name, "first");
        assert_eq!(tokens[0].location, Location::new(1, 4));
        assert_eq!(tokens[1].name, "second");
        assert_eq!(tokens[1].location, Location::new(3, 5));
    }

    #[test]
    fn test_alias_definition_points_at_the_anchor_token() {
        let root = parse("x: &anc\n  b: 1\ny: *anc\n");
        let y = root.get("y").unwrap();

        let definition = y.path().segments().iter().find_map(|segment| match segment {
            YamlPathSegment::AliasDefinition { name, location } => Some((name.as_str(), *location)),
            _ => None,
        });
        assert_eq!(definition, Some(("anc", Location::new(1, 4))));
    }

    #[test]
    fn test_nested_alias_expansions_count_towards_the_limit() {
        let yaml = "a: &a [1, 2]\nb: &b [*a, *a, *a]\nc: [*b, *b, *b]\n";
        let config = YamlConfiguration {
            anchors_and_aliases: crate::config::AnchorsAndAliases::Permitted {
                max_alias_count: Some(10),
            },
            ..YamlConfiguration::default()
        };

        // b holds 3 expansions, so each *b costs 4 and the second one reaches 11.
        let err = parse_yaml(yaml, &config).unwrap_err();
        assert_eq!(err.kind(), &YamlErrorKind::AliasLimitExceeded { limit: 10 });
        assert_eq!(err.location(), Some(Location::new(3, 9)));

        let roomier = YamlConfiguration {
            anchors_and_aliases: crate::config::AnchorsAndAliases::Permitted {
                max_alias_count: Some(15),
            },
            ..YamlConfiguration::default()
        };
        assert!(parse_yaml(yaml, &roomier).is_ok());
    }

    #[test]
    fn test_local_keys_override_merged_keys() {
        let root = parse("base: &base\n  a: 1\n  b: 2\nmine:\n  <<: *base\n  b: 3\n");
        let mine = root.get("mine").unwrap();

        match mine.get("b").unwrap().value() {
            YamlValue::Scalar(scalar) => assert_eq!(scalar.content, "3"),
            other => panic!("Expected scalar, got {:?}", other),
        }
        assert_eq!(
            mine.get("a").unwrap().path().to_human_readable_string(),
            "mine>>(merged &base).a"
        );
    }
}
