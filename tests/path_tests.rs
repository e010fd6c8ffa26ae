//! Tests for path construction and rendering

use yamlshape::path::{Location, MalformedPathError, YamlPath, YamlPathSegment};

fn error_at(line: usize, column: usize) -> YamlPathSegment {
    YamlPathSegment::Error {
        location: Location::new(line, column),
    }
}

#[test]
fn test_empty_path_is_rejected() {
    let err = YamlPath::new(vec![]).unwrap_err();

    assert_eq!(err, MalformedPathError::Empty);
    assert_eq!(err.to_string(), "Path must contain at least one segment.");
}

#[test]
fn test_path_starting_with_root_is_accepted() {
    assert!(YamlPath::new(vec![YamlPathSegment::Root]).is_ok());
}

#[test]
fn test_path_starting_with_alias_definition_is_accepted() {
    let segments = vec![YamlPathSegment::AliasDefinition {
        name: "blah".to_string(),
        location: Location::new(2, 3),
    }];

    assert!(YamlPath::new(segments).is_ok());
}

#[test]
fn test_path_starting_with_other_segment_is_rejected() {
    let err = YamlPath::new(vec![error_at(1, 2)]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "First element of path must be root segment or alias definition."
    );
}

#[test]
fn test_root_after_a_non_root_first_segment_reports_the_first_segment() {
    let err = YamlPath::new(vec![error_at(1, 2), YamlPathSegment::Root]).unwrap_err();

    assert_eq!(err, MalformedPathError::InvalidFirstSegment);
}

#[test]
fn test_repeated_root_is_rejected() {
    let err = YamlPath::new(vec![
        YamlPathSegment::Root,
        error_at(1, 2),
        YamlPathSegment::Root,
    ])
    .unwrap_err();

    assert_eq!(err.to_string(), "Root segment can only be first element of path.");
}

#[test]
fn test_end_location_of_root_is_document_start() {
    assert_eq!(YamlPath::root().end_location(), Location::new(1, 1));
}

#[test]
fn test_end_location_is_last_segment_location() {
    let path = YamlPath::new(vec![
        YamlPathSegment::Root,
        YamlPathSegment::ListEntry {
            index: 2,
            location: Location::new(3, 4),
        },
        YamlPathSegment::MapElementKey {
            key: "something".to_string(),
            location: Location::new(5, 6),
        },
    ])
    .unwrap();

    assert_eq!(path.end_location(), Location::new(5, 6));
}

#[test]
fn test_render_root() {
    assert_eq!(YamlPath::root().to_human_readable_string(), "<root>");
}

#[test]
fn test_render_error_after_root() {
    let path = YamlPath::root().with_error(Location::new(2, 3));
    assert_eq!(path.to_human_readable_string(), "<root>");
}

#[test]
fn test_render_error_after_list_entry_shows_parent() {
    let path = YamlPath::root()
        .with_list_entry(2, Location::new(2, 3))
        .with_error(Location::new(2, 3));

    assert_eq!(path.to_human_readable_string(), "[2]");
}

#[test]
fn test_render_list_entry() {
    let path = YamlPath::root().with_list_entry(2, Location::new(2, 3));
    assert_eq!(path.to_human_readable_string(), "[2]");
}

#[test]
fn test_render_map_key() {
    let path = YamlPath::root().with_map_element_key("colour", Location::new(2, 3));
    assert_eq!(path.to_human_readable_string(), "colour");
}

#[test]
fn test_render_map_value_is_same_as_key() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(2, 3))
        .with_map_element_value(Location::new(2, 11));

    assert_eq!(path.to_human_readable_string(), "colour");
}

#[test]
fn test_render_nested_map_key() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(2, 3))
        .with_map_element_value(Location::new(2, 11))
        .with_map_element_key("brightness", Location::new(3, 5));

    assert_eq!(path.to_human_readable_string(), "colour.brightness");
}

#[test]
fn test_render_nested_list_entry() {
    let path = YamlPath::root()
        .with_list_entry(1, Location::new(2, 3))
        .with_list_entry(4, Location::new(3, 5));

    assert_eq!(path.to_human_readable_string(), "[1][4]");
}

#[test]
fn test_render_list_in_map() {
    let path = YamlPath::root()
        .with_map_element_key("colours", Location::new(2, 3))
        .with_list_entry(4, Location::new(3, 5));

    assert_eq!(path.to_human_readable_string(), "colours[4]");
}

#[test]
fn test_render_key_in_list() {
    let path = YamlPath::root()
        .with_list_entry(1, Location::new(2, 3))
        .with_map_element_key("colour", Location::new(3, 5));

    assert_eq!(path.to_human_readable_string(), "[1].colour");
}

#[test]
fn test_render_list_then_key_from_root() {
    let path = YamlPath::root()
        .with_list_entry(2, Location::new(2, 3))
        .with_map_element_key("x", Location::new(2, 5));

    assert_eq!(path.to_human_readable_string(), "[2].x");
}

#[test]
fn test_render_alias_reference() {
    let path = YamlPath::root().with_alias_reference("blue", Location::new(2, 3));
    assert_eq!(path.to_human_readable_string(), "->&blue");
}

#[test]
fn test_render_alias_reference_in_map() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(2, 3))
        .with_alias_reference("blue", Location::new(3, 7));

    assert_eq!(path.to_human_readable_string(), "colour->&blue");
}

#[test]
fn test_render_alias_reference_in_list() {
    let path = YamlPath::root()
        .with_map_element_key("colours", Location::new(2, 3))
        .with_list_entry(4, Location::new(3, 5))
        .with_alias_reference("blue", Location::new(3, 7));

    assert_eq!(path.to_human_readable_string(), "colours[4]->&blue");
}

#[test]
fn test_render_resolved_alias_collapses_definition() {
    let path = YamlPath::root()
        .with_alias_reference("blue", Location::new(2, 3))
        .with_alias_definition("blue", Location::new(1, 2));

    assert_eq!(path.to_human_readable_string(), "->&blue");
}

#[test]
fn test_render_resolved_alias_map_element() {
    let path = YamlPath::root()
        .with_alias_reference("blue", Location::new(2, 3))
        .with_alias_definition("blue", Location::new(1, 2))
        .with_map_element_key("saturation", Location::new(1, 5));

    assert_eq!(path.to_human_readable_string(), "->&blue.saturation");
}

#[test]
fn test_render_resolved_alias_list_element() {
    let path = YamlPath::root()
        .with_alias_reference("blue", Location::new(2, 3))
        .with_alias_definition("blue", Location::new(1, 2))
        .with_list_entry(3, Location::new(1, 5));

    assert_eq!(path.to_human_readable_string(), "->&blue[3]");
}

#[test]
fn test_render_inline_merge() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(1, 3))
        .with_merge(Location::new(4, 5));

    assert_eq!(path.to_human_readable_string(), "colour>>(merged)");
}

#[test]
fn test_render_merge_list_entry() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(1, 3))
        .with_merge(Location::new(4, 5))
        .with_list_entry(1, Location::new(4, 10));

    assert_eq!(path.to_human_readable_string(), "colour>>(merged entry 1)");
}

#[test]
fn test_render_inline_merge_key() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(1, 3))
        .with_merge(Location::new(4, 5))
        .with_map_element_key("saturation", Location::new(4, 7));

    assert_eq!(path.to_human_readable_string(), "colour>>(merged).saturation");
}

#[test]
fn test_render_merged_alias_key() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(1, 3))
        .with_merge(Location::new(4, 5))
        .with_alias_reference("blue", Location::new(4, 5))
        .with_alias_definition("blue", Location::new(10, 3))
        .with_map_element_key("saturation", Location::new(11, 5));

    assert_eq!(
        path.to_human_readable_string(),
        "colour>>(merged &blue).saturation"
    );
}

#[test]
fn test_render_merged_alias_from_list_key() {
    let path = YamlPath::root()
        .with_map_element_key("colour", Location::new(1, 3))
        .with_merge(Location::new(4, 5))
        .with_list_entry(1, Location::new(4, 10))
        .with_alias_reference("green", Location::new(4, 10))
        .with_alias_definition("green", Location::new(10, 3))
        .with_map_element_key("saturation", Location::new(11, 5));

    assert_eq!(
        path.to_human_readable_string(),
        "colour>>(merged entry 1 &green).saturation"
    );
}

#[test]
fn test_location_display() {
    assert_eq!(Location::new(3, 14).to_string(), "line 3, column 14");
}
