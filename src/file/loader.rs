//! YAML file loading functionality.
//!
//! This module provides functions to read YAML documents from files or
//! stdin and parse them into [`YamlNode`] trees ready for decoding.

use crate::config::YamlConfiguration;
use crate::document::{parse_yaml, YamlNode};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a YAML file, decompressing it first if its name ends in `.gz`.
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - A `.gz` file is not valid gzip or does not decompress to UTF-8
pub fn read_yaml_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path_ref)
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))
    }
}

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yamlshape::config::YamlConfiguration;
/// use yamlshape::file::loader::load_yaml_file;
///
/// let root = load_yaml_file("manifest.yaml", &YamlConfiguration::default()).unwrap();
/// assert!(root.value().is_map());
/// ```
pub fn load_yaml_file<P: AsRef<Path>>(path: P, config: &YamlConfiguration) -> Result<YamlNode> {
    let content = read_yaml_file(&path)?;
    parse_yaml(&content, config).context("Failed to parse YAML")
}

/// Reads YAML text from standard input until EOF.
///
/// Input starting with the gzip magic bytes (`0x1f 0x8b`) is decompressed.
pub fn read_yaml_from_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    decode_bytes(buffer)
}

/// Loads and parses YAML from standard input.
pub fn load_yaml_from_stdin(config: &YamlConfiguration) -> Result<YamlNode> {
    let content = read_yaml_from_stdin()?;
    parse_yaml(&content, config).context("Failed to parse YAML from stdin")
}

fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
