//! File input for YAML documents.
//!
//! This module reads YAML text from disk or stdin, transparently
//! decompressing gzip input, and parses it into node trees.

pub mod loader;
