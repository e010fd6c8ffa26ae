//! Transforms from declared field names to the keys expected in documents.

use serde::{Deserialize, Serialize};

/// How a declared field name is spelled in the document.
///
/// Applied once per field name when an object starts decoding. Field names
/// are split into words at underscores, hyphens, spaces and case changes
/// before being re-joined, so `deprecation_message` and `deprecationMessage`
/// both become `deprecation-message` under [`NamingStrategy::KebabCase`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum NamingStrategy {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    /// Any other transform. Cannot be set from a configuration file.
    #[serde(skip)]
    Custom(fn(&str) -> String),
}

impl NamingStrategy {
    /// Returns the document key expected for the declared field `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlshape::config::NamingStrategy;
    ///
    /// assert_eq!(NamingStrategy::KebabCase.key_for("list_item"), "list-item");
    /// assert_eq!(NamingStrategy::CamelCase.key_for("named_values"), "namedValues");
    /// assert_eq!(NamingStrategy::PascalCase.key_for("http_server"), "HttpServer");
    /// ```
    pub fn key_for(&self, name: &str) -> String {
        match self {
            NamingStrategy::SnakeCase => join_lower(name, "_"),
            NamingStrategy::KebabCase => join_lower(name, "-"),
            NamingStrategy::ScreamingSnakeCase => split_words(name)
                .iter()
                .map(|word| word.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
            NamingStrategy::PascalCase => split_words(name)
                .iter()
                .map(|word| capitalize(word))
                .collect(),
            NamingStrategy::CamelCase => split_words(name)
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            NamingStrategy::Custom(transform) => transform(name),
        }
    }
}

fn join_lower(name: &str, separator: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Splits an identifier into words.
///
/// A run of capitals followed by a lowercase letter starts a new word at its
/// last capital, so `HTTPServer` is `HTTP`, `Server`.
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_handles_mixed_styles() {
        assert_eq!(split_words("deprecation_message"), vec!["deprecation", "message"]);
        assert_eq!(split_words("deprecationMessage"), vec!["deprecation", "Message"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("list-item"), vec!["list", "item"]);
        assert_eq!(split_words("x"), vec!["x"]);
    }

    #[test]
    fn test_builtin_strategies() {
        assert_eq!(NamingStrategy::SnakeCase.key_for("deprecationMessage"), "deprecation_message");
        assert_eq!(NamingStrategy::KebabCase.key_for("allowed_values"), "allowed-values");
        assert_eq!(NamingStrategy::ScreamingSnakeCase.key_for("max_count"), "MAX_COUNT");
        assert_eq!(NamingStrategy::PascalCase.key_for("named_values"), "NamedValues");
        assert_eq!(NamingStrategy::CamelCase.key_for("Named_Values"), "namedValues");
    }

    #[test]
    fn test_custom_strategy() {
        fn shout(name: &str) -> String {
            format!("{}!", name.to_uppercase())
        }

        assert_eq!(NamingStrategy::Custom(shout).key_for("name"), "NAME!");
    }
}
