//! Interpretation of scalar text as typed values.

/// Plain scalars that mean null.
pub fn is_null_literal(content: &str) -> bool {
    matches!(content, "" | "~" | "null" | "Null" | "NULL")
}

pub fn parse_bool(content: &str) -> Option<bool> {
    match content {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Parses a signed integer in decimal, hexadecimal (`0x`), octal (`0o`) or binary (`0b`).
///
/// # Example
///
/// ```
/// use yamlshape::document::scalar::parse_i64;
///
/// assert_eq!(parse_i64("-0x1F"), Some(-31));
/// assert_eq!(parse_i64("+42"), Some(42));
/// assert_eq!(parse_i64("4.2"), None);
/// ```
pub fn parse_i64(content: &str) -> Option<i64> {
    let (negative, digits) = split_sign(content);
    let magnitude = parse_radix(digits)?;

    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parses an unsigned integer using the same notations as [`parse_i64`].
pub fn parse_u64(content: &str) -> Option<u64> {
    match split_sign(content) {
        (false, digits) => parse_radix(digits),
        (true, _) => None,
    }
}

/// Parses a float, including YAML's `.inf`, `-.inf` and `.nan` spellings.
pub fn parse_f64(content: &str) -> Option<f64> {
    match content {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ => {
            // Rejects Rust-only spellings such as "inf", "-inf" and "NaN".
            if content
                .chars()
                .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
            {
                return None;
            }
            content.parse().ok()
        }
    }
}

/// Returns the single character in `content`, if there is exactly one.
pub fn parse_char(content: &str) -> Option<char> {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn split_sign(content: &str) -> (bool, &str) {
    if let Some(rest) = content.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = content.strip_prefix('+') {
        (false, rest)
    } else {
        (false, content)
    }
}

fn parse_radix(digits: &str) -> Option<u64> {
    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(octal) = digits.strip_prefix("0o") {
        (8, octal)
    } else if let Some(binary) = digits.strip_prefix("0b") {
        (2, binary)
    } else {
        (10, digits)
    };

    // from_str_radix accepts its own sign, which would allow "--1" or "0x-1".
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    u64::from_str_radix(digits, radix).ok()
}
