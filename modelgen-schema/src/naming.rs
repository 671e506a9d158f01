//! Identifier helpers for code generation.

/// Rust strict and reserved keywords (2024 edition).
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["Self", "crate", "self", "super"];

/// Returns true if `s` is a Rust keyword.
#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns true if `s` is a legal, non-keyword Rust identifier.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if s == "_" || is_keyword(s) {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Makes a derived name usable as an identifier.
///
/// Keywords become raw identifiers (`r#type`); the few keywords that cannot
/// be raw get a trailing underscore.
#[must_use]
pub fn escape_identifier(s: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&s) {
        format!("{}_", s)
    } else if is_keyword(s) {
        format!("r#{}", s)
    } else {
        s.to_string()
    }
}

/// Converts a string to snake_case.
///
/// Runs of capitals are treated as one word, so `SEOTitle` becomes
/// `seo_title`. Any non-alphanumeric character separates words.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !result.is_empty() && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }

        result.extend(c.to_lowercase());
    }

    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Converts a string to PascalCase.
///
/// Word boundaries are non-alphanumeric characters; letters after the first
/// of each word keep their case, so `metaDescription` becomes
/// `MetaDescription`.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
