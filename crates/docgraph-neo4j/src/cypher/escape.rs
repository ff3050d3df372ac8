// Dweve DocGraph - Document to Graph Compiler
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cypher identifier and literal escaping.
//!
//! Labels, relationship types and property keys come from the mapping and
//! are always sanitized: Unicode is normalized to NFC, invisible and
//! control characters are removed, and anything that is not a plain
//! identifier (or is a reserved word) is wrapped in backticks.
//!
//! Literal text escaping is separate and opt-in, see
//! [`crate::StatementConfig::escape_literals`].

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape text for use inside a quoted Cypher literal.
///
/// Returns the input unchanged when nothing needs escaping.
///
/// ```
/// # use docgraph_neo4j::cypher::escape_string;
/// assert!(matches!(escape_string("plain"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_string(r#"say "hi""#), r#"say \"hi\""#);
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Check if a string is a plain Cypher identifier: a letter or underscore
/// followed by letters, digits or underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Normalize a string to NFC.
///
/// ```
/// # use docgraph_neo4j::cypher::normalize_unicode;
/// assert_eq!(normalize_unicode("cafe\u{301}"), "caf\u{e9}");
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

fn is_invisible(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'..='\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    normalize_unicode(s)
        .chars()
        .filter(|c| !is_invisible(*c))
        .collect()
}

fn quote_if_needed(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a property key or variable name.
///
/// ```
/// # use docgraph_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("email"), "email");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// assert_eq!(escape_identifier("match"), "`match`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    quote_if_needed(s)
}

/// Escape a node label, including its leading colon.
///
/// ```
/// # use docgraph_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("Person"), ":Person");
/// assert_eq!(escape_label("Web-Page"), ":`Web-Page`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", quote_if_needed(s))
}

/// Escape a list of labels as a single `:A:B` string.
pub fn escape_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels.iter().map(|l| escape_label(l.as_ref())).collect()
}

/// Escape a relationship type, including its leading colon.
///
/// ```
/// # use docgraph_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("KNOWS"), ":KNOWS");
/// assert_eq!(escape_relationship_type("knows-about"), ":`knows-about`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", quote_if_needed(s))
}

fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "AS"
            | "ASC"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DETACH"
            | "DISTINCT"
            | "ELSE"
            | "END"
            | "EXISTS"
            | "FALSE"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MATCH"
            | "MERGE"
            | "NOT"
            | "NULL"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SKIP"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNWIND"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string_quotes() {
        assert_eq!(escape_string("it's"), "it\\'s");
        assert_eq!(escape_string("a\"b"), "a\\\"b");
    }

    #[test]
    fn test_escape_string_control() {
        assert_eq!(escape_string("a\nb\tc"), "a\\nb\\tc");
        assert_eq!(escape_string("x\x00"), "x\\u0000");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_escape_string_borrows_clean_input() {
        assert!(matches!(escape_string("clean"), Cow::Borrowed("clean")));
        assert!(matches!(escape_string("dirty\""), Cow::Owned(_)));
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("email"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("v2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2v"));
        assert!(!is_valid_identifier("a-b"));
        assert!(!is_valid_identifier("a.b"));
    }

    #[test]
    fn test_escape_identifier_keywords_and_backticks() {
        assert_eq!(escape_identifier("WHERE"), "`WHERE`");
        assert_eq!(escape_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_escape_labels_joined() {
        assert_eq!(escape_labels(&["Author", "Person"]), ":Author:Person");
        assert_eq!(escape_labels::<&str>(&[]), "");
    }

    #[test]
    fn test_invisible_characters_removed() {
        assert_eq!(escape_label("Per\u{200B}son"), ":Person");
        assert_eq!(escape_relationship_type("KNO\u{202E}WS"), ":KNOWS");
        assert_eq!(escape_identifier("na\nme"), "name");
    }

    #[test]
    fn test_unicode_normalized_before_quoting() {
        let composed = escape_label("Caf\u{e9}");
        let decomposed = escape_label("Cafe\u{301}");
        assert_eq!(composed, decomposed);
        assert_eq!(composed, ":`Caf\u{e9}`");
    }
}
