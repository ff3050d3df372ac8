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

//! Rendering typed property values as Cypher literals.
//!
//! Formatting is driven by the declared type, never by the value:
//!
//! | Type | Literal |
//! |------|---------|
//! | `number` | raw text, unquoted |
//! | `string` | `"text"` |
//! | `datetime` | `datetime("text")` |
//! | `list` | `[a, b, ...]` |

use docgraph_core::PropertyValue;
use serde_json::Value;

use super::escape::{escape_identifier, escape_string};
use crate::config::StatementConfig;

/// Render a property value as a Cypher literal.
///
/// ```
/// # use docgraph_core::PropertyValue;
/// # use docgraph_neo4j::{cypher::format_value, StatementConfig};
/// let config = StatementConfig::default();
/// assert_eq!(format_value(&PropertyValue::Number("5".into()), &config), "5");
/// assert_eq!(format_value(&PropertyValue::Text("x".into()), &config), "\"x\"");
/// ```
pub fn format_value(value: &PropertyValue, config: &StatementConfig) -> String {
    match value {
        PropertyValue::Number(raw) => raw.clone(),
        PropertyValue::Text(text) => quote(text, config),
        PropertyValue::Timestamp(text) => format!("datetime({})", quote(text, config)),
        PropertyValue::List(items) => format_json(items, config),
    }
}

/// Double-quote `text`, escaping it if the configuration asks for it.
pub fn quote(text: &str, config: &StatementConfig) -> String {
    if config.escape_literals {
        format!("\"{}\"", escape_string(text))
    } else {
        format!("\"{}\"", text)
    }
}

fn format_json(value: &Value, config: &StatementConfig) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s, config),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(|v| format_json(v, config)).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", escape_identifier(k), format_json(v, config)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}
