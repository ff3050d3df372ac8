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

//! Typed property values.

use serde::Serialize;
use serde_json::Value;

use crate::mapping::PropertyType;

/// A property value tagged with its declared type.
///
/// The tag comes from the mapping, never from inspecting the value, so a
/// JSON string declared as `number` is rendered as a raw number literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    /// Raw numeric literal text.
    Number(String),
    /// Text, rendered double-quoted.
    #[serde(rename = "string")]
    Text(String),
    /// ISO-like timestamp text, rendered inside `datetime(...)`.
    #[serde(rename = "datetime")]
    Timestamp(String),
    /// A collection, rendered as a list literal.
    List(Value),
}

impl PropertyValue {
    /// Tag a raw document value with its declared type.
    pub fn from_json(value: &Value, property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Number => PropertyValue::Number(raw_text(value)),
            PropertyType::String => PropertyValue::Text(raw_text(value)),
            PropertyType::Datetime => PropertyValue::Timestamp(raw_text(value)),
            PropertyType::List => PropertyValue::List(value.clone()),
        }
    }

    /// The declared type of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Number(_) => PropertyType::Number,
            PropertyValue::Text(_) => PropertyType::String,
            PropertyValue::Timestamp(_) => PropertyType::Datetime,
            PropertyValue::List(_) => PropertyType::List,
        }
    }

    /// Text content for scalar values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Number(s) | PropertyValue::Text(s) | PropertyValue::Timestamp(s) => {
                Some(s)
            }
            PropertyValue::List(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n.to_string())
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_from_number() {
        let v = PropertyValue::from_json(&json!(5), PropertyType::Number);
        assert_eq!(v, PropertyValue::Number("5".to_string()));
        let v = PropertyValue::from_json(&json!(2.5), PropertyType::Number);
        assert_eq!(v, PropertyValue::Number("2.5".to_string()));
    }

    #[test]
    fn test_type_directed_not_sniffed() {
        let v = PropertyValue::from_json(&json!("42"), PropertyType::Number);
        assert_eq!(v, PropertyValue::Number("42".to_string()));
        let v = PropertyValue::from_json(&json!(42), PropertyType::String);
        assert_eq!(v, PropertyValue::Text("42".to_string()));
    }

    #[test]
    fn test_datetime_and_list() {
        let v = PropertyValue::from_json(&json!("2024-01-02T03:04:05Z"), PropertyType::Datetime);
        assert_eq!(v.property_type(), PropertyType::Datetime);
        assert_eq!(v.as_str(), Some("2024-01-02T03:04:05Z"));

        let v = PropertyValue::from_json(&json!(["a", 1]), PropertyType::List);
        assert_eq!(v, PropertyValue::List(json!(["a", 1])));
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn test_serialize_shape() {
        let v = PropertyValue::from("x");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!({"type": "string", "value": "x"}));
    }
}
