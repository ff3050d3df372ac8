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

//! Property declarations shared by node and relationship definitions.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Reserved source path binding a property to the current array element.
pub const ITERATOR_SENTINEL: &str = "ITER!";

/// Declared type of a property; drives literal formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Raw numeric literal.
    Number,
    /// Double-quoted text literal.
    String,
    /// Text wrapped in a `datetime(...)` constructor.
    Datetime,
    /// Raw collection literal.
    List,
}

/// Where a property's value comes from and how it is typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    /// Dotted path into the document, or [`ITERATOR_SENTINEL`].
    #[serde(alias = "key")]
    pub source_path: String,
    /// Declared property type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

impl PropertyDef {
    /// Create a property bound to a document path.
    pub fn new(source_path: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            source_path: source_path.into(),
            property_type,
        }
    }

    /// Create a property bound to the current array element.
    pub fn element(property_type: PropertyType) -> Self {
        Self::new(ITERATOR_SENTINEL, property_type)
    }

    /// True when this property reads the current array element.
    pub fn is_element_bound(&self) -> bool {
        self.source_path == ITERATOR_SENTINEL
    }
}

/// The property section of a node or relationship definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// Declared properties by name, in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDef>,
    /// Names forming the merge key.
    #[serde(default)]
    pub unique_properties: Vec<String>,
    /// Names whose absence invalidates the element.
    #[serde(default)]
    pub required_properties: Vec<String>,
}

impl PropertySchema {
    /// True if `name` is part of the merge key.
    pub fn is_unique(&self, name: &str) -> bool {
        self.unique_properties.iter().any(|p| p == name)
    }

    /// True if `name` must be present.
    pub fn is_required(&self, name: &str) -> bool {
        self.required_properties.iter().any(|p| p == name)
    }

    /// Names of properties bound to `ITER!`.
    pub fn element_bound(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|(_, def)| def.is_element_bound())
            .map(|(name, _)| name.as_str())
    }

    /// The first unique or required name that is not declared, if any.
    pub(crate) fn undeclared(&self) -> Option<(&'static str, &str)> {
        let unique = self
            .unique_properties
            .iter()
            .find(|p| !self.properties.contains_key(*p))
            .map(|p| ("unique", p.as_str()));
        unique.or_else(|| {
            self.required_properties
                .iter()
                .find(|p| !self.properties.contains_key(*p))
                .map(|p| ("required", p.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_def_from_yaml_aliases() {
        let def: PropertyDef = serde_yaml::from_str("key: a.b\ntype: number").unwrap();
        assert_eq!(def.source_path, "a.b");
        assert_eq!(def.property_type, PropertyType::Number);

        let def: PropertyDef = serde_yaml::from_str("sourcePath: c\ntype: datetime").unwrap();
        assert_eq!(def.source_path, "c");
        assert_eq!(def.property_type, PropertyType::Datetime);
    }

    #[test]
    fn test_unknown_property_type_rejected() {
        let result = serde_yaml::from_str::<PropertyDef>("key: a\ntype: blob");
        assert!(result.is_err());
    }

    #[test]
    fn test_element_binding() {
        assert!(PropertyDef::element(PropertyType::String).is_element_bound());
        assert!(!PropertyDef::new("name", PropertyType::String).is_element_bound());
    }

    #[test]
    fn test_schema_undeclared() {
        let mut schema = PropertySchema::default();
        schema
            .properties
            .insert("email".to_string(), PropertyDef::new("a", PropertyType::String));
        assert_eq!(schema.undeclared(), None);

        schema.required_properties.push("name".to_string());
        assert_eq!(schema.undeclared(), Some(("required", "name")));

        schema.unique_properties.push("id".to_string());
        assert_eq!(schema.undeclared(), Some(("unique", "id")));
    }
}
