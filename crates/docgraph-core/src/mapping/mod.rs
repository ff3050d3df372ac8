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

//! The mapping schema: how documents become nodes and relationships.
//!
//! A [`Mapping`] is parsed once, validated once, and then shared read-only
//! for the rest of the run. Validation happens at load time so that every
//! configuration error (dangling node references, iterator relationships
//! without exactly one iterator endpoint, undeclared unique properties)
//! surfaces before the first document is read.
//!
//! # Example
//!
//! ```
//! use docgraph_core::Mapping;
//!
//! let mapping = Mapping::from_yaml_str(r#"
//! index: people
//! docType: person
//! nodes:
//!   - id: a
//!     nodeType: standard
//!     labels: [Person]
//!     required: true
//!     properties:
//!       email: {key: a, type: string}
//!     uniqueProperties: [email]
//! relationships: []
//! "#).unwrap();
//!
//! assert_eq!(mapping.nodes.len(), 1);
//! ```

pub mod node;
pub mod property;
pub mod relationship;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{MappingError, Result};

pub use node::{NodeDef, Shape};
pub use property::{PropertyDef, PropertySchema, PropertyType, ITERATOR_SENTINEL};
pub use relationship::{Directionality, RelationshipDef};

/// A validated mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    /// Name of the source index.
    pub index: String,
    /// Optional document type within the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Node definitions, evaluated in order.
    pub nodes: Vec<NodeDef>,
    /// Relationship definitions, evaluated in order.
    pub relationships: Vec<RelationshipDef>,
}

impl Mapping {
    /// Parse and validate a mapping from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mapping: Mapping = serde_yaml::from_str(yaml)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Read, parse, and validate a mapping file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Look up a node definition by id.
    pub fn node(&self, id: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Check every structural invariant of the mapping.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(MappingError::DuplicateNodeId(node.id.clone()));
            }
            validate_node(node)?;
        }

        for rel in &self.relationships {
            self.validate_relationship(rel)?;
        }

        Ok(())
    }

    fn validate_relationship(&self, rel: &RelationshipDef) -> Result<()> {
        let owner = format!("relationship {}", rel);

        let mut iterator_endpoints = 0;
        for id in rel.endpoints() {
            let node = self
                .node(id)
                .ok_or_else(|| MappingError::UnknownNodeReference {
                    relationship: rel.to_string(),
                    node_id: id.to_string(),
                })?;
            if node.is_iterator() {
                if !rel.is_iterator() {
                    return Err(MappingError::IteratorEndpointOnStandard {
                        relationship: rel.to_string(),
                        node_id: id.to_string(),
                    });
                }
                iterator_endpoints += 1;
            }
        }

        if rel.is_iterator() && iterator_endpoints != 1 {
            return Err(MappingError::IteratorEndpoints {
                relationship: rel.to_string(),
                count: iterator_endpoints,
            });
        }

        validate_schema(&rel.schema, &owner, rel.is_iterator())
    }
}

fn validate_node(node: &NodeDef) -> Result<()> {
    if node.labels.is_empty() {
        return Err(MappingError::MissingLabels(node.id.clone()));
    }
    if node.is_iterator() && node.iterator_path.is_none() {
        return Err(MappingError::MissingIteratorPath(node.id.clone()));
    }
    if let Some(unique) = &node.unique_labels {
        if let Some(label) = unique.iter().find(|l| !node.labels.contains(l)) {
            return Err(MappingError::UndeclaredUniqueLabel {
                node: node.id.clone(),
                label: label.clone(),
            });
        }
    }
    validate_schema(&node.schema, &format!("node '{}'", node.id), node.is_iterator())
}

fn validate_schema(schema: &PropertySchema, owner: &str, iterator: bool) -> Result<()> {
    if let Some((list, property)) = schema.undeclared() {
        return Err(MappingError::UndeclaredProperty {
            owner: owner.to_string(),
            list,
            property: property.to_string(),
        });
    }
    if !iterator {
        if let Some(property) = schema.element_bound().next() {
            return Err(MappingError::MisplacedIteratorSentinel {
                owner: owner.to_string(),
                property: property.to_string(),
            });
        }
    }
    Ok(())
}
