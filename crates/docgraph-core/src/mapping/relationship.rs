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

//! Relationship definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::Shape;
use super::property::PropertySchema;

/// Arrow orientation between the source and destination node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    /// `(s)-[r]->(d)`
    #[serde(alias = ">")]
    Forward,
    /// `(s)<-[r]-(d)`
    #[serde(alias = "<")]
    Backward,
}

/// How to derive a relationship between two compiled nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDef {
    /// Edge label.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Standard or iterator.
    pub relationship_type: Shape,
    /// Arrow orientation.
    pub directionality: Directionality,
    /// Id of the source node definition.
    #[serde(alias = "sourceNode")]
    pub source_node_id: String,
    /// Id of the destination node definition.
    #[serde(alias = "destinationNode")]
    pub destination_node_id: String,
    /// Whether a document that cannot produce this relationship is dropped.
    pub required: bool,
    /// Forces MERGE even without unique properties.
    #[serde(default)]
    pub unique: bool,
    /// Declared properties.
    #[serde(flatten)]
    pub schema: PropertySchema,
}

impl RelationshipDef {
    /// Create a standard, forward relationship definition.
    pub fn standard(
        rel_type: impl Into<String>,
        source_node_id: impl Into<String>,
        destination_node_id: impl Into<String>,
    ) -> Self {
        Self {
            rel_type: rel_type.into(),
            relationship_type: Shape::Standard,
            directionality: Directionality::Forward,
            source_node_id: source_node_id.into(),
            destination_node_id: destination_node_id.into(),
            required: false,
            unique: false,
            schema: PropertySchema::default(),
        }
    }

    /// True for iterator relationships.
    pub fn is_iterator(&self) -> bool {
        self.relationship_type == Shape::Iterator
    }

    /// Endpoint ids, source first.
    pub fn endpoints(&self) -> [&str; 2] {
        [&self.source_node_id, &self.destination_node_id]
    }
}

impl fmt::Display for RelationshipDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}->{})",
            self.rel_type, self.source_node_id, self.destination_node_id
        )
    }
}
