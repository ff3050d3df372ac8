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

//! Node definitions.

use serde::{Deserialize, Serialize};

use super::property::PropertySchema;

/// Whether a definition yields one element or one per array entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// At most one element per document.
    Standard,
    /// One element per entry of a document array.
    Iterator,
}

/// How to derive a node from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDef {
    /// Identifier referenced by relationships.
    pub id: String,
    /// Standard or iterator.
    pub node_type: Shape,
    /// Labels applied to the node, in order.
    pub labels: Vec<String>,
    /// Whether a document that cannot produce this node is dropped.
    pub required: bool,
    /// Labels used for matching instead of all labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_labels: Option<Vec<String>>,
    /// Dotted path to the array driving an iterator node.
    #[serde(default, alias = "iterator", skip_serializing_if = "Option::is_none")]
    pub iterator_path: Option<String>,
    /// Declared properties.
    #[serde(flatten)]
    pub schema: PropertySchema,
}

impl NodeDef {
    /// Create a standard node definition with no properties.
    pub fn standard(id: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            id: id.into(),
            node_type: Shape::Standard,
            labels,
            required: false,
            unique_labels: None,
            iterator_path: None,
            schema: PropertySchema::default(),
        }
    }

    /// Create an iterator node definition over the array at `path`.
    pub fn iterator(id: impl Into<String>, labels: Vec<String>, path: impl Into<String>) -> Self {
        Self {
            node_type: Shape::Iterator,
            iterator_path: Some(path.into()),
            ..Self::standard(id, labels)
        }
    }

    /// True for iterator nodes.
    pub fn is_iterator(&self) -> bool {
        self.node_type == Shape::Iterator
    }

    /// Labels that are not part of the unique labels.
    pub fn non_unique_labels(&self) -> Vec<&str> {
        match &self.unique_labels {
            Some(unique) => self
                .labels
                .iter()
                .filter(|l| !unique.contains(l))
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        }
    }
}
