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

//! Compiled graph elements produced from a single document.
//!
//! These values are created fresh for every document, handed through the
//! post-processing hooks by value, and consumed by statement generation.

use indexmap::IndexMap;
use serde_json::Value;

use crate::mapping::{Directionality, Shape};
use crate::value::PropertyValue;

/// Property values by name, in the order the mapping declares them.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Evaluated properties, split into the full set and the merge key.
///
/// `unique_properties` is a subset of `properties` carrying the same values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    /// Every evaluated property.
    pub properties: PropertyMap,
    /// The evaluated properties that form the merge key.
    pub unique_properties: PropertyMap,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, also recording it in the merge key if `unique`.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue, unique: bool) {
        let name = name.into();
        if unique {
            self.unique_properties.insert(name.clone(), value.clone());
        }
        self.properties.insert(name, value);
    }

    /// Builder form of [`PropertySet::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value.into(), false);
        self
    }

    /// Builder form of [`PropertySet::insert`] for merge-key properties.
    pub fn with_unique(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value.into(), true);
        self
    }

    /// True if there is a merge key.
    pub fn has_unique(&self) -> bool {
        !self.unique_properties.is_empty()
    }

    /// True if no property was evaluated.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties that are not part of the merge key, in declaration order.
    pub fn non_unique(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.properties
            .iter()
            .filter(|(name, _)| !self.unique_properties.contains_key(*name))
    }

    /// The properties identifying this element when matching it:
    /// the merge key if there is one, otherwise every property.
    pub fn identity(&self) -> &PropertyMap {
        if self.has_unique() {
            &self.unique_properties
        } else {
            &self.properties
        }
    }
}

/// Borrowed view of everything needed to write or match one node.
#[derive(Debug, Clone, Copy)]
pub struct NodePattern<'a> {
    /// All labels.
    pub labels: &'a [String],
    /// Labels used for matching, if restricted.
    pub unique_labels: Option<&'a [String]>,
    /// Evaluated properties.
    pub properties: &'a PropertySet,
}

impl<'a> NodePattern<'a> {
    /// Labels used when matching or merging.
    pub fn match_labels(&self) -> &'a [String] {
        self.unique_labels.unwrap_or(self.labels)
    }

    /// Labels outside the unique labels, set after merging.
    pub fn extra_labels(&self) -> Vec<&'a String> {
        match self.unique_labels {
            Some(unique) => self.labels.iter().filter(|l| !unique.contains(l)).collect(),
            None => Vec::new(),
        }
    }

    /// True if this node is written with MERGE.
    pub fn is_merge(&self) -> bool {
        self.properties.has_unique() || self.unique_labels.is_some()
    }
}

/// One node produced from one array element.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInstance {
    /// All labels.
    pub labels: Vec<String>,
    /// Labels used for matching, if restricted.
    pub unique_labels: Option<Vec<String>>,
    /// Evaluated properties.
    pub properties: PropertySet,
    /// The array element this instance was produced from.
    pub element: Value,
}

impl NodeInstance {
    /// Borrow this instance as a node pattern.
    pub fn pattern(&self) -> NodePattern<'_> {
        NodePattern {
            labels: &self.labels,
            unique_labels: self.unique_labels.as_deref(),
            properties: &self.properties,
        }
    }
}

/// Payload of a compiled node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    /// A single node.
    Standard(PropertySet),
    /// One node per array element, in array order.
    Iterator(Vec<NodeInstance>),
}

/// A node (or family of iterator nodes) compiled from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledNode {
    /// Id of the node definition this came from.
    pub id: String,
    /// All labels.
    pub labels: Vec<String>,
    /// Labels used for matching, if restricted.
    pub unique_labels: Option<Vec<String>>,
    /// Properties or instances.
    pub body: NodeBody,
}

impl CompiledNode {
    /// Standard or iterator.
    pub fn shape(&self) -> Shape {
        match self.body {
            NodeBody::Standard(_) => Shape::Standard,
            NodeBody::Iterator(_) => Shape::Iterator,
        }
    }

    /// True for iterator nodes.
    pub fn is_iterator(&self) -> bool {
        self.shape() == Shape::Iterator
    }

    /// Iterator instances; empty for standard nodes.
    pub fn instances(&self) -> &[NodeInstance] {
        match &self.body {
            NodeBody::Iterator(instances) => instances,
            NodeBody::Standard(_) => &[],
        }
    }

    /// Pattern for a standard node; `None` for iterator nodes.
    pub fn pattern(&self) -> Option<NodePattern<'_>> {
        match &self.body {
            NodeBody::Standard(properties) => Some(NodePattern {
                labels: &self.labels,
                unique_labels: self.unique_labels.as_deref(),
                properties,
            }),
            NodeBody::Iterator(_) => None,
        }
    }

    /// Patterns for every node this value writes, in order.
    pub fn patterns(&self) -> Vec<NodePattern<'_>> {
        match &self.body {
            NodeBody::Standard(_) => self.pattern().into_iter().collect(),
            NodeBody::Iterator(instances) => instances.iter().map(NodeInstance::pattern).collect(),
        }
    }
}

/// One relationship produced for one iterator node instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipInstance {
    /// Evaluated properties.
    pub properties: PropertySet,
}

/// Payload of a compiled relationship.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipBody {
    /// A single relationship.
    Standard(PropertySet),
    /// One relationship per instance of the iterator endpoint, same order.
    Iterator(Vec<RelationshipInstance>),
}

/// A relationship (or family of iterator relationships) between two
/// compiled nodes of the same document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRelationship {
    /// Edge label.
    pub rel_type: String,
    /// Arrow orientation.
    pub directionality: Directionality,
    /// Forces MERGE even without a merge key.
    pub unique: bool,
    /// The source node.
    pub source: CompiledNode,
    /// The destination node.
    pub destination: CompiledNode,
    /// Properties or instances.
    pub body: RelationshipBody,
}

impl CompiledRelationship {
    /// Standard or iterator.
    pub fn shape(&self) -> Shape {
        match self.body {
            RelationshipBody::Standard(_) => Shape::Standard,
            RelationshipBody::Iterator(_) => Shape::Iterator,
        }
    }

    /// Number of relationships this value writes.
    pub fn len(&self) -> usize {
        match &self.body {
            RelationshipBody::Standard(_) => 1,
            RelationshipBody::Iterator(instances) => instances.len(),
        }
    }

    /// True if this value writes no relationship.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
