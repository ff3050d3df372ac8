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

//! Relationship compilation.

use serde_json::Value;
use tracing::{debug, error};

use super::evaluate_properties;
use crate::graph::{CompiledNode, CompiledRelationship, RelationshipBody, RelationshipInstance};
use crate::mapping::{RelationshipDef, Shape};

/// Compile one relationship definition against one document and the nodes
/// already compiled for it.
///
/// Returns `None` when an endpoint was not produced, a required property is
/// missing, or the endpoints do not fit the relationship's shape. An
/// iterator relationship produces exactly one instance per instance of its
/// iterator endpoint, in the same order; if any instance misses a required
/// property the whole relationship is invalid, so positional correlation
/// always holds.
pub fn compile_relationship(
    def: &RelationshipDef,
    doc: &Value,
    nodes: &[CompiledNode],
) -> Option<CompiledRelationship> {
    let source = find_endpoint(def, &def.source_node_id, nodes)?;
    let destination = find_endpoint(def, &def.destination_node_id, nodes)?;

    let body = match def.relationship_type {
        Shape::Standard => compile_standard(def, doc, source, destination)?,
        Shape::Iterator => compile_iterator(def, doc, source, destination)?,
    };

    Some(CompiledRelationship {
        rel_type: def.rel_type.clone(),
        directionality: def.directionality,
        unique: def.unique,
        source: source.clone(),
        destination: destination.clone(),
        body,
    })
}

fn find_endpoint<'n>(
    def: &RelationshipDef,
    id: &str,
    nodes: &'n [CompiledNode],
) -> Option<&'n CompiledNode> {
    let found = nodes.iter().find(|n| n.id == id);
    if found.is_none() {
        debug!(relationship = %def, node = id, "relationship endpoint was not produced");
    }
    found
}

fn compile_standard(
    def: &RelationshipDef,
    doc: &Value,
    source: &CompiledNode,
    destination: &CompiledNode,
) -> Option<RelationshipBody> {
    if source.is_iterator() || destination.is_iterator() {
        error!(relationship = %def, "standard relationship cannot connect iterator nodes");
        return None;
    }

    match evaluate_properties(&def.schema, doc, None) {
        Ok(properties) => Some(RelationshipBody::Standard(properties)),
        Err(missing) => {
            debug!(relationship = %def, property = missing, "document is missing required relationship property");
            None
        }
    }
}

fn compile_iterator(
    def: &RelationshipDef,
    doc: &Value,
    source: &CompiledNode,
    destination: &CompiledNode,
) -> Option<RelationshipBody> {
    let iterator_node = match (source.is_iterator(), destination.is_iterator()) {
        (true, false) => source,
        (false, true) => destination,
        (false, false) => {
            error!(relationship = %def, "iterator relationship has no iterator endpoint");
            return None;
        }
        (true, true) => {
            error!(relationship = %def, "iterator relationship with two iterator endpoints is unsupported");
            return None;
        }
    };

    let node_instances = iterator_node.instances();
    if node_instances.is_empty() {
        debug!(relationship = %def, node = %iterator_node.id, "iterator endpoint has no instances");
        return None;
    }

    let mut instances = Vec::with_capacity(node_instances.len());
    for (index, node_instance) in node_instances.iter().enumerate() {
        match evaluate_properties(&def.schema, doc, Some(&node_instance.element)) {
            Ok(properties) => instances.push(RelationshipInstance { properties }),
            Err(missing) => {
                debug!(
                    relationship = %def,
                    index,
                    property = missing,
                    "iterator relationship instance is missing required property"
                );
                return None;
            }
        }
    }

    Some(RelationshipBody::Iterator(instances))
}
