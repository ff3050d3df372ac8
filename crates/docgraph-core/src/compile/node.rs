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

//! Node compilation.

use serde_json::Value;
use tracing::debug;

use super::evaluate_properties;
use crate::graph::{CompiledNode, NodeBody, NodeInstance};
use crate::mapping::{NodeDef, Shape};
use crate::path;

/// Compile one node definition against one document.
///
/// Returns `None` when the node cannot be produced: a standard node missing
/// a required property, or an iterator node whose array is absent, not an
/// array, or yields no valid instance. Inside an iterator node a missing
/// required property drops only that instance.
pub fn compile_node(def: &NodeDef, doc: &Value) -> Option<CompiledNode> {
    let body = match def.node_type {
        Shape::Standard => compile_standard(def, doc)?,
        Shape::Iterator => compile_iterator(def, doc)?,
    };

    Some(CompiledNode {
        id: def.id.clone(),
        labels: def.labels.clone(),
        unique_labels: def.unique_labels.clone(),
        body,
    })
}

fn compile_standard(def: &NodeDef, doc: &Value) -> Option<NodeBody> {
    match evaluate_properties(&def.schema, doc, None) {
        Ok(properties) => Some(NodeBody::Standard(properties)),
        Err(missing) => {
            debug!(node = %def.id, property = missing, "document is missing required node property");
            None
        }
    }
}

fn compile_iterator(def: &NodeDef, doc: &Value) -> Option<NodeBody> {
    let iterator_path = def.iterator_path.as_deref()?;

    let elements = match path::resolve(iterator_path, doc) {
        Some(Value::Array(elements)) => elements,
        Some(_) => {
            debug!(node = %def.id, path = iterator_path, "iterator path does not hold an array");
            return None;
        }
        None => {
            debug!(node = %def.id, path = iterator_path, "document is missing iterator path");
            return None;
        }
    };

    let instances: Vec<NodeInstance> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            match evaluate_properties(&def.schema, doc, Some(element)) {
                Ok(properties) => Some(NodeInstance {
                    labels: def.labels.clone(),
                    unique_labels: def.unique_labels.clone(),
                    properties,
                    element: element.clone(),
                }),
                Err(missing) => {
                    debug!(
                        node = %def.id,
                        index,
                        property = missing,
                        "dropping iterator instance missing required property"
                    );
                    None
                }
            }
        })
        .collect();

    if instances.is_empty() {
        None
    } else {
        Some(NodeBody::Iterator(instances))
    }
}
