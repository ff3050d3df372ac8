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

//! Compilation of documents into graph elements.
//!
//! The node compiler runs first over every node definition; the
//! relationship compiler then resolves endpoints against the nodes that
//! were produced for the same document. Neither compiler returns errors:
//! a definition that cannot be satisfied yields `None`, and the caller
//! decides whether that drops the document.

pub mod node;
pub mod relationship;

use serde_json::Value;

use crate::graph::PropertySet;
use crate::mapping::PropertySchema;
use crate::path;
use crate::value::PropertyValue;

pub use node::compile_node;
pub use relationship::compile_relationship;

/// Evaluate every declared property against `doc`.
///
/// Properties bound to `ITER!` read `element` instead of the document.
/// An explicit `null`, in the document or as the element, counts as
/// absent: it is never written and fails a required property.
/// Evaluation stops at the first absent required property, whose name is
/// returned as the error.
pub(crate) fn evaluate_properties<'s>(
    schema: &'s PropertySchema,
    doc: &Value,
    element: Option<&Value>,
) -> Result<PropertySet, &'s str> {
    let mut set = PropertySet::new();

    for (name, def) in &schema.properties {
        let raw = if def.is_element_bound() {
            element.filter(|v| !v.is_null())
        } else {
            path::resolve_present(&def.source_path, doc)
        };

        match raw {
            Some(value) => set.insert(
                name.clone(),
                PropertyValue::from_json(value, def.property_type),
                schema.is_unique(name),
            ),
            None if schema.is_required(name) => return Err(name.as_str()),
            None => {}
        }
    }

    Ok(set)
}
