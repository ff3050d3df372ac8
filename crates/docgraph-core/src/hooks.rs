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

//! Pre- and post-processing hooks.
//!
//! Hooks are registered explicitly by the host application. Each stage
//! applies its hooks in registration order, every hook consuming and
//! returning the value of its stage; a stage with no hooks passes its
//! value through unchanged.
//!
//! Closures with the right signature implement the hook traits:
//!
//! ```
//! use docgraph_core::hooks::HookRegistry;
//! use serde_json::{json, Value};
//!
//! let mut hooks = HookRegistry::new();
//! hooks.register_pre(|mut doc: Value| {
//!     doc["seen"] = json!(true);
//!     doc
//! });
//! let doc = hooks.apply_pre(json!({"a": 1}));
//! assert_eq!(doc["seen"], json!(true));
//! ```

use serde_json::Value;
use std::fmt;

use crate::graph::{CompiledNode, CompiledRelationship};

/// Transforms a raw document before any node is compiled.
pub trait PreProcessor: Send + Sync {
    /// Return the document to compile in place of `doc`.
    fn pre_process_doc(&self, doc: Value) -> Value;
}

/// Transforms the nodes compiled for one document.
pub trait PostNodeProcessor: Send + Sync {
    /// Return the node list relationships will be compiled against.
    fn post_process_nodes(&self, nodes: Vec<CompiledNode>) -> Vec<CompiledNode>;
}

/// Transforms the relationships compiled for one document.
pub trait PostRelationshipProcessor: Send + Sync {
    /// Return the relationship list to accumulate for the batch.
    fn post_process_relationships(
        &self,
        relationships: Vec<CompiledRelationship>,
    ) -> Vec<CompiledRelationship>;
}

impl<F> PreProcessor for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn pre_process_doc(&self, doc: Value) -> Value {
        self(doc)
    }
}

impl<F> PostNodeProcessor for F
where
    F: Fn(Vec<CompiledNode>) -> Vec<CompiledNode> + Send + Sync,
{
    fn post_process_nodes(&self, nodes: Vec<CompiledNode>) -> Vec<CompiledNode> {
        self(nodes)
    }
}

impl<F> PostRelationshipProcessor for F
where
    F: Fn(Vec<CompiledRelationship>) -> Vec<CompiledRelationship> + Send + Sync,
{
    fn post_process_relationships(
        &self,
        relationships: Vec<CompiledRelationship>,
    ) -> Vec<CompiledRelationship> {
        self(relationships)
    }
}

/// Ordered hook lists for the three pipeline stages.
#[derive(Default)]
pub struct HookRegistry {
    pre: Vec<Box<dyn PreProcessor>>,
    post_node: Vec<Box<dyn PostNodeProcessor>>,
    post_relationship: Vec<Box<dyn PostRelationshipProcessor>>,
}

impl HookRegistry {
    /// Create a registry with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-processing hook.
    pub fn register_pre<H: PreProcessor + 'static>(&mut self, hook: H) -> &mut Self {
        self.pre.push(Box::new(hook));
        self
    }

    /// Append a post-node hook.
    pub fn register_post_node<H: PostNodeProcessor + 'static>(&mut self, hook: H) -> &mut Self {
        self.post_node.push(Box::new(hook));
        self
    }

    /// Append a post-relationship hook.
    pub fn register_post_relationship<H: PostRelationshipProcessor + 'static>(
        &mut self,
        hook: H,
    ) -> &mut Self {
        self.post_relationship.push(Box::new(hook));
        self
    }

    /// True if no stage has a hook.
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post_node.is_empty() && self.post_relationship.is_empty()
    }

    /// Run the pre-processing hooks.
    pub fn apply_pre(&self, doc: Value) -> Value {
        self.pre.iter().fold(doc, |doc, hook| hook.pre_process_doc(doc))
    }

    /// Run the post-node hooks.
    pub fn apply_post_node(&self, nodes: Vec<CompiledNode>) -> Vec<CompiledNode> {
        self.post_node
            .iter()
            .fold(nodes, |nodes, hook| hook.post_process_nodes(nodes))
    }

    /// Run the post-relationship hooks.
    pub fn apply_post_relationship(
        &self,
        relationships: Vec<CompiledRelationship>,
    ) -> Vec<CompiledRelationship> {
        self.post_relationship
            .iter()
            .fold(relationships, |rels, hook| hook.post_process_relationships(rels))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("pre", &self.pre.len())
            .field("post_node", &self.post_node.len())
            .field("post_relationship", &self.post_relationship.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeBody, PropertySet};
    use serde_json::json;

    fn node(id: &str) -> CompiledNode {
        CompiledNode {
            id: id.to_string(),
            labels: vec!["L".to_string()],
            unique_labels: None,
            body: NodeBody::Standard(PropertySet::new()),
        }
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let hooks = HookRegistry::new();
        assert!(hooks.is_empty());
        assert_eq!(hooks.apply_pre(json!({"a": 1})), json!({"a": 1}));
        assert_eq!(hooks.apply_post_node(vec![node("a")]), vec![node("a")]);
        assert!(hooks.apply_post_relationship(Vec::new()).is_empty());
    }

    #[test]
    fn test_hooks_apply_in_registration_order() {
        let mut hooks = HookRegistry::new();
        hooks
            .register_pre(|mut doc: Value| {
                doc["trail"] = json!(format!("{}1", doc["trail"].as_str().unwrap_or("")));
                doc
            })
            .register_pre(|mut doc: Value| {
                doc["trail"] = json!(format!("{}2", doc["trail"].as_str().unwrap_or("")));
                doc
            });

        assert_eq!(hooks.apply_pre(json!({}))["trail"], json!("12"));
    }

    #[test]
    fn test_post_node_hook_can_add_and_remove() {
        let mut hooks = HookRegistry::new();
        hooks.register_post_node(|mut nodes: Vec<CompiledNode>| {
            nodes.retain(|n| n.id != "drop");
            nodes.push(node("added"));
            nodes
        });

        let out = hooks.apply_post_node(vec![node("keep"), node("drop")]);
        let ids: Vec<&str> = out.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["keep", "added"]);
    }

    struct Counter;

    impl PostRelationshipProcessor for Counter {
        fn post_process_relationships(
            &self,
            relationships: Vec<CompiledRelationship>,
        ) -> Vec<CompiledRelationship> {
            relationships.into_iter().take(1).collect()
        }
    }

    #[test]
    fn test_trait_object_hook() {
        let mut hooks = HookRegistry::new();
        hooks.register_post_relationship(Counter);
        assert!(!hooks.is_empty());
        assert_eq!(
            format!("{:?}", hooks),
            "HookRegistry { pre: 0, post_node: 0, post_relationship: 1 }"
        );
    }
}
