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

//! Document pipeline.
//!
//! Per document the stages run in a fixed order:
//!
//! ```text
//! pre hooks -> node compile -> post-node hooks
//!           -> relationship compile -> post-relationship hooks -> accumulate
//! ```
//!
//! A document is all or nothing: if a required node or relationship cannot
//! be produced, the document contributes nothing to the batch.

use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::compile::{compile_node, compile_relationship};
use crate::graph::{CompiledNode, CompiledRelationship};
use crate::hooks::HookRegistry;
use crate::mapping::Mapping;
use crate::source::RawDocument;

/// Shared interrupt flag.
///
/// Clones observe the same flag. The pipeline checks it between documents;
/// callers check it between batches.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once [`CancellationToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a document was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRejection {
    /// A required node could not be produced.
    RequiredNode {
        /// The node definition id.
        node_id: String,
    },
    /// A required relationship could not be produced.
    RequiredRelationship {
        /// Description of the relationship definition.
        relationship: String,
    },
}

impl fmt::Display for DocumentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRejection::RequiredNode { node_id } => {
                write!(f, "required node '{}' is invalid", node_id)
            }
            DocumentRejection::RequiredRelationship { relationship } => {
                write!(f, "required relationship {} is invalid", relationship)
            }
        }
    }
}

/// Nodes and relationships compiled from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledDocument {
    /// Compiled nodes, after post-node hooks.
    pub nodes: Vec<CompiledNode>,
    /// Compiled relationships, after post-relationship hooks.
    pub relationships: Vec<CompiledRelationship>,
}

/// Everything compiled from one batch of documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledBatch {
    /// Nodes of every accepted document, in document order.
    pub nodes: Vec<CompiledNode>,
    /// Relationships of every accepted document, in document order.
    pub relationships: Vec<CompiledRelationship>,
    /// Number of documents received.
    pub documents: usize,
    /// Number of documents dropped by validation.
    pub dropped: usize,
    /// True if compilation stopped on cancellation. A cancelled batch
    /// carries no nodes or relationships.
    pub cancelled: bool,
}

impl CompiledBatch {
    /// True if there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

/// Compiles documents against a mapping, running hooks between stages.
pub struct Pipeline {
    mapping: Arc<Mapping>,
    hooks: HookRegistry,
}

impl Pipeline {
    /// Create a pipeline with no hooks.
    pub fn new(mapping: Arc<Mapping>) -> Self {
        Self::with_hooks(mapping, HookRegistry::new())
    }

    /// Create a pipeline with the given hooks.
    pub fn with_hooks(mapping: Arc<Mapping>, hooks: HookRegistry) -> Self {
        Self { mapping, hooks }
    }

    /// The mapping documents are compiled against.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// The registered hooks.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Compile every node definition in mapping order.
    ///
    /// Stops at the first required node that cannot be produced.
    pub fn compile_nodes(&self, doc: &Value) -> Result<Vec<CompiledNode>, DocumentRejection> {
        let mut nodes = Vec::with_capacity(self.mapping.nodes.len());
        for def in &self.mapping.nodes {
            match compile_node(def, doc) {
                Some(node) => nodes.push(node),
                None if def.required => {
                    return Err(DocumentRejection::RequiredNode {
                        node_id: def.id.clone(),
                    })
                }
                None => debug!(node = %def.id, "skipping optional node"),
            }
        }
        Ok(nodes)
    }

    /// Compile every relationship definition in mapping order against
    /// `nodes`.
    ///
    /// Stops at the first required relationship that cannot be produced.
    pub fn compile_relationships(
        &self,
        doc: &Value,
        nodes: &[CompiledNode],
    ) -> Result<Vec<CompiledRelationship>, DocumentRejection> {
        let mut relationships = Vec::with_capacity(self.mapping.relationships.len());
        for def in &self.mapping.relationships {
            match compile_relationship(def, doc, nodes) {
                Some(rel) => relationships.push(rel),
                None if def.required => {
                    return Err(DocumentRejection::RequiredRelationship {
                        relationship: def.to_string(),
                    })
                }
                None => debug!(relationship = %def, "skipping optional relationship"),
            }
        }
        Ok(relationships)
    }

    /// Run every stage for one document.
    pub fn compile_document(&self, doc: Value) -> Result<CompiledDocument, DocumentRejection> {
        let doc = self.hooks.apply_pre(doc);
        let nodes = self.hooks.apply_post_node(self.compile_nodes(&doc)?);
        let relationships = self
            .hooks
            .apply_post_relationship(self.compile_relationships(&doc, &nodes)?);
        Ok(CompiledDocument {
            nodes,
            relationships,
        })
    }

    /// Compile a batch, accumulating accepted documents in order.
    ///
    /// The token is checked before every document. On cancellation the
    /// partially compiled batch is discarded so nothing of it is written.
    pub fn compile_batch(
        &self,
        documents: Vec<RawDocument>,
        cancel: &CancellationToken,
    ) -> CompiledBatch {
        let mut batch = CompiledBatch {
            documents: documents.len(),
            ..CompiledBatch::default()
        };

        for (position, document) in documents.into_iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(position, "cancelled while compiling batch, discarding it");
                return CompiledBatch {
                    documents: batch.documents,
                    cancelled: true,
                    ..CompiledBatch::default()
                };
            }

            let id = document.display_id(position);
            match self.compile_document(document.body) {
                Ok(compiled) => {
                    debug!(
                        document = %id,
                        nodes = compiled.nodes.len(),
                        relationships = compiled.relationships.len(),
                        "compiled document"
                    );
                    batch.nodes.extend(compiled.nodes);
                    batch.relationships.extend(compiled.relationships);
                }
                Err(rejection) => {
                    info!(document = %id, reason = %rejection, "dropping document");
                    batch.dropped += 1;
                }
            }
        }

        batch
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("index", &self.mapping.index)
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeBody;
    use serde_json::json;

    fn pipeline() -> Pipeline {
        let mapping = Mapping::from_yaml_str(docgraph_test::mappings::PEOPLE).unwrap();
        Pipeline::new(Arc::new(mapping))
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_compile_document_end_to_end() {
        let compiled = pipeline()
            .compile_document(docgraph_test::documents::friends())
            .unwrap();
        assert_eq!(compiled.nodes.len(), 2);
        assert_eq!(compiled.relationships.len(), 1);
        assert_eq!(compiled.relationships[0].rel_type, "KNOWS");
    }

    #[test]
    fn test_missing_required_node_drops_document() {
        let result = pipeline().compile_document(json!({"b": "y@z.com"}));
        assert_eq!(
            result,
            Err(DocumentRejection::RequiredNode {
                node_id: "a".to_string()
            })
        );
    }

    #[test]
    fn test_hooks_run_between_stages() {
        let mut pipeline = pipeline();
        pipeline
            .hooks_mut()
            .register_pre(|mut doc: Value| {
                doc["b"] = json!("hook@z.com");
                doc
            })
            .register_post_relationship(|_: Vec<CompiledRelationship>| Vec::new());

        let compiled = pipeline.compile_document(json!({"a": "x@y.com"})).unwrap();
        assert_eq!(compiled.nodes.len(), 2);
        assert!(compiled.relationships.is_empty());
        match &compiled.nodes[1].body {
            NodeBody::Standard(props) => {
                assert_eq!(props.properties["email"].as_str(), Some("hook@z.com"))
            }
            other => panic!("expected standard node, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_batch_counts_dropped_documents() {
        let documents = vec![
            RawDocument::new(docgraph_test::documents::friends()),
            RawDocument::with_id("bad", json!({})),
            RawDocument::new(docgraph_test::documents::friends()),
        ];
        let batch = pipeline().compile_batch(documents, &CancellationToken::new());
        assert_eq!(batch.documents, 3);
        assert_eq!(batch.dropped, 1);
        assert_eq!(batch.nodes.len(), 4);
        assert_eq!(batch.relationships.len(), 2);
        assert!(!batch.cancelled);
    }

    #[test]
    fn test_cancelled_batch_is_discarded() {
        let token = CancellationToken::new();
        token.cancel();
        let batch = pipeline().compile_batch(
            vec![RawDocument::new(docgraph_test::documents::friends())],
            &token,
        );
        assert!(batch.cancelled);
        assert!(batch.is_empty());
        assert_eq!(batch.documents, 1);
    }
}
