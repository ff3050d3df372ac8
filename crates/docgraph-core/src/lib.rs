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

//! Mapping-driven compiler from nested documents to property-graph elements.
//!
//! A [`Mapping`] declares which nodes and relationships a document yields.
//! The [`Pipeline`] compiles each document of a batch into
//! [`CompiledNode`] and [`CompiledRelationship`] values, running the
//! registered hooks between stages and dropping any document whose
//! required elements cannot be produced.
//!
//! # Concepts
//!
//! | Mapping concept | Meaning |
//! |-----------------|---------|
//! | Standard node / relationship | At most one element per document |
//! | Iterator node / relationship | One element per entry of a document array |
//! | `ITER!` | Binds a property to the current array entry |
//! | `uniqueProperties` | Merge key; other properties are set after matching |
//! | `uniqueLabels` | Labels used when matching; others are set after matching |
//! | `requiredProperties` | Properties whose absence invalidates the element |
//! | `required` | An invalid element drops the whole document |
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docgraph_core::{Mapping, Pipeline};
//! use serde_json::json;
//!
//! let mapping = Mapping::from_yaml_str(r#"
//! index: people
//! nodes:
//!   - id: a
//!     nodeType: standard
//!     labels: [Person]
//!     required: true
//!     properties:
//!       email: {key: a, type: string}
//!     uniqueProperties: [email]
//!   - id: b
//!     nodeType: standard
//!     labels: [Person]
//!     required: true
//!     properties:
//!       email: {key: b, type: string}
//!     uniqueProperties: [email]
//! relationships:
//!   - type: KNOWS
//!     relationshipType: standard
//!     directionality: forward
//!     sourceNode: a
//!     destinationNode: b
//!     required: false
//! "#).unwrap();
//!
//! let pipeline = Pipeline::new(Arc::new(mapping));
//! let compiled = pipeline
//!     .compile_document(json!({"a": "x@y.com", "b": "y@z.com"}))
//!     .unwrap();
//! assert_eq!(compiled.nodes.len(), 2);
//! assert_eq!(compiled.relationships.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compile;
pub mod error;
pub mod graph;
pub mod hooks;
pub mod mapping;
pub mod path;
pub mod pipeline;
pub mod source;
pub mod value;

pub use compile::{compile_node, compile_relationship};
pub use error::{MappingError, Result, SourceError};
pub use graph::{
    CompiledNode, CompiledRelationship, NodeBody, NodeInstance, NodePattern, PropertyMap,
    PropertySet, RelationshipBody, RelationshipInstance,
};
pub use hooks::{HookRegistry, PostNodeProcessor, PostRelationshipProcessor, PreProcessor};
pub use mapping::{
    Directionality, Mapping, NodeDef, PropertyDef, PropertySchema, PropertyType,
    RelationshipDef, Shape, ITERATOR_SENTINEL,
};
pub use pipeline::{
    CancellationToken, CompiledBatch, CompiledDocument, DocumentRejection, Pipeline,
};
pub use source::{DocumentSource, FileSource, RawDocument};
pub use value::PropertyValue;
