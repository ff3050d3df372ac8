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

//! Cypher generation and Neo4j execution for compiled documents.
//!
//! This crate turns the nodes and relationships produced by
//! `docgraph-core` into idempotent Cypher statements and runs them:
//!
//! - [`StatementGenerator`] picks `MERGE` or `CREATE` per element and
//!   keeps non-identity properties and labels in `SET` clauses
//! - [`GraphSink`] executes statements one at a time; [`Neo4jSink`] talks
//!   Bolt, [`WriterSink`] writes a script for dry runs
//! - [`GraphBuilder`] drives a batch through a sink and reports counts
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docgraph_core::{CancellationToken, Mapping, Pipeline, RawDocument};
//! use docgraph_neo4j::{GraphBuilder, StatementConfig, WriterSink};
//! use serde_json::json;
//!
//! let mapping = Mapping::from_yaml_str(r#"
//! index: people
//! nodes:
//!   - id: p
//!     nodeType: standard
//!     labels: [Person]
//!     required: true
//!     properties:
//!       email: {key: email, type: string}
//!     uniqueProperties: [email]
//! relationships: []
//! "#).unwrap();
//!
//! let pipeline = Pipeline::new(Arc::new(mapping));
//! let batch = pipeline.compile_batch(
//!     vec![RawDocument::new(json!({"email": "x@y.com"}))],
//!     &CancellationToken::new(),
//! );
//!
//! let mut builder = GraphBuilder::new(WriterSink::new(Vec::new()), StatementConfig::default());
//! let report = builder.build(&batch);
//! assert_eq!(report.node_statements, 1);
//!
//! let script = String::from_utf8(builder.into_sink().into_inner().unwrap()).unwrap();
//! assert_eq!(script, "MERGE (n:Person {email: \"x@y.com\"});\n");
//! ```
//!
//! # Literal escaping
//!
//! Text and datetime literals are inlined verbatim unless
//! [`StatementConfig::escape_literals`] is set. Labels, relationship types
//! and property keys are always escaped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bolt;
pub mod builder;
pub mod config;
pub mod cypher;
pub mod error;
pub mod generator;
pub mod sink;

pub use bolt::Neo4jSink;
pub use builder::{BatchReport, GraphBuilder};
pub use config::{ConnectionConfig, StatementConfig, StatementConfigBuilder};
pub use cypher::{CypherScript, CypherStatement, StatementType};
pub use error::{Neo4jError, Result};
pub use generator::StatementGenerator;
pub use sink::{GraphSink, WriterSink};
