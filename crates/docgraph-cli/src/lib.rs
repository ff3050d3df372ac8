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


//! DocGraph CLI library.
//!
//! The `docgraph` binary reads documents from an Elasticsearch index,
//! compiles them into nodes and relationships with a YAML mapping, and
//! writes the graph to Neo4j.
//!
//! # Modes
//!
//! - default: poll the index forever, sleeping `sleepMin` minutes whenever
//!   it has nothing new
//! - `-e`: stop at the first empty batch
//! - `-o`: process a single batch
//! - `-n`: print the Cypher script to stdout instead of executing it
//! - `--input FILE`: read documents from a local JSON or JSON Lines file
//!
//! Ctrl-C stops the run between documents; the current batch is discarded
//! and the database connection is closed.
//!
//! # Example
//!
//! ```no_run
//! use docgraph_cli::run::{run, RunOptions};
//! use docgraph_neo4j::StatementConfig;
//!
//! # fn main() -> Result<(), docgraph_cli::error::CliError> {
//! let report = run(&RunOptions {
//!     mapping: "mapping.yaml".into(),
//!     config: "config.yaml".into(),
//!     input: Some("docs.jsonl".into()),
//!     execute: false,
//!     once: false,
//!     end_after_empty: true,
//!     statements: StatementConfig::default(),
//! })?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod run;
