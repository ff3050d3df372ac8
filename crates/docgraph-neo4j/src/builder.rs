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

//! Batch driver: generate the statements of a compiled batch and run them
//! through a sink.

use docgraph_core::CompiledBatch;
use std::fmt;
use tracing::{debug, error, info};

use crate::config::StatementConfig;
use crate::cypher::{CypherScript, CypherStatement};
use crate::error::Result;
use crate::generator::StatementGenerator;
use crate::sink::GraphSink;

/// Counts for one processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents received.
    pub documents: usize,
    /// Documents dropped by validation.
    pub dropped: usize,
    /// Node statements generated.
    pub node_statements: usize,
    /// Relationship statements generated.
    pub relationship_statements: usize,
    /// Statements the sink rejected.
    pub failed: usize,
}

impl BatchReport {
    /// Statements generated.
    pub fn statements(&self) -> usize {
        self.node_statements + self.relationship_statements
    }

    /// Statements the sink accepted.
    pub fn succeeded(&self) -> usize {
        self.statements() - self.failed
    }

    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: &BatchReport) {
        self.documents += other.documents;
        self.dropped += other.dropped;
        self.node_statements += other.node_statements;
        self.relationship_statements += other.relationship_statements;
        self.failed += other.failed;
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents ({} dropped), {} node and {} relationship statements, {} failed",
            self.documents,
            self.dropped,
            self.node_statements,
            self.relationship_statements,
            self.failed
        )
    }
}

/// Owns the sink for a run and writes compiled batches through it.
#[derive(Debug)]
pub struct GraphBuilder<S: GraphSink> {
    generator: StatementGenerator,
    sink: S,
}

impl<S: GraphSink> GraphBuilder<S> {
    /// Create a builder writing through `sink`.
    pub fn new(sink: S, config: StatementConfig) -> Self {
        Self {
            generator: StatementGenerator::new(config),
            sink,
        }
    }

    /// Generate the script of a batch without executing it.
    pub fn generate(&self, batch: &CompiledBatch) -> CypherScript {
        self.generator.generate(&batch.nodes, &batch.relationships)
    }

    /// Generate and execute a batch.
    ///
    /// Statements run in order, nodes first. A failing statement is logged
    /// and counted; the remaining statements still run and earlier ones are
    /// not undone.
    pub fn build(&mut self, batch: &CompiledBatch) -> BatchReport {
        let script = self.generate(batch);
        let mut report = BatchReport {
            documents: batch.documents,
            dropped: batch.dropped,
            node_statements: script.node_count(),
            relationship_statements: script.relationship_count(),
            failed: 0,
        };

        info!(
            nodes = report.node_statements,
            relationships = report.relationship_statements,
            "executing statements"
        );
        for statement in &script {
            if let Err(e) = self.execute(statement) {
                error!(error = %e, "statement failed");
                report.failed += 1;
            }
        }

        info!(report = %report, "batch complete");
        report
    }

    fn execute(&mut self, statement: &CypherStatement) -> Result<()> {
        debug!(statement = %statement.query, "executing");
        self.sink.execute(statement)
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Close the sink.
    pub fn close(&mut self) -> Result<()> {
        self.sink.close()
    }

    /// Take the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
