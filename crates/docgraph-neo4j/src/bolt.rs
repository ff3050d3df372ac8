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

//! Bolt-backed sink.

use neo4rs::{ConfigBuilder, Graph, Query};
use std::fmt;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::cypher::CypherStatement;
use crate::error::{Neo4jError, Result};
use crate::sink::GraphSink;

/// Executes statements against a Neo4j server, one at a time.
///
/// The sink owns a single-threaded runtime and blocks on each statement,
/// so it must not be used from inside another async runtime.
pub struct Neo4jSink {
    graph: Option<Graph>,
    runtime: Runtime,
    uri: String,
}

impl Neo4jSink {
    /// Connect using `config`.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Neo4jError::Runtime(e.to_string()))?;

        let connection_error = |message: String| Neo4jError::Connection {
            uri: config.uri.clone(),
            message,
        };

        let bolt = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .build()
            .map_err(|e| connection_error(e.to_string()))?;

        let graph = {
            let _guard = runtime.enter();
            Graph::connect(bolt).map_err(|e| connection_error(e.to_string()))?
        };

        info!(uri = %config.uri, user = %config.user, "connected to Neo4j");
        Ok(Self {
            graph: Some(graph),
            runtime,
            uri: config.uri.clone(),
        })
    }

    /// The server URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// True until [`GraphSink::close`] is called.
    pub fn is_open(&self) -> bool {
        self.graph.is_some()
    }
}

impl GraphSink for Neo4jSink {
    fn execute(&mut self, statement: &CypherStatement) -> Result<()> {
        let graph = self.graph.as_ref().ok_or(Neo4jError::Closed)?;
        debug!(statement = %statement.query, "executing statement");
        self.runtime
            .block_on(graph.run(Query::new(statement.query.clone())))
            .map_err(|e| Neo4jError::Execution {
                statement: statement.query.clone(),
                message: e.to_string(),
            })
    }

    fn close(&mut self) -> Result<()> {
        if self.graph.take().is_some() {
            info!(uri = %self.uri, "closed Neo4j connection");
        }
        Ok(())
    }
}

impl fmt::Debug for Neo4jSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jSink")
            .field("uri", &self.uri)
            .field("open", &self.is_open())
            .finish()
    }
}
