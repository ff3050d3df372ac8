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

//! Error types for statement generation and execution.

use thiserror::Error;

/// Error type for Neo4j operations.
#[derive(Debug, Error)]
pub enum Neo4jError {
    /// Connection to the database could not be established.
    #[error("failed to connect to Neo4j at {uri}: {message}")]
    Connection {
        /// The Bolt URI.
        uri: String,
        /// The driver error message.
        message: String,
    },

    /// A statement was rejected by the database.
    #[error("statement failed: {message}\n  statement: {statement}")]
    Execution {
        /// The statement text.
        statement: String,
        /// The driver error message.
        message: String,
    },

    /// The sink was used after it was closed.
    #[error("sink is closed")]
    Closed,

    /// Writing a statement to an output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Runtime setup for the driver failed.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for Neo4j operations.
pub type Result<T> = std::result::Result<T, Neo4jError>;
