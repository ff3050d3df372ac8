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


//! Structured error types for the DocGraph CLI.

use std::io;
use std::path::PathBuf;

use docgraph_core::{MappingError, SourceError};
use docgraph_neo4j::Neo4jError;
use thiserror::Error;

/// Everything that can end a `docgraph` run early.
#[derive(Error, Debug)]
pub enum CliError {
    /// A file could not be read or created.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The run configuration file is not valid YAML or has the wrong shape.
    #[error("Config error in '{path}': {message}")]
    Config {
        /// The configuration file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The run configuration parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The mapping file failed to load or validate.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Reading documents failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Connecting to or closing the graph database failed.
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] Neo4jError),

    /// The logging subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// The signal handling runtime could not be started.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
