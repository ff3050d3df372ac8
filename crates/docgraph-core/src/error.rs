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

//! Error types for mapping loading and document sources.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading or validating a mapping.
///
/// Every variant is a configuration error: the mapping is rejected as a
/// whole and no document is ever compiled against it.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("failed to read mapping '{path}': {message}")]
    Io {
        /// Path of the mapping file.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// The mapping is not valid YAML or does not match the mapping schema.
    #[error("failed to parse mapping: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two node definitions share the same identifier.
    #[error("duplicate node id '{0}'")]
    DuplicateNodeId(String),

    /// A node definition declares no labels.
    #[error("node '{0}' declares no labels")]
    MissingLabels(String),

    /// An iterator node has no `iteratorPath`.
    #[error("iterator node '{0}' has no iteratorPath")]
    MissingIteratorPath(String),

    /// A relationship references a node id that no node definition declares.
    #[error("relationship {relationship} references unknown node '{node_id}'")]
    UnknownNodeReference {
        /// Description of the offending relationship.
        relationship: String,
        /// The node id that could not be resolved.
        node_id: String,
    },

    /// An iterator relationship must have exactly one iterator endpoint.
    #[error("iterator relationship {relationship} has {count} iterator endpoints, expected exactly 1")]
    IteratorEndpoints {
        /// Description of the offending relationship.
        relationship: String,
        /// Number of iterator-typed endpoints found.
        count: usize,
    },

    /// A standard relationship references an iterator node.
    #[error("standard relationship {relationship} references iterator node '{node_id}'")]
    IteratorEndpointOnStandard {
        /// Description of the offending relationship.
        relationship: String,
        /// The iterator node id.
        node_id: String,
    },

    /// A unique or required property is not declared under `properties`.
    #[error("{owner} lists {list} property '{property}' that is not declared in properties")]
    UndeclaredProperty {
        /// Node id or relationship description.
        owner: String,
        /// Which list referenced the property (`unique` or `required`).
        list: &'static str,
        /// The undeclared property name.
        property: String,
    },

    /// A unique label is not part of the node's labels.
    #[error("node '{node}' lists unique label '{label}' that is not one of its labels")]
    UndeclaredUniqueLabel {
        /// The node id.
        node: String,
        /// The undeclared label.
        label: String,
    },

    /// The `ITER!` sentinel was used where no array element is bound.
    #[error("{owner} binds property '{property}' to ITER! outside of an iterator")]
    MisplacedIteratorSentinel {
        /// Node id or relationship description.
        owner: String,
        /// The property name.
        property: String,
    },
}

/// Error raised by a document source.
///
/// Source errors are unrecoverable for the run; an empty batch is not an
/// error and is reported as `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The configured index does not exist.
    #[error("index '{0}' does not exist")]
    IndexNotFound(String),

    /// The source did not return a continuation cursor.
    #[error("source did not return a scroll id for index '{0}'")]
    MissingCursor(String),

    /// Transport-level failure talking to the source.
    #[error("source transport error: {0}")]
    Transport(String),

    /// The source returned a response that could not be interpreted.
    #[error("malformed source response: {0}")]
    Malformed(String),

    /// A document file could not be read.
    #[error("failed to read documents from '{path}': {message}")]
    Io {
        /// Path of the document file.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// A document could not be parsed as JSON.
    #[error("invalid JSON document at line {line}: {message}")]
    Json {
        /// 1-based line of the offending document.
        line: usize,
        /// The parser message.
        message: String,
    },
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
