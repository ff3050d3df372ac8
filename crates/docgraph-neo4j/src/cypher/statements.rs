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

//! Cypher statement types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of write a statement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    /// `MERGE` of a node.
    MergeNode,
    /// `CREATE` of a node.
    CreateNode,
    /// `MATCH ... MERGE` of a relationship.
    MergeRelationship,
    /// `MATCH ... CREATE` of a relationship.
    CreateRelationship,
}

impl StatementType {
    /// True for node statements.
    pub fn is_node(self) -> bool {
        matches!(self, StatementType::MergeNode | StatementType::CreateNode)
    }

    /// True for idempotent statements.
    pub fn is_merge(self) -> bool {
        matches!(
            self,
            StatementType::MergeNode | StatementType::MergeRelationship
        )
    }
}

/// A single Cypher statement with its literals inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The query text, without a trailing semicolon.
    pub query: String,
    /// Kind of statement.
    pub statement_type: StatementType,
    /// Optional comment naming what produced the statement.
    pub comment: Option<String>,
}

impl CypherStatement {
    /// Create a statement.
    pub fn new(query: impl Into<String>, statement_type: StatementType) -> Self {
        Self {
            query: query.into(),
            statement_type,
            comment: None,
        }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Render as a script line: optional `// comment` line, then the query
    /// terminated by `;`.
    pub fn format(&self, include_comment: bool) -> String {
        match (&self.comment, include_comment) {
            (Some(comment), true) => format!("// {}\n{};", comment, self.query),
            _ => format!("{};", self.query),
        }
    }
}

impl fmt::Display for CypherStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

/// An ordered list of statements: all node statements, then all
/// relationship statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherScript {
    /// The statements in execution order.
    pub statements: Vec<CypherStatement>,
}

impl CypherScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn add(&mut self, statement: CypherStatement) {
        self.statements.push(statement);
    }

    /// Append statements.
    pub fn extend(&mut self, statements: impl IntoIterator<Item = CypherStatement>) {
        self.statements.extend(statements);
    }

    /// Statements of one kind, in order.
    pub fn statements_of_type(&self, statement_type: StatementType) -> Vec<&CypherStatement> {
        self.statements
            .iter()
            .filter(|s| s.statement_type == statement_type)
            .collect()
    }

    /// Number of node statements.
    pub fn node_count(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| s.statement_type.is_node())
            .count()
    }

    /// Number of relationship statements.
    pub fn relationship_count(&self) -> usize {
        self.len() - self.node_count()
    }

    /// Render the script, one statement per line.
    pub fn render(&self, include_comments: bool) -> String {
        self.statements
            .iter()
            .map(|s| s.format(include_comments))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if there are no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl IntoIterator for CypherScript {
    type Item = CypherStatement;
    type IntoIter = std::vec::IntoIter<CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a CypherScript {
    type Item = &'a CypherStatement;
    type IntoIter = std::slice::Iter<'a, CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
