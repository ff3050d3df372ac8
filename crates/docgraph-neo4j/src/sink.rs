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

//! Statement sinks.

use std::io::Write;

use crate::cypher::CypherStatement;
use crate::error::{Neo4jError, Result};

/// Executes statements one at a time.
///
/// A failed statement does not undo earlier ones; callers decide whether
/// to continue.
pub trait GraphSink {
    /// Execute one statement.
    fn execute(&mut self, statement: &CypherStatement) -> Result<()>;

    /// Release the underlying connection. Further calls to
    /// [`GraphSink::execute`] fail with [`Neo4jError::Closed`].
    fn close(&mut self) -> Result<()>;
}

impl<S: GraphSink + ?Sized> GraphSink for Box<S> {
    fn execute(&mut self, statement: &CypherStatement) -> Result<()> {
        (**self).execute(statement)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Writes statements as a Cypher script instead of executing them.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: Option<W>,
    include_comments: bool,
    written: usize,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            include_comments: false,
            written: 0,
        }
    }

    /// Emit statement comments as `//` lines.
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    /// Number of statements written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer, if not yet closed.
    pub fn into_inner(mut self) -> Option<W> {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
        self.writer.take()
    }
}

impl<W: Write> GraphSink for WriterSink<W> {
    fn execute(&mut self, statement: &CypherStatement) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(Neo4jError::Closed)?;
        writeln!(writer, "{}", statement.format(self.include_comments))?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}
