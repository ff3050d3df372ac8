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

//! Document source contract and a file-backed source.

use serde_json::Value;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SourceError;

/// One raw document as delivered by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Identity of the document in its store, used for logging.
    pub id: Option<String>,
    /// The nested record compiled against the mapping.
    pub body: Value,
}

impl RawDocument {
    /// A document without a known identity.
    pub fn new(body: Value) -> Self {
        Self { id: None, body }
    }

    /// A document with a known identity.
    pub fn with_id(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: Some(id.into()),
            body,
        }
    }

    /// Build a document from a search hit.
    ///
    /// A hit carrying `_source` is unwrapped and its `_id` kept as identity;
    /// anything else is taken as the document body itself.
    pub fn from_hit(mut hit: Value) -> Self {
        let source = hit.as_object_mut().and_then(|obj| {
            let source = obj.remove("_source")?;
            let id = obj.get("_id").map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
            Some((id, source))
        });

        match source {
            Some((id, body)) => Self { id, body },
            None => Self::new(hit),
        }
    }

    /// The identity to log: the document id, or its position in the batch.
    pub fn display_id(&self, position: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{}", position),
        }
    }
}

/// A supplier of ordered document batches.
///
/// An empty batch means the source is caught up, not that it failed.
pub trait DocumentSource {
    /// Fetch the next batch.
    fn next_batch(&mut self) -> Result<Vec<RawDocument>, SourceError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn next_batch(&mut self) -> Result<Vec<RawDocument>, SourceError> {
        (**self).next_batch()
    }
}

/// Serves documents from a JSON array or JSON Lines file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    batch_size: usize,
    pending: VecDeque<RawDocument>,
}

impl FileSource {
    /// Read every document of `path` up front.
    ///
    /// A file whose first non-blank character is `[` is read as one JSON
    /// array; anything else as one JSON document per non-blank line.
    pub fn open<P: AsRef<Path>>(path: P, batch_size: usize) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|e| SourceError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let pending = parse_documents(&text)?;
        debug!(path = %path.display(), documents = pending.len(), "loaded document file");
        Ok(Self {
            path,
            batch_size: batch_size.max(1),
            pending,
        })
    }

    /// Path the documents were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Documents not yet served.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl DocumentSource for FileSource {
    fn next_batch(&mut self) -> Result<Vec<RawDocument>, SourceError> {
        let take = self.batch_size.min(self.pending.len());
        Ok(self.pending.drain(..take).collect())
    }
}

fn parse_documents(text: &str) -> Result<VecDeque<RawDocument>, SourceError> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(text).map_err(|e| SourceError::Json {
            line: e.line(),
            message: e.to_string(),
        })?;
        return Ok(values.into_iter().map(RawDocument::from_hit).collect());
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map(RawDocument::from_hit)
                .map_err(|e| SourceError::Json {
                    line: index + 1,
                    message: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_hit_unwraps_source() {
        let doc = RawDocument::from_hit(json!({"_id": "42", "_source": {"a": 1}}));
        assert_eq!(doc.id.as_deref(), Some("42"));
        assert_eq!(doc.body, json!({"a": 1}));
    }

    #[test]
    fn test_from_hit_plain_document() {
        let doc = RawDocument::from_hit(json!({"a": 1}));
        assert_eq!(doc.id, None);
        assert_eq!(doc.body, json!({"a": 1}));
        assert_eq!(doc.display_id(3), "#3");
    }

    #[test]
    fn test_file_source_json_lines_in_batches() {
        let file = write("{\"a\": 1}\n\n{\"a\": 2}\n{\"a\": 3}\n");
        let mut source = FileSource::open(file.path(), 2).unwrap();
        assert_eq!(source.remaining(), 3);

        let first = source.next_batch().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].body, json!({"a": 2}));
        assert_eq!(source.next_batch().unwrap().len(), 1);
        assert!(source.next_batch().unwrap().is_empty());
    }

    #[test]
    fn test_file_source_json_array() {
        let file = write(r#"[{"_id": "x", "_source": {"a": 1}}, {"a": 2}]"#);
        let mut source = FileSource::open(file.path(), 10).unwrap();
        let batch = source.next_batch().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id.as_deref(), Some("x"));
    }

    #[test]
    fn test_file_source_reports_bad_line() {
        let file = write("{\"a\": 1}\nnot json\n");
        let err = FileSource::open(file.path(), 10).unwrap_err();
        assert!(matches!(err, SourceError::Json { line: 2, .. }));
    }

    #[test]
    fn test_file_source_missing_file() {
        let err = FileSource::open("/no/such/file.jsonl", 10).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
