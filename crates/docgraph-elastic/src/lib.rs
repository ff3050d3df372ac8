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

//! Elasticsearch scroll source.
//!
//! [`ElasticScroller`] pages through an index with the scroll API and
//! serves each page as a batch of [`RawDocument`]s. The first call checks
//! that the index exists and opens the scroll; later calls continue it.
//! An empty page means the scroller has caught up; calling again later
//! picks up documents indexed since.
//!
//! ```no_run
//! use docgraph_core::DocumentSource;
//! use docgraph_elastic::{ElasticScroller, ScrollConfig};
//!
//! let config = ScrollConfig::new("http://localhost:9200", "articles")
//!     .with_size(500)
//!     .with_basic_auth("elastic", "changeme");
//! let mut scroller = ElasticScroller::new(config);
//! let batch = scroller.next_batch()?;
//! println!("{} documents", batch.len());
//! # Ok::<(), docgraph_core::SourceError>(())
//! ```

#![deny(missing_docs)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use docgraph_core::{DocumentSource, RawDocument, SourceError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

/// How long the server keeps a scroll context alive between pages.
pub const SCROLL_KEEP_ALIVE: &str = "2m";

/// Default number of hits per page.
pub const DEFAULT_SCROLL_SIZE: usize = 1000;

/// Connection and query settings for a scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Base URL, e.g. `http://localhost:9200`.
    pub base_url: String,
    /// Index to scroll.
    pub index: String,
    /// Optional document type within the index.
    pub doc_type: Option<String>,
    /// Hits per page.
    pub size: usize,
    /// Basic auth credentials.
    pub basic_auth: Option<(String, String)>,
    /// Request timeout.
    pub timeout: Duration,
    /// Search body sent with the first request; `{}` matches everything.
    pub body: Value,
}

impl ScrollConfig {
    /// Settings for scrolling `index` at `base_url` with defaults.
    pub fn new(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index: index.into(),
            doc_type: None,
            size: DEFAULT_SCROLL_SIZE,
            basic_auth: None,
            timeout: Duration::from_secs(1000),
            body: json!({}),
        }
    }

    /// Build the base URL as `{protocol}://{host}:{port}`.
    pub fn base_url_from_parts(protocol: &str, host: &str, port: u16) -> String {
        format!("{}://{}:{}", protocol, host, port)
    }

    /// Scope the search to a document type.
    pub fn with_doc_type(mut self, doc_type: Option<String>) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// Set the page size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Authenticate with HTTP basic auth.
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((user.into(), password.into()));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a more targeted search body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    fn search_url(&self) -> String {
        let scope = match &self.doc_type {
            Some(doc_type) => format!("{}/{}", self.index, doc_type),
            None => self.index.clone(),
        };
        format!(
            "{}/{}/_search?scroll={}&size={}",
            self.base_url, scope, SCROLL_KEEP_ALIVE, self.size
        )
    }

    fn scroll_url(&self) -> String {
        format!("{}/_search/scroll", self.base_url)
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }
}

/// Pages through an index with the scroll API.
#[derive(Debug)]
pub struct ElasticScroller {
    agent: ureq::Agent,
    config: ScrollConfig,
    authorization: Option<String>,
    scroll_id: Option<String>,
}

impl ElasticScroller {
    /// Create a scroller; no request is made until the first batch.
    pub fn new(config: ScrollConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        let authorization = config
            .basic_auth
            .as_ref()
            .map(|(user, password)| format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password))));
        Self {
            agent,
            config,
            authorization,
            scroll_id: None,
        }
    }

    /// The scroll settings.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// The current scroll id, once a scroll is open.
    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref()
    }

    fn check_index(&self) -> Result<(), SourceError> {
        let request = self.authorize(self.agent.head(&self.config.index_url()));
        match request.call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => {
                error!(index = %self.config.index, "index does not exist");
                Err(SourceError::IndexNotFound(self.config.index.clone()))
            }
            Err(e) => Err(transport(e)),
        }
    }

    fn open_scroll(&self) -> Result<Value, SourceError> {
        self.check_index()?;
        info!(index = %self.config.index, size = self.config.size, "opening scroll");
        let request = self.authorize(self.agent.post(&self.config.search_url()));
        read_json(request.send_json(&self.config.body))
    }

    fn continue_scroll(&self, scroll_id: &str) -> Result<Value, SourceError> {
        let request = self.authorize(self.agent.post(&self.config.scroll_url()));
        read_json(request.send_json(json!({
            "scroll": SCROLL_KEEP_ALIVE,
            "scroll_id": scroll_id,
        })))
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.authorization {
            Some(value) => request.set("Authorization", value),
            None => request,
        }
    }
}

impl DocumentSource for ElasticScroller {
    fn next_batch(&mut self) -> Result<Vec<RawDocument>, SourceError> {
        let response = match &self.scroll_id {
            Some(id) => self.continue_scroll(id)?,
            None => self.open_scroll()?,
        };

        match parse_scroll_response(&self.config.index, response) {
            Ok((scroll_id, documents)) => {
                debug!(index = %self.config.index, hits = documents.len(), "scroll page received");
                self.scroll_id = Some(scroll_id);
                Ok(documents)
            }
            Err(e) => {
                error!(index = %self.config.index, error = %e, "scroll response rejected");
                self.scroll_id = None;
                Err(e)
            }
        }
    }
}

/// Split a scroll response into its scroll id and documents.
///
/// A response without `_scroll_id` is an error; so is one whose
/// `hits.hits` is not an array.
pub fn parse_scroll_response(
    index: &str,
    mut response: Value,
) -> Result<(String, Vec<RawDocument>), SourceError> {
    let scroll_id = match response.get("_scroll_id") {
        Some(Value::String(id)) => id.clone(),
        _ => return Err(SourceError::MissingCursor(index.to_string())),
    };

    match response.pointer_mut("/hits/hits").map(Value::take) {
        Some(Value::Array(hits)) => Ok((
            scroll_id,
            hits.into_iter().map(RawDocument::from_hit).collect(),
        )),
        _ => Err(SourceError::Malformed(
            "response has no hits.hits array".to_string(),
        )),
    }
}

fn read_json(result: Result<ureq::Response, ureq::Error>) -> Result<Value, SourceError> {
    let response = result.map_err(transport)?;
    response
        .into_json()
        .map_err(|e| SourceError::Malformed(e.to_string()))
}

fn transport(error: ureq::Error) -> SourceError {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            SourceError::Transport(format!("HTTP {}: {}", code, body))
        }
        ureq::Error::Transport(t) => SourceError::Transport(t.to_string()),
    }
}
