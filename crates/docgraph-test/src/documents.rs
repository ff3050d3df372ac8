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

//! Document fixtures.

use serde_json::{json, Value};

/// A document for [`crate::mappings::PEOPLE`].
pub fn friends() -> Value {
    json!({"a": "x@y.com", "b": "y@z.com"})
}

/// A document for [`crate::mappings::ARTICLES`] with three tags.
pub fn article() -> Value {
    json!({
        "id": 7,
        "title": "Graphs",
        "author": {"name": "Ada", "handle": "ada"},
        "tags": ["rust", "graph", "neo4j"],
        "meta": {
            "published": "2021-03-04T05:06:07",
            "ratings": [4, 5],
            "rank": 2
        }
    })
}

/// An article without an author and without tags.
pub fn bare_article() -> Value {
    json!({"id": 8, "title": "Untitled"})
}

/// A document for [`crate::mappings::EMPLOYMENT`] naming an employer.
pub fn employee() -> Value {
    json!({"name": "Grace", "employer": "Navy"})
}

/// A document for [`crate::mappings::EMPLOYMENT`] without an employer.
pub fn unemployed() -> Value {
    json!({"name": "Alan"})
}

/// An Elasticsearch search hit wrapping `source`.
pub fn hit(id: &str, source: Value) -> Value {
    json!({"_index": "articles", "_id": id, "_score": 1.0, "_source": source})
}

/// An Elasticsearch scroll response page.
pub fn scroll_response(scroll_id: &str, hits: Vec<Value>) -> Value {
    json!({
        "_scroll_id": scroll_id,
        "took": 1,
        "timed_out": false,
        "hits": {"total": {"value": hits.len(), "relation": "eq"}, "hits": hits}
    })
}
