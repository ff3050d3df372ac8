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

//! Statement generation over the shared fixtures.

use std::sync::Arc;

use docgraph_core::{CancellationToken, CompiledBatch, Mapping, Pipeline, RawDocument};
use docgraph_neo4j::{StatementConfig, StatementGenerator, StatementType};
use docgraph_test::{documents, mappings};
use serde_json::Value;

fn compile(mapping: &str, docs: Vec<Value>) -> CompiledBatch {
    let pipeline = Pipeline::new(Arc::new(Mapping::from_yaml_str(mapping).unwrap()));
    pipeline.compile_batch(
        docs.into_iter().map(RawDocument::new).collect(),
        &CancellationToken::new(),
    )
}

fn queries(mapping: &str, docs: Vec<Value>) -> Vec<String> {
    let batch = compile(mapping, docs);
    StatementGenerator::default()
        .generate(&batch.nodes, &batch.relationships)
        .into_iter()
        .map(|s| s.query)
        .collect()
}

#[test]
fn test_people_end_to_end() {
    let q = queries(mappings::PEOPLE, vec![documents::friends()]);
    assert_eq!(
        q,
        vec![
            "MERGE (n:Person {email: \"x@y.com\"})".to_string(),
            "MERGE (n:Person {email: \"y@z.com\"})".to_string(),
            "MATCH (s:Person), (d:Person) WHERE s.email = \"x@y.com\" AND d.email = \"y@z.com\" \
             MERGE (s)-[r:KNOWS]->(d)"
                .to_string(),
        ]
    );
}

#[test]
fn test_articles_end_to_end() {
    let q = queries(mappings::ARTICLES, vec![documents::article()]);
    assert_eq!(
        q[0],
        "MERGE (n:Article {id: 7}) SET n.title = \"Graphs\", \
         n.published = datetime(\"2021-03-04T05:06:07\"), n.ratings = [4, 5]"
    );
    assert_eq!(
        q[1],
        "MERGE (n:Person {handle: \"ada\"}) SET n.name = \"Ada\", n:Author"
    );
    assert_eq!(q[2], "MERGE (n:Tag {name: \"rust\"})");
    assert_eq!(q[4], "MERGE (n:Tag {name: \"neo4j\"})");
    assert_eq!(
        q[5],
        "MATCH (s:Article), (d:Person) WHERE s.id = 7 AND d.handle = \"ada\" \
         CREATE (s)<-[r:WROTE]-(d)"
    );
    assert_eq!(
        q[6],
        "MATCH (s:Article), (d:Tag) WHERE s.id = 7 AND d.name = \"rust\" \
         CREATE (s)-[r:TAGGED {tag: \"rust\", rank: 2}]->(d)"
    );
    assert_eq!(q.len(), 9);
}

#[test]
fn test_all_merge_script_is_stable_across_runs() {
    let first = queries(mappings::PEOPLE, vec![documents::friends()]);
    let second = queries(mappings::PEOPLE, vec![documents::friends(), documents::friends()]);
    assert_eq!(second.len(), 2 * first.len());
    assert_eq!(&second[..2], &first[..2]);
    assert_eq!(second[4], first[2]);

    let batch = compile(mappings::PEOPLE, vec![documents::friends()]);
    let script = StatementGenerator::default().generate(&batch.nodes, &batch.relationships);
    assert!(script.statements.iter().all(|s| s.statement_type.is_merge()));
}

#[test]
fn test_dropped_documents_emit_nothing() {
    let q = queries(mappings::PEOPLE, vec![serde_json::json!({"b": "y@z.com"})]);
    assert!(q.is_empty());
}

#[test]
fn test_comments_name_definitions() {
    let batch = compile(mappings::PEOPLE, vec![documents::friends()]);
    let script = StatementGenerator::new(StatementConfig::new().with_comments())
        .generate(&batch.nodes, &batch.relationships);
    let rendered = script.render(true);
    assert!(rendered.starts_with("// node a\nMERGE (n:Person"));
    assert!(rendered.contains("// relationship KNOWS(a->b)\nMATCH"));
    assert_eq!(script.statements_of_type(StatementType::MergeRelationship).len(), 1);
}
