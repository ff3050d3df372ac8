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

//! Mapping fixtures.

/// Two `Person` nodes keyed by `email` and a `KNOWS` relationship between
/// them. Both nodes are required.
pub const PEOPLE: &str = r#"
index: people
docType: person
nodes:
  - id: a
    nodeType: standard
    labels: [Person]
    required: true
    properties:
      email: {key: a, type: string}
    uniqueProperties: [email]
    requiredProperties: [email]
  - id: b
    nodeType: standard
    labels: [Person]
    required: true
    properties:
      email: {key: b, type: string}
    uniqueProperties: [email]
    requiredProperties: [email]
relationships:
  - type: KNOWS
    relationshipType: standard
    directionality: forward
    sourceNode: a
    destinationNode: b
    required: false
    unique: true
"#;

/// Articles with an author and an iterator over tags.
///
/// Uses the short spellings (`key`, `iterator`, `sourceNode`, `<`) and
/// exercises unique labels, datetime and list properties, a backward
/// relationship and an iterator relationship.
pub const ARTICLES: &str = r#"
index: articles
nodes:
  - id: article
    nodeType: standard
    labels: [Article]
    required: true
    properties:
      id: {key: id, type: number}
      title: {key: title, type: string}
      published: {key: meta.published, type: datetime}
      ratings: {key: meta.ratings, type: list}
    uniqueProperties: [id]
    requiredProperties: [id]
  - id: author
    nodeType: standard
    labels: [Author, Person]
    uniqueLabels: [Person]
    required: false
    properties:
      name: {key: author.name, type: string}
      handle: {key: author.handle, type: string}
    uniqueProperties: [handle]
    requiredProperties: [handle]
  - id: tag
    nodeType: iterator
    iterator: tags
    labels: [Tag]
    required: false
    properties:
      name: {key: "ITER!", type: string}
    uniqueProperties: [name]
    requiredProperties: [name]
relationships:
  - type: WROTE
    relationshipType: standard
    directionality: "<"
    sourceNode: article
    destinationNode: author
    required: false
  - type: TAGGED
    relationshipType: iterator
    directionality: ">"
    sourceNode: article
    destinationNode: tag
    required: false
    properties:
      tag: {key: "ITER!", type: string}
      rank: {key: meta.rank, type: number}
"#;

/// An employee with an optional employer and a required `WORKS_AT`
/// between them: a document without an employer yields nothing.
pub const EMPLOYMENT: &str = r#"
index: staff
nodes:
  - id: employee
    nodeType: standard
    labels: [Employee]
    required: true
    properties:
      name: {key: name, type: string}
    uniqueProperties: [name]
    requiredProperties: [name]
  - id: employer
    nodeType: standard
    labels: [Company]
    required: false
    properties:
      name: {key: employer, type: string}
    uniqueProperties: [name]
    requiredProperties: [name]
relationships:
  - type: WORKS_AT
    relationshipType: standard
    directionality: forward
    sourceNode: employee
    destinationNode: employer
    required: true
"#;

/// Mappings that must be rejected at load time, as `(name, yaml)`.
pub fn invalid() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "dangling_reference",
            r#"
index: x
nodes:
  - {id: a, nodeType: standard, labels: [A], required: false}
relationships:
  - {type: R, relationshipType: standard, directionality: forward,
     sourceNode: a, destinationNode: nope, required: false}
"#,
        ),
        (
            "missing_relationships",
            r#"
index: x
nodes:
  - {id: a, nodeType: standard, labels: [A], required: false}
"#,
        ),
        (
            "iterator_without_iterator_endpoint",
            r#"
index: x
nodes:
  - {id: a, nodeType: standard, labels: [A], required: false}
relationships:
  - {type: R, relationshipType: iterator, directionality: forward,
     sourceNode: a, destinationNode: a, required: false}
"#,
        ),
        (
            "unknown_property_type",
            r#"
index: x
nodes:
  - id: a
    nodeType: standard
    labels: [A]
    required: false
    properties:
      p: {key: p, type: blob}
relationships: []
"#,
        ),
    ]
}
