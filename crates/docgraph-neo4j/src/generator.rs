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

//! Statement generation from compiled nodes and relationships.
//!
//! # Nodes
//!
//! A node with a merge key or unique labels is written with `MERGE`. The
//! merge pattern holds the match labels (unique labels if given, else all
//! labels) and the identity properties (the merge key if given, else every
//! property). Remaining properties and labels go into a `SET` clause so
//! they never change what is matched:
//!
//! ```cypher
//! MERGE (n:Person {email: "x@y.com"}) SET n.name = "X", n:Author
//! ```
//!
//! Every other node is written with `CREATE` and its properties inline.
//!
//! # Relationships
//!
//! Both endpoints are matched by their match labels and identity
//! properties, then the edge is merged (if `unique` or it has a merge key)
//! or created:
//!
//! ```cypher
//! MATCH (s:Person), (d:Person) WHERE s.email = "x@y.com" AND d.email = "y@z.com"
//!   MERGE (s)-[r:KNOWS]->(d)
//! ```
//!
//! An iterator relationship yields one statement per instance, instance
//! *i* matching instance *i* of its iterator endpoint.

use docgraph_core::{
    CompiledNode, CompiledRelationship, Directionality, NodePattern, PropertyMap, PropertySet,
    PropertyValue, RelationshipBody,
};
use tracing::{debug, warn};

use crate::config::StatementConfig;
use crate::cypher::{
    escape_identifier, escape_label, escape_labels, escape_relationship_type, format_value,
    CypherScript, CypherStatement, StatementType,
};

/// Turns compiled graph elements into Cypher statements.
#[derive(Debug, Clone, Default)]
pub struct StatementGenerator {
    config: StatementConfig,
}

impl StatementGenerator {
    /// Create a generator with the given options.
    pub fn new(config: StatementConfig) -> Self {
        Self { config }
    }

    /// The rendering options.
    pub fn config(&self) -> &StatementConfig {
        &self.config
    }

    /// Generate the script for a batch: every node statement in order,
    /// then every relationship statement in order.
    pub fn generate(
        &self,
        nodes: &[CompiledNode],
        relationships: &[CompiledRelationship],
    ) -> CypherScript {
        let mut script = CypherScript::new();
        for node in nodes {
            script.extend(self.node_statements(node));
        }
        for rel in relationships {
            script.extend(self.relationship_statements(rel));
        }
        debug!(
            nodes = script.node_count(),
            relationships = script.relationship_count(),
            "generated statements"
        );
        script
    }

    /// One statement per node written by `node`.
    pub fn node_statements(&self, node: &CompiledNode) -> Vec<CypherStatement> {
        let iterator = node.is_iterator();
        node.patterns()
            .iter()
            .enumerate()
            .map(|(index, pattern)| {
                let stmt = self.node_statement(pattern);
                if iterator {
                    self.annotate(stmt, || format!("node {}[{}]", node.id, index))
                } else {
                    self.annotate(stmt, || format!("node {}", node.id))
                }
            })
            .collect()
    }

    /// The statement writing a single node.
    pub fn node_statement(&self, pattern: &NodePattern<'_>) -> CypherStatement {
        let props = pattern.properties;

        if !pattern.is_merge() {
            let query = format!(
                "CREATE (n{}{})",
                escape_labels(pattern.labels),
                self.property_map(&props.properties)
            );
            return CypherStatement::new(query, StatementType::CreateNode);
        }

        let identity = props.identity();
        let mut query = format!(
            "MERGE (n{}{})",
            escape_labels(pattern.match_labels()),
            self.property_map(identity)
        );

        let mut set_items: Vec<String> = props
            .properties
            .iter()
            .filter(|(name, _)| !identity.contains_key(*name))
            .map(|(name, value)| self.assignment("n", name, value))
            .collect();
        set_items.extend(
            pattern
                .extra_labels()
                .into_iter()
                .map(|label| format!("n{}", escape_label(label))),
        );
        if !set_items.is_empty() {
            query.push_str(" SET ");
            query.push_str(&set_items.join(", "));
        }

        CypherStatement::new(query, StatementType::MergeNode)
    }

    /// One statement per relationship written by `rel`.
    pub fn relationship_statements(&self, rel: &CompiledRelationship) -> Vec<CypherStatement> {
        let sources = rel.source.patterns();
        let destinations = rel.destination.patterns();
        let label = format!(
            "relationship {}({}->{})",
            rel.rel_type, rel.source.id, rel.destination.id
        );

        match &rel.body {
            RelationshipBody::Standard(props) => {
                if sources.len() != 1 || destinations.len() != 1 {
                    warn!(relationship = %label, "standard relationship has iterator endpoint, skipping");
                    return Vec::new();
                }
                let stmt = self.relationship_statement(rel, &sources[0], &destinations[0], props);
                vec![self.annotate(stmt, || label.clone())]
            }
            RelationshipBody::Iterator(instances) => {
                let endpoint_instances = sources.len().max(destinations.len());
                if endpoint_instances != instances.len() {
                    warn!(
                        relationship = %label,
                        node_instances = endpoint_instances,
                        relationship_instances = instances.len(),
                        "iterator instance counts differ, truncating to the shorter"
                    );
                }

                instances
                    .iter()
                    .enumerate()
                    .map_while(|(index, instance)| {
                        let source = correlated(&sources, index)?;
                        let destination = correlated(&destinations, index)?;
                        let stmt = self.relationship_statement(
                            rel,
                            source,
                            destination,
                            &instance.properties,
                        );
                        Some(self.annotate(stmt, || format!("{}[{}]", label, index)))
                    })
                    .collect()
            }
        }
    }

    fn relationship_statement(
        &self,
        rel: &CompiledRelationship,
        source: &NodePattern<'_>,
        destination: &NodePattern<'_>,
        props: &PropertySet,
    ) -> CypherStatement {
        let mut query = format!(
            "MATCH (s{}), (d{})",
            escape_labels(source.match_labels()),
            escape_labels(destination.match_labels())
        );

        let conditions: Vec<String> = source
            .properties
            .identity()
            .iter()
            .map(|(name, value)| self.assignment("s", name, value))
            .chain(
                destination
                    .properties
                    .identity()
                    .iter()
                    .map(|(name, value)| self.assignment("d", name, value)),
            )
            .collect();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        let merge = rel.unique || props.has_unique();
        let (keyword, edge_props, statement_type) = if merge {
            ("MERGE", &props.unique_properties, StatementType::MergeRelationship)
        } else {
            ("CREATE", &props.properties, StatementType::CreateRelationship)
        };

        let edge = format!(
            "[r{}{}]",
            escape_relationship_type(&rel.rel_type),
            self.property_map(edge_props)
        );
        match rel.directionality {
            Directionality::Forward => query.push_str(&format!(" {} (s)-{}->(d)", keyword, edge)),
            Directionality::Backward => query.push_str(&format!(" {} (s)<-{}-(d)", keyword, edge)),
        }

        if merge {
            let set_items: Vec<String> = props
                .non_unique()
                .map(|(name, value)| self.assignment("r", name, value))
                .collect();
            if !set_items.is_empty() {
                query.push_str(" SET ");
                query.push_str(&set_items.join(", "));
            }
        }

        CypherStatement::new(query, statement_type)
    }

    fn property_map(&self, properties: &PropertyMap) -> String {
        if properties.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = properties
            .iter()
            .map(|(name, value)| {
                format!("{}: {}", escape_identifier(name), format_value(value, &self.config))
            })
            .collect();
        format!(" {{{}}}", pairs.join(", "))
    }

    fn assignment(&self, variable: &str, name: &str, value: &PropertyValue) -> String {
        format!(
            "{}.{} = {}",
            variable,
            escape_identifier(name),
            format_value(value, &self.config)
        )
    }

    fn annotate(&self, stmt: CypherStatement, comment: impl FnOnce() -> String) -> CypherStatement {
        if self.config.include_comments {
            stmt.with_comment(comment())
        } else {
            stmt
        }
    }
}

/// The pattern of an endpoint for instance `index`: a standard endpoint
/// is shared by every instance.
fn correlated<'p, 'a>(patterns: &'p [NodePattern<'a>], index: usize) -> Option<&'p NodePattern<'a>> {
    match patterns {
        [single] => Some(single),
        many => many.get(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_core::{NodeBody, NodeInstance, RelationshipInstance};
    use serde_json::Value;

    fn person(id: &str, email: &str) -> CompiledNode {
        CompiledNode {
            id: id.to_string(),
            labels: vec!["Person".to_string()],
            unique_labels: None,
            body: NodeBody::Standard(PropertySet::new().with_unique("email", email)),
        }
    }

    fn tags(names: &[&str]) -> CompiledNode {
        CompiledNode {
            id: "t".to_string(),
            labels: vec!["Tag".to_string()],
            unique_labels: None,
            body: NodeBody::Iterator(
                names
                    .iter()
                    .map(|n| NodeInstance {
                        labels: vec!["Tag".to_string()],
                        unique_labels: None,
                        properties: PropertySet::new().with_unique("name", *n),
                        element: Value::from(*n),
                    })
                    .collect(),
            ),
        }
    }

    fn knows(props: PropertySet, unique: bool) -> CompiledRelationship {
        CompiledRelationship {
            rel_type: "KNOWS".to_string(),
            directionality: Directionality::Forward,
            unique,
            source: person("a", "x@y.com"),
            destination: person("b", "y@z.com"),
            body: RelationshipBody::Standard(props),
        }
    }

    fn queries(statements: &[CypherStatement]) -> Vec<&str> {
        statements.iter().map(|s| s.query.as_str()).collect()
    }

    #[test]
    fn test_merge_node_with_set_clause() {
        let node = CompiledNode {
            id: "a".to_string(),
            labels: vec!["Person".to_string()],
            unique_labels: None,
            body: NodeBody::Standard(
                PropertySet::new()
                    .with_unique("email", "x@y.com")
                    .with("age", 3i64),
            ),
        };
        let stmts = StatementGenerator::default().node_statements(&node);
        assert_eq!(
            queries(&stmts),
            vec!["MERGE (n:Person {email: \"x@y.com\"}) SET n.age = 3"]
        );
        assert_eq!(stmts[0].statement_type, StatementType::MergeNode);
    }

    #[test]
    fn test_create_node_inlines_properties() {
        let node = CompiledNode {
            id: "a".to_string(),
            labels: vec!["Event".to_string(), "Log".to_string()],
            unique_labels: None,
            body: NodeBody::Standard(PropertySet::new().with("n", 1i64).with("s", "v")),
        };
        let stmts = StatementGenerator::default().node_statements(&node);
        assert_eq!(queries(&stmts), vec!["CREATE (n:Event:Log {n: 1, s: \"v\"})"]);
        assert_eq!(stmts[0].statement_type, StatementType::CreateNode);
    }

    #[test]
    fn test_unique_labels_merge_and_set_extra_labels() {
        let node = CompiledNode {
            id: "a".to_string(),
            labels: vec!["Author".to_string(), "Person".to_string()],
            unique_labels: Some(vec!["Person".to_string()]),
            body: NodeBody::Standard(
                PropertySet::new()
                    .with_unique("handle", "ada")
                    .with("name", "Ada"),
            ),
        };
        let stmts = StatementGenerator::default().node_statements(&node);
        assert_eq!(
            queries(&stmts),
            vec!["MERGE (n:Person {handle: \"ada\"}) SET n.name = \"Ada\", n:Author"]
        );
    }

    #[test]
    fn test_unique_labels_without_merge_key_match_all_properties() {
        let node = CompiledNode {
            id: "a".to_string(),
            labels: vec!["A".to_string(), "B".to_string()],
            unique_labels: Some(vec!["A".to_string()]),
            body: NodeBody::Standard(PropertySet::new().with("x", 1i64)),
        };
        let stmts = StatementGenerator::default().node_statements(&node);
        assert_eq!(queries(&stmts), vec!["MERGE (n:A {x: 1}) SET n:B"]);
    }

    #[test]
    fn test_iterator_node_one_statement_per_instance() {
        let generator = StatementGenerator::new(StatementConfig::new().with_comments());
        let stmts = generator.node_statements(&tags(&["a", "b"]));
        assert_eq!(
            queries(&stmts),
            vec!["MERGE (n:Tag {name: \"a\"})", "MERGE (n:Tag {name: \"b\"})"]
        );
        assert_eq!(stmts[1].comment.as_deref(), Some("node t[1]"));
    }

    #[test]
    fn test_unique_flag_merges_relationship() {
        let stmts = StatementGenerator::default().relationship_statements(&knows(PropertySet::new(), true));
        assert_eq!(
            queries(&stmts),
            vec![
                "MATCH (s:Person), (d:Person) WHERE s.email = \"x@y.com\" AND d.email = \"y@z.com\" \
                 MERGE (s)-[r:KNOWS]->(d)"
            ]
        );
        assert_eq!(stmts[0].statement_type, StatementType::MergeRelationship);
    }

    #[test]
    fn test_relationship_merge_key_excludes_other_properties() {
        let props = PropertySet::new()
            .with_unique("id", 9i64)
            .with("since", 2020i64)
            .with("note", "n");
        let stmts = StatementGenerator::default().relationship_statements(&knows(props, false));
        let q = &stmts[0].query;
        assert!(q.contains("MERGE (s)-[r:KNOWS {id: 9}]->(d)"), "{}", q);
        assert!(q.ends_with(" SET r.since = 2020, r.note = \"n\""), "{}", q);
        let merge_clause = &q[q.find("MERGE").unwrap()..q.find(" SET").unwrap()];
        assert!(!merge_clause.contains("since"));
    }

    #[test]
    fn test_relationship_create_inlines_properties() {
        let mut rel = knows(PropertySet::new().with("w", 1i64), false);
        rel.directionality = Directionality::Backward;
        let stmts = StatementGenerator::default().relationship_statements(&rel);
        assert!(stmts[0].query.ends_with(" CREATE (s)<-[r:KNOWS {w: 1}]-(d)"));
        assert_eq!(stmts[0].statement_type, StatementType::CreateRelationship);
    }

    #[test]
    fn test_relationship_without_endpoint_properties_omits_where() {
        let mut rel = knows(PropertySet::new(), false);
        rel.source.body = NodeBody::Standard(PropertySet::new());
        rel.destination.body = NodeBody::Standard(PropertySet::new());
        let stmts = StatementGenerator::default().relationship_statements(&rel);
        assert_eq!(
            queries(&stmts),
            vec!["MATCH (s:Person), (d:Person) CREATE (s)-[r:KNOWS]->(d)"]
        );
    }

    #[test]
    fn test_iterator_relationship_correlates_instances() {
        let rel = CompiledRelationship {
            rel_type: "TAGGED".to_string(),
            directionality: Directionality::Forward,
            unique: true,
            source: person("a", "x@y.com"),
            destination: tags(&["t1", "t2", "t3"]),
            body: RelationshipBody::Iterator(vec![RelationshipInstance::default(); 3]),
        };
        let stmts = StatementGenerator::default().relationship_statements(&rel);
        assert_eq!(stmts.len(), 3);
        for (i, stmt) in stmts.iter().enumerate() {
            let expected = format!("d.name = \"t{}\"", i + 1);
            assert!(stmt.query.contains(&expected), "{}", stmt.query);
            assert!(stmt.query.contains("s.email = \"x@y.com\""));
        }
    }

    #[test]
    fn test_iterator_relationship_count_mismatch_truncates() {
        let rel = CompiledRelationship {
            rel_type: "TAGGED".to_string(),
            directionality: Directionality::Forward,
            unique: false,
            source: tags(&["t1", "t2"]),
            destination: person("a", "x@y.com"),
            body: RelationshipBody::Iterator(vec![RelationshipInstance::default(); 3]),
        };
        let stmts = StatementGenerator::default().relationship_statements(&rel);
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_generate_orders_nodes_before_relationships() {
        let rel = knows(PropertySet::new(), true);
        let nodes = vec![rel.source.clone(), rel.destination.clone()];
        let script = StatementGenerator::default().generate(&nodes, std::slice::from_ref(&rel));
        let types: Vec<bool> = script.statements.iter().map(|s| s.statement_type.is_node()).collect();
        assert_eq!(types, vec![true, true, false]);
    }

    #[test]
    fn test_identifiers_are_escaped() {
        let node = CompiledNode {
            id: "a".to_string(),
            labels: vec!["Web Page".to_string()],
            unique_labels: None,
            body: NodeBody::Standard(PropertySet::new().with("first name", "x")),
        };
        let stmts = StatementGenerator::default().node_statements(&node);
        assert_eq!(
            queries(&stmts),
            vec!["CREATE (n:`Web Page` {`first name`: \"x\"})"]
        );
    }
}
