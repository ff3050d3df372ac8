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


//! End-to-end tests of the `docgraph` binary on local files.

use assert_cmd::Command;
use docgraph_test::{documents, mappings};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn docgraph_cmd() -> Command {
    let mut cmd = Command::cargo_bin("docgraph").expect("Failed to find docgraph binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

fn jsonl(docs: &[Value]) -> String {
    docs.iter().map(|d| format!("{}\n", d)).collect()
}

// Dry run over a file: no config or database needed.
fn dry_run(dir: &TempDir, mapping: &Path, input: &Path) -> Command {
    let mut cmd = docgraph_cmd();
    cmd.arg("-M")
        .arg(mapping)
        .arg("-C")
        .arg(dir.path().join("absent.yaml"))
        .arg("--input")
        .arg(input)
        .args(["-n", "-e"]);
    cmd
}

#[test]
fn test_help_output() {
    docgraph_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DocGraph"))
        .stdout(predicate::str::contains("--no-execute"));
}

#[test]
fn test_dry_run_prints_script() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", &jsonl(&[documents::friends()]));

    dry_run(&dir, &mapping, &input)
        .assert()
        .success()
        .stdout(
            "MERGE (n:Person {email: \"x@y.com\"});\n\
             MERGE (n:Person {email: \"y@z.com\"});\n\
             MATCH (s:Person), (d:Person) WHERE s.email = \"x@y.com\" AND d.email = \"y@z.com\" \
             MERGE (s)-[r:KNOWS]->(d);\n",
        )
        .stderr(predicate::str::contains("mapping loaded"));
}

#[test]
fn test_dry_run_json_array() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::ARTICLES);
    let docs = Value::Array(vec![documents::article(), documents::bare_article()]);
    let input = write(&dir, "docs.json", &docs.to_string());

    dry_run(&dir, &mapping, &input)
        .assert()
        .success()
        .stdout(predicate::str::contains("MERGE (n:Article {id: 7})"))
        .stdout(predicate::str::contains("MERGE (n:Tag {name: \"neo4j\"})"))
        .stdout(predicate::str::contains("MERGE (n:Article {id: 8}) SET n.title = \"Untitled\";"));
}

#[test]
fn test_dry_run_with_comments() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", &jsonl(&[documents::friends()]));

    dry_run(&dir, &mapping, &input)
        .arg("--comments")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// node a\nMERGE (n:Person"))
        .stdout(predicate::str::contains("// relationship KNOWS(a->b)\n"));
}

#[test]
fn test_once_reads_single_batch() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", &jsonl(&[documents::friends()]));
    let config = write(
        &dir,
        "config.yaml",
        "elastic: {host: localhost, port: 9200, protocol: http, scrollSize: 1, sleepMin: 1}\n",
    );

    // A batch size of one still yields the first document's statements.
    docgraph_cmd()
        .arg("-M")
        .arg(&mapping)
        .arg("-C")
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .args(["-n", "-o"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KNOWS"));
}

#[test]
fn test_log_file_written() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", &jsonl(&[documents::friends()]));
    let log = dir.path().join("run.log");

    dry_run(&dir, &mapping, &input)
        .arg("-f")
        .arg("-F")
        .arg(&log)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("mapping loaded"));
    assert!(contents.contains("complete"));
}

#[test]
fn test_invalid_mapping_fails() {
    let dir = TempDir::new().unwrap();
    for (_, yaml) in mappings::invalid() {
        let mapping = write(&dir, "mapping.yaml", yaml);
        let input = write(&dir, "docs.jsonl", "");
        dry_run(&dir, &mapping, &input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error: Mapping error"))
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_missing_mapping_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "docs.jsonl", "");
    dry_run(&dir, &dir.path().join("nope.yaml"), &input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", "{\"a\": \"x@y.com\"}\nnot json\n");

    dry_run(&dir, &mapping, &input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Source error"));
}

#[test]
fn test_execute_requires_config() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let input = write(&dir, "docs.jsonl", "");

    docgraph_cmd()
        .arg("-M")
        .arg(&mapping)
        .arg("-C")
        .arg(dir.path().join("absent.yaml"))
        .arg("--input")
        .arg(&input)
        .arg("-e")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error"));
}

#[test]
fn test_index_run_requires_elastic_section() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let config = write(
        &dir,
        "config.yaml",
        "neo: {host: localhost, port: 7687, protocol: bolt, user: neo4j, password: x}\n",
    );

    docgraph_cmd()
        .arg("-M")
        .arg(&mapping)
        .arg("-C")
        .arg(&config)
        .args(["-n", "-e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing 'elastic' section"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let mapping = write(&dir, "mapping.yaml", mappings::PEOPLE);
    let config = write(
        &dir,
        "config.yaml",
        "elastic: {host: localhost, port: 9200, protocol: ftp, scrollSize: 10, sleepMin: 1}\n",
    );

    docgraph_cmd()
        .arg("-M")
        .arg(&mapping)
        .arg("-C")
        .arg(&config)
        .args(["-n", "-e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("elastic.protocol"));
}

#[test]
fn test_log_file_flag_requires_enable() {
    docgraph_cmd()
        .args(["-F", "run.log"])
        .assert()
        .failure();
}
