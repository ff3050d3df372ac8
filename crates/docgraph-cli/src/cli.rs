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


//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use docgraph_neo4j::StatementConfig;
use tracing::info;

use crate::error::Result;
use crate::logging::{self, DEFAULT_LOG_FILE};
use crate::run::{self, RunOptions};

/// DocGraph - compile indexed documents into a Neo4j graph
///
/// Reads documents from an Elasticsearch index (or a JSON / JSON Lines
/// file), builds nodes and relationships as described by a YAML mapping,
/// and writes them to Neo4j with MERGE/CREATE statements.
///
/// # Examples
///
/// ```bash
/// # Poll the index forever, writing to Neo4j
/// docgraph -C config.yaml -M mapping.yaml
///
/// # Print the statements for a local file once
/// docgraph -M mapping.yaml --input docs.jsonl -n -e
/// ```
#[derive(Parser, Debug)]
#[command(name = "docgraph")]
#[command(author, version, about = "DocGraph - compile indexed documents into a Neo4j graph", long_about = None)]
pub struct Cli {
    /// Enable debug messages
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Also write log messages to a file
    #[arg(short = 'f', long = "log-to-file")]
    pub log_to_file: bool,

    /// Log file to write (requires -f)
    #[arg(short = 'F', long = "log-file", value_name = "FILE", requires = "log_to_file")]
    pub log_file: Option<PathBuf>,

    /// Run configuration file
    #[arg(short = 'C', long, value_name = "FILE", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Mapping file
    #[arg(short = 'M', long, value_name = "FILE", default_value = "mapping.yaml")]
    pub mapping: PathBuf,

    /// Read a single batch and stop
    #[arg(short = 'o', long)]
    pub once: bool,

    /// Stop when the source has no more documents
    #[arg(short = 'e', long = "end-after-empty")]
    pub end_after_empty: bool,

    /// Print statements instead of executing them
    #[arg(short = 'n', long = "no-execute")]
    pub no_execute: bool,

    /// Read documents from a JSON array or JSON Lines file
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Escape quotes and control characters in text literals
    #[arg(long)]
    pub escape_literals: bool,

    /// Prefix printed statements with a comment naming their definition
    #[arg(long)]
    pub comments: bool,
}

impl Cli {
    /// Where log output is duplicated, if anywhere.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_to_file.then(|| {
            self.log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
        })
    }

    /// The run described by these arguments.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            mapping: self.mapping.clone(),
            config: self.config.clone(),
            input: self.input.clone(),
            execute: !self.no_execute,
            once: self.once,
            end_after_empty: self.end_after_empty,
            statements: StatementConfig::builder()
                .escape_literals(self.escape_literals)
                .include_comments(self.comments)
                .build(),
        }
    }

    /// Set up logging and perform the run.
    pub fn execute(&self) -> Result<()> {
        logging::init(self.debug, self.log_path().as_deref())?;
        let report = run::run(&self.run_options())?;
        info!(
            documents = report.documents,
            statements = report.statements(),
            failed = report.failed,
            "done"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["docgraph"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert_eq!(cli.mapping, PathBuf::from("mapping.yaml"));
        assert!(cli.log_path().is_none());

        let options = cli.run_options();
        assert!(options.execute);
        assert!(!options.once);
        assert_eq!(options.statements, StatementConfig::default());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "docgraph", "-d", "-f", "-F", "run.log", "-C", "c.yaml", "-M", "m.yaml", "-o", "-e",
            "-n",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.log_path(), Some(PathBuf::from("run.log")));

        let options = cli.run_options();
        assert!(!options.execute);
        assert!(options.once);
        assert!(options.end_after_empty);
        assert_eq!(options.mapping, PathBuf::from("m.yaml"));
        assert_eq!(options.config, PathBuf::from("c.yaml"));
    }

    #[test]
    fn test_log_to_file_default_path() {
        let cli = Cli::try_parse_from(["docgraph", "-f"]).unwrap();
        assert_eq!(cli.log_path(), Some(PathBuf::from(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn test_log_file_requires_flag() {
        assert!(Cli::try_parse_from(["docgraph", "-F", "run.log"]).is_err());
    }

    #[test]
    fn test_statement_options() {
        let cli = Cli::try_parse_from(["docgraph", "--escape-literals", "--comments"]).unwrap();
        let statements = cli.run_options().statements;
        assert!(statements.escape_literals);
        assert!(statements.include_comments);
    }
}
