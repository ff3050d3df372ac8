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


//! Run configuration loaded from `config.yaml`.
//!
//! ```yaml
//! elastic:
//!   host: localhost
//!   port: 9200
//!   protocol: http
//!   scrollSize: 1000
//!   sleepMin: 15
//! neo:
//!   host: localhost
//!   port: 7687
//!   protocol: bolt
//!   user: neo4j
//!   password: secret
//! ```
//!
//! Either section may be left out when the run does not need it: an
//! `--input` run reads no index, and a dry run opens no database.

use std::path::Path;
use std::time::Duration;

use docgraph_elastic::{ScrollConfig, DEFAULT_SCROLL_SIZE};
use docgraph_neo4j::ConnectionConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Minutes to sleep between polls when no `elastic` section is given.
pub const DEFAULT_SLEEP_MIN: u64 = 15;

const ELASTIC_PROTOCOLS: &[&str] = &["http", "https"];
const NEO_PROTOCOLS: &[&str] = &["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// Elasticsearch connection and scrolling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticSettings {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    /// Hits per scroll page.
    pub scroll_size: usize,
    /// Minutes to wait after an empty page when polling.
    pub sleep_min: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ElasticSettings {
    /// Scroll settings for `index`, with basic auth when both credentials are set.
    pub fn scroll_config(&self, index: &str, doc_type: Option<String>) -> ScrollConfig {
        let base_url = ScrollConfig::base_url_from_parts(&self.protocol, &self.host, self.port);
        let config = ScrollConfig::new(base_url, index)
            .with_doc_type(doc_type)
            .with_size(self.scroll_size);
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => config.with_basic_auth(user, password),
            _ => config,
        }
    }

    fn validate(&self) -> Result<()> {
        validate_endpoint("elastic", &self.host, &self.protocol, ELASTIC_PROTOCOLS)?;
        if self.scroll_size == 0 {
            return Err(CliError::invalid_config("elastic.scrollSize must be positive"));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(CliError::invalid_config(
                "elastic.user and elastic.password must be given together",
            ));
        }
        Ok(())
    }
}

/// Neo4j connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeoSettings {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub user: String,
    pub password: String,
}

impl NeoSettings {
    /// Bolt connection built as `{protocol}://{host}:{port}`.
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::from_parts(
            &self.protocol,
            &self.host,
            self.port,
            self.user.clone(),
            self.password.clone(),
        )
    }

    fn validate(&self) -> Result<()> {
        validate_endpoint("neo", &self.host, &self.protocol, NEO_PROTOCOLS)
    }
}

/// The whole run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic: Option<ElasticSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neo: Option<NeoSettings>,
}

impl RunConfig {
    /// Parse and validate configuration text.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| CliError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        Self::from_yaml_str(&content, path)
    }

    /// Check every section that is present.
    pub fn validate(&self) -> Result<()> {
        if let Some(elastic) = &self.elastic {
            elastic.validate()?;
        }
        if let Some(neo) = &self.neo {
            neo.validate()?;
        }
        Ok(())
    }

    /// The `elastic` section, required for index runs.
    pub fn elastic(&self) -> Result<&ElasticSettings> {
        self.elastic
            .as_ref()
            .ok_or_else(|| CliError::invalid_config("missing 'elastic' section"))
    }

    /// The `neo` section, required unless statements are only printed.
    pub fn neo(&self) -> Result<&NeoSettings> {
        self.neo
            .as_ref()
            .ok_or_else(|| CliError::invalid_config("missing 'neo' section"))
    }

    /// Documents per batch.
    pub fn batch_size(&self) -> usize {
        self.elastic
            .as_ref()
            .map_or(DEFAULT_SCROLL_SIZE, |e| e.scroll_size)
    }

    /// Time to sleep after an empty batch when polling.
    pub fn poll_interval(&self) -> Duration {
        let minutes = self
            .elastic
            .as_ref()
            .map_or(DEFAULT_SLEEP_MIN, |e| e.sleep_min);
        Duration::from_secs(minutes * 60)
    }
}

fn validate_endpoint(section: &str, host: &str, protocol: &str, allowed: &[&str]) -> Result<()> {
    if host.trim().is_empty() {
        return Err(CliError::invalid_config(format!("{}.host cannot be empty", section)));
    }
    if !allowed.contains(&protocol) {
        return Err(CliError::invalid_config(format!(
            "{}.protocol '{}' is not one of {}",
            section,
            protocol,
            allowed.join(", ")
        )));
    }
    Ok(())
}
