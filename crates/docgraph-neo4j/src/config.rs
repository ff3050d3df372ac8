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

//! Configuration types for statement generation and the Bolt connection.

use serde::{Deserialize, Serialize};

/// Options controlling how statements are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementConfig {
    /// Escape quotes, backslashes and control characters inside text and
    /// datetime literals. Off by default: literals are passed through
    /// verbatim so mappings relying on raw passthrough keep working.
    #[serde(default)]
    pub escape_literals: bool,

    /// Attach a comment naming the source definition to every statement.
    #[serde(default)]
    pub include_comments: bool,
}

impl StatementConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> StatementConfigBuilder {
        StatementConfigBuilder::new()
    }

    /// Escape text and datetime literals.
    pub fn with_escaped_literals(mut self) -> Self {
        self.escape_literals = true;
        self
    }

    /// Attach comments to statements.
    pub fn with_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }
}

/// Builder for [`StatementConfig`].
#[derive(Debug, Clone, Default)]
pub struct StatementConfigBuilder {
    config: StatementConfig,
}

impl StatementConfigBuilder {
    /// Create a builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether literals are escaped.
    pub fn escape_literals(mut self, escape: bool) -> Self {
        self.config.escape_literals = escape;
        self
    }

    /// Set whether statements carry comments.
    pub fn include_comments(mut self, include: bool) -> Self {
        self.config.include_comments = include;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> StatementConfig {
        self.config
    }
}

/// Where and how to reach the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
}

impl ConnectionConfig {
    /// Build a configuration from a URI and credentials.
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Build the URI as `{protocol}://{host}:{port}`.
    pub fn from_parts(
        protocol: &str,
        host: &str,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(format!("{}://{}:{}", protocol, host, port), user, password)
    }
}
