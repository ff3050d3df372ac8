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


//! Tracing subscriber setup.
//!
//! Output always goes to stderr so a dry run can print its script on
//! stdout. With a log file, the same events are appended there too.
//! `RUST_LOG` overrides the default filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{CliError, Result};

/// Log file used when `-f` is given without `-F`.
pub const DEFAULT_LOG_FILE: &str = "docgraph.log";

/// The filter used when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("warn,docgraph={}", level)
}

/// Install the global subscriber.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CliError::io_error(path, e))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_thread_names(true)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
