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

//! Shared test fixtures for the DocGraph crates.
//!
//! Fixtures are plain YAML text and JSON values so that every crate can
//! parse them with its own types.
//!
//! ```rust
//! use docgraph_test::{documents, mappings};
//!
//! assert!(mappings::PEOPLE.contains("KNOWS"));
//! assert_eq!(documents::friends()["a"], "x@y.com");
//! ```

pub mod documents;
pub mod mappings;

/// Every valid mapping fixture as `(name, yaml)`.
pub fn all_mappings() -> Vec<(&'static str, &'static str)> {
    vec![
        ("people", mappings::PEOPLE),
        ("articles", mappings::ARTICLES),
        ("employment", mappings::EMPLOYMENT),
    ]
}
