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

//! Dotted-path lookup over nested documents.
//!
//! Paths such as `"author.address.city"` are split on `.` and walked one
//! segment at a time. Object members are looked up by key; array entries by
//! decimal index. Any absent or non-traversable segment ends the walk with
//! `None`. The path string is never consumed, so one mapping path can be
//! evaluated against any number of documents.

use serde_json::Value;

/// Resolve `path` against `doc`, returning the terminal value if every
/// segment exists.
///
/// ```
/// use serde_json::json;
/// use docgraph_core::path::resolve;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// assert_eq!(resolve("a.b.1", &doc), Some(&json!(20)));
/// assert_eq!(resolve("a.c", &doc), None);
/// ```
pub fn resolve<'v>(path: &str, doc: &'v Value) -> Option<&'v Value> {
    path.split('.').try_fold(doc, step)
}

/// True if every segment of `path` exists in `doc`.
pub fn contains(path: &str, doc: &Value) -> bool {
    resolve(path, doc).is_some()
}

/// Resolve `path`, treating an explicit `null` as absent.
pub fn resolve_present<'v>(path: &str, doc: &'v Value) -> Option<&'v Value> {
    resolve(path, doc).filter(|v| !v.is_null())
}

#[inline]
fn step<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_single_segment() {
        let doc = json!({"a": "x@y.com"});
        assert_eq!(resolve("a", &doc), Some(&json!("x@y.com")));
        assert!(contains("a", &doc));
    }

    #[test]
    fn test_nested_segments() {
        let doc = json!({"a": {"b": {"c": 5}}});
        assert_eq!(resolve("a.b.c", &doc), Some(&json!(5)));
        assert_eq!(resolve("a.b", &doc), Some(&json!({"c": 5})));
    }

    #[test]
    fn test_missing_intermediate() {
        let doc = json!({"a": {"b": 1}});
        assert!(!contains("x.b", &doc));
        assert!(!contains("a.x.c", &doc));
    }

    #[test]
    fn test_non_traversable_intermediate() {
        let doc = json!({"a": "scalar", "n": 3});
        assert!(!contains("a.b", &doc));
        assert!(!contains("n.b", &doc));
    }

    #[test]
    fn test_array_index() {
        let doc = json!({"tags": ["x", "y"]});
        assert_eq!(resolve("tags.0", &doc), Some(&json!("x")));
        assert_eq!(resolve("tags.2", &doc), None);
        assert_eq!(resolve("tags.first", &doc), None);
    }

    #[test]
    fn test_null_is_present_but_not_present_value() {
        let doc = json!({"a": null});
        assert!(contains("a", &doc));
        assert_eq!(resolve_present("a", &doc), None);
    }

    #[test]
    fn test_path_reusable() {
        let path = "person.name";
        let first = json!({"person": {"name": "A"}});
        let second = json!({"person": {"name": "B"}});
        assert_eq!(resolve(path, &first), Some(&json!("A")));
        assert_eq!(resolve(path, &second), Some(&json!("B")));
        assert_eq!(resolve(path, &first), Some(&json!("A")));
    }

    proptest! {
        #[test]
        fn prop_resolve_never_panics(path in "[a-z0-9.]{0,20}") {
            let doc = json!({"a": {"b": [1, {"c": null}]}, "0": "zero"});
            let _ = resolve(&path, &doc);
        }

        #[test]
        fn prop_contains_agrees_with_resolve(key in "[a-z]{1,8}") {
            let doc = json!({"present": {"inner": 1}});
            let path = format!("present.{}", key);
            prop_assert_eq!(contains(&path, &doc), key == "inner");
        }
    }
}
