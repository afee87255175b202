// srcql - search query scanner and source location model
//
// Copyright (c) 2025 the srcql developers and individual contributors.
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

//! The `select:` value vocabulary.
//!
//! `select:` values form a dotted hierarchy (`symbol.function`,
//! `commit.diff.added`). The tree below is the authoritative shape;
//! completion walks it to a requested depth.

/// One node in the `select:` hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct Access {
    /// Dotted-path segment name.
    pub name: &'static str,
    /// Child segments, empty for leaves.
    pub fields: &'static [Access],
}

impl Access {
    const fn leaf(name: &'static str) -> Self {
        Self { name, fields: &[] }
    }

    const fn node(name: &'static str, fields: &'static [Access]) -> Self {
        Self { name, fields }
    }
}

const SYMBOL_KINDS: &[Access] = &[
    Access::leaf("file"),
    Access::leaf("module"),
    Access::leaf("namespace"),
    Access::leaf("package"),
    Access::leaf("class"),
    Access::leaf("method"),
    Access::leaf("property"),
    Access::leaf("field"),
    Access::leaf("constructor"),
    Access::leaf("enum"),
    Access::leaf("interface"),
    Access::leaf("function"),
    Access::leaf("variable"),
    Access::leaf("constant"),
    Access::leaf("string"),
    Access::leaf("number"),
    Access::leaf("boolean"),
    Access::leaf("array"),
    Access::leaf("object"),
    Access::leaf("key"),
    Access::leaf("null"),
    Access::leaf("enum-member"),
    Access::leaf("struct"),
    Access::leaf("event"),
    Access::leaf("operator"),
    Access::leaf("type-parameter"),
];

const DIFF_PARTS: &[Access] = &[Access::leaf("added"), Access::leaf("removed")];

const COMMIT_FIELDS: &[Access] = &[Access::node("diff", DIFF_PARTS)];

const FILE_FIELDS: &[Access] = &[Access::leaf("directory"), Access::leaf("path")];

/// Root of the `select:` hierarchy.
pub const SELECTORS: &[Access] = &[
    Access::leaf("repo"),
    Access::node("file", FILE_FIELDS),
    Access::leaf("content"),
    Access::node("symbol", SYMBOL_KINDS),
    Access::node("commit", COMMIT_FIELDS),
];

/// Enumerates dotted selector paths from `roots`, descending `depth`
/// levels past the roots themselves.
pub fn select_discrete_values(roots: &[Access], depth: usize) -> Vec<String> {
    let mut out = Vec::new();
    for root in roots {
        collect(root, depth, &mut String::new(), &mut out);
    }
    out
}

fn collect(node: &Access, depth: usize, prefix: &mut String, out: &mut Vec<String>) {
    let saved = prefix.len();
    if !prefix.is_empty() {
        prefix.push('.');
    }
    prefix.push_str(node.name);
    out.push(prefix.clone());
    if depth > 0 {
        for child in node.fields {
            collect(child, depth - 1, prefix, out);
        }
    }
    prefix.truncate(saved);
}

/// Completion values for `select:`, sensitive to what the user has typed.
///
/// With no value (or a value without a dot) the top-level selector names
/// are offered. Once the value contains a `.`, or names a root followed by
/// a trailing dot, the subtree under that root is enumerated two levels
/// deep so dotted paths like `symbol.function` and `commit.diff.added`
/// appear.
pub fn selector_completion(value: Option<&str>) -> Vec<String> {
    let typed = value.unwrap_or("");
    if let Some(root_name) = typed.split('.').next().filter(|_| typed.contains('.')) {
        for root in SELECTORS {
            if root.name == root_name {
                return select_discrete_values(std::slice::from_ref(root), 2);
            }
        }
        return Vec::new();
    }
    select_discrete_values(SELECTORS, 0)
}
