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

//! The filter registry: every recognized `field:` of the query language.
//!
//! The registry is the single source of truth for filter names, aliases,
//! negatability, human-readable descriptions, and discrete value
//! vocabularies. The scanner consults it to decide whether `word:rest`
//! is a filter or just a pattern that happens to contain a colon;
//! completion consults it to offer fields and values.
//!
//! Lookup is case-sensitive: `repo:` is a filter, `REPO:` is not.
//!
//! # Examples
//!
//! ```
//! use srcql_core::filters::{resolve_filter, FilterKind};
//!
//! let resolved = resolve_filter("-lang").unwrap();
//! assert_eq!(resolved.kind, FilterKind::Lang);
//! assert!(resolved.negated);
//! assert!(resolve_filter("LANG").is_none());
//! ```

pub mod selectors;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use selectors::selector_completion;

/// One suggested value for a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscreteValue {
    /// Display label, shown as typed into the query.
    pub label: String,
    /// Text to insert when distinct from the label.
    pub insert_text: Option<String>,
}

impl DiscreteValue {
    fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            insert_text: None,
        }
    }
}

/// Produces value suggestions for a filter, given the value typed so far
/// and whether suggestions target a public multi-tenant instance.
pub type DiscreteValuesFn = fn(Option<&str>, bool) -> Vec<DiscreteValue>;

/// Static metadata for one filter field.
#[derive(Debug, Clone, Copy)]
pub struct FilterDefinition {
    /// Alternate short names resolving to the same filter.
    pub aliases: &'static [&'static str],
    /// Whether a leading `-` negation is meaningful.
    pub negatable: bool,
    /// Human-readable description of the positive form.
    pub description: &'static str,
    /// Description of the negated form, for negatable filters.
    pub negated_description: Option<&'static str>,
    /// Enumerable value vocabulary, when the filter has one.
    pub discrete_values: Option<DiscreteValuesFn>,
}

/// Every recognized filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    After,
    Archived,
    Author,
    Before,
    Case,
    Committer,
    Content,
    Context,
    Count,
    File,
    Fork,
    Lang,
    Message,
    PatternType,
    Repo,
    RepoGroup,
    RepoHasCommitAfter,
    RepoHasFile,
    Rev,
    Select,
    Timeout,
    Type,
    Visibility,
}

impl FilterKind {
    /// All filters, in canonical-name order.
    pub const ALL: [FilterKind; 23] = [
        FilterKind::After,
        FilterKind::Archived,
        FilterKind::Author,
        FilterKind::Before,
        FilterKind::Case,
        FilterKind::Committer,
        FilterKind::Content,
        FilterKind::Context,
        FilterKind::Count,
        FilterKind::File,
        FilterKind::Fork,
        FilterKind::Lang,
        FilterKind::Message,
        FilterKind::PatternType,
        FilterKind::Repo,
        FilterKind::RepoGroup,
        FilterKind::RepoHasCommitAfter,
        FilterKind::RepoHasFile,
        FilterKind::Rev,
        FilterKind::Select,
        FilterKind::Timeout,
        FilterKind::Type,
        FilterKind::Visibility,
    ];

    /// Canonical lowercase field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            FilterKind::After => "after",
            FilterKind::Archived => "archived",
            FilterKind::Author => "author",
            FilterKind::Before => "before",
            FilterKind::Case => "case",
            FilterKind::Committer => "committer",
            FilterKind::Content => "content",
            FilterKind::Context => "context",
            FilterKind::Count => "count",
            FilterKind::File => "file",
            FilterKind::Fork => "fork",
            FilterKind::Lang => "lang",
            FilterKind::Message => "message",
            FilterKind::PatternType => "patterntype",
            FilterKind::Repo => "repo",
            FilterKind::RepoGroup => "repogroup",
            FilterKind::RepoHasCommitAfter => "repohascommitafter",
            FilterKind::RepoHasFile => "repohasfile",
            FilterKind::Rev => "rev",
            FilterKind::Select => "select",
            FilterKind::Timeout => "timeout",
            FilterKind::Type => "type",
            FilterKind::Visibility => "visibility",
        }
    }

    /// Static metadata for this filter.
    pub fn definition(&self) -> &'static FilterDefinition {
        match self {
            FilterKind::After => &AFTER,
            FilterKind::Archived => &ARCHIVED,
            FilterKind::Author => &AUTHOR,
            FilterKind::Before => &BEFORE,
            FilterKind::Case => &CASE,
            FilterKind::Committer => &COMMITTER,
            FilterKind::Content => &CONTENT,
            FilterKind::Context => &CONTEXT,
            FilterKind::Count => &COUNT,
            FilterKind::File => &FILE,
            FilterKind::Fork => &FORK,
            FilterKind::Lang => &LANG,
            FilterKind::Message => &MESSAGE,
            FilterKind::PatternType => &PATTERN_TYPE,
            FilterKind::Repo => &REPO,
            FilterKind::RepoGroup => &REPO_GROUP,
            FilterKind::RepoHasCommitAfter => &REPO_HAS_COMMIT_AFTER,
            FilterKind::RepoHasFile => &REPO_HAS_FILE,
            FilterKind::Rev => &REV,
            FilterKind::Select => &SELECT,
            FilterKind::Timeout => &TIMEOUT,
            FilterKind::Type => &TYPE,
            FilterKind::Visibility => &VISIBILITY,
        }
    }
}

/// The result of resolving a written field name against the registry.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFilter {
    /// The filter the name resolved to.
    pub kind: FilterKind,
    /// Whether the written name carried a leading `-`.
    pub negated: bool,
    /// The filter's registry entry.
    pub definition: &'static FilterDefinition,
}

static LOOKUP: Lazy<HashMap<&'static str, FilterKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in FilterKind::ALL {
        map.insert(kind.name(), kind);
        for alias in kind.definition().aliases {
            map.insert(*alias, kind);
        }
    }
    map
});

/// Resolves a field name as written in a query, stripping at most one
/// leading `-`. Returns `None` for unknown names; lookup is
/// case-sensitive.
pub fn resolve_filter(field: &str) -> Option<ResolvedFilter> {
    let (negated, name) = match field.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, field),
    };
    let kind = *LOOKUP.get(name)?;
    Some(ResolvedFilter {
        kind,
        negated,
        definition: kind.definition(),
    })
}

/// Returns `true` if the written field name resolves to a negatable
/// filter.
pub fn is_negatable_filter(field: &str) -> bool {
    resolve_filter(field).map_or(false, |resolved| resolved.definition.negatable)
}

// ==================== Discrete value vocabularies ====================

fn fixed(labels: &[&str]) -> Vec<DiscreteValue> {
    labels.iter().map(|label| DiscreteValue::plain(*label)).collect()
}

fn yes_no_only_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["yes", "no", "only"])
}

fn yes_no_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["yes", "no"])
}

fn pattern_type_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["literal", "regexp", "structural"])
}

fn result_type_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["diff", "commit", "symbol", "repo", "path", "file"])
}

fn visibility_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["any", "private", "public"])
}

fn context_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&["global"])
}

fn date_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    ["yesterday", "1 week ago", "1 month ago", "last thursday", "june 25 2017"]
        .iter()
        .map(|example| DiscreteValue {
            label: format!("\"{example}\""),
            insert_text: Some(format!("\"{example}\"")),
        })
        .collect()
}

fn select_values(value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    selector_completion(value)
        .into_iter()
        .map(DiscreteValue::plain)
        .collect()
}

fn lang_values(_value: Option<&str>, _public: bool) -> Vec<DiscreteValue> {
    fixed(&[
        "c", "c++", "c#", "css", "go", "graphql", "haskell", "html", "java", "javascript",
        "json", "kotlin", "lua", "markdown", "php", "powershell", "python", "r", "ruby",
        "rust", "sass", "scala", "sql", "swift", "typescript",
    ])
}

// ==================== Registry entries ====================

static AFTER: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Commits made after a certain date",
    negated_description: None,
    discrete_values: Some(date_values),
};

static ARCHIVED: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Include results from archived repositories",
    negated_description: None,
    discrete_values: Some(yes_no_only_values),
};

static AUTHOR: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: true,
    description: "The author of a commit",
    negated_description: Some("Exclude commits by a certain author"),
    discrete_values: None,
};

static BEFORE: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Commits made before a certain date",
    negated_description: None,
    discrete_values: Some(date_values),
};

static CASE: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Treat the search pattern as case-sensitive",
    negated_description: None,
    discrete_values: Some(yes_no_values),
};

static COMMITTER: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: true,
    description: "The committer of a commit",
    negated_description: Some("Exclude commits by a certain committer"),
    discrete_values: None,
};

static CONTENT: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: true,
    description: "Explicitly override the search pattern",
    negated_description: Some("Exclude results containing the given string"),
    discrete_values: None,
};

static CONTEXT: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Search only repositories within a specified context",
    negated_description: None,
    discrete_values: Some(context_values),
};

static COUNT: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Number of results to fetch (integer) or \"all\"",
    negated_description: None,
    discrete_values: None,
};

static FILE: FilterDefinition = FilterDefinition {
    aliases: &["f"],
    negatable: true,
    description: "Include only results from matching file paths",
    negated_description: Some("Exclude results from matching file paths"),
    discrete_values: None,
};

static FORK: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Include results from forked repositories",
    negated_description: None,
    discrete_values: Some(yes_no_only_values),
};

static LANG: FilterDefinition = FilterDefinition {
    aliases: &["l", "language"],
    negatable: true,
    description: "Include only results from the given language",
    negated_description: Some("Exclude results from the given language"),
    discrete_values: Some(lang_values),
};

static MESSAGE: FilterDefinition = FilterDefinition {
    aliases: &["m", "msg"],
    negatable: true,
    description: "Commits with messages matching a certain string",
    negated_description: Some("Exclude commits with messages matching a certain string"),
    discrete_values: None,
};

static PATTERN_TYPE: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "The pattern type (literal, regexp, structural) in use",
    negated_description: None,
    discrete_values: Some(pattern_type_values),
};

static REPO: FilterDefinition = FilterDefinition {
    aliases: &["r"],
    negatable: true,
    description: "Include only results from matching repositories",
    negated_description: Some("Exclude results from matching repositories"),
    discrete_values: None,
};

static REPO_GROUP: FilterDefinition = FilterDefinition {
    aliases: &["g"],
    negatable: false,
    description: "Include results from the named group of repositories",
    negated_description: None,
    discrete_values: None,
};

static REPO_HAS_COMMIT_AFTER: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Filter out stale repositories without recent commits",
    negated_description: None,
    discrete_values: Some(date_values),
};

static REPO_HAS_FILE: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: true,
    description: "Include only results from repositories containing a matching file",
    negated_description: Some("Exclude results from repositories containing a matching file"),
    discrete_values: None,
};

static REV: FilterDefinition = FilterDefinition {
    aliases: &["revision"],
    negatable: false,
    description: "Search a revision (branch, commit hash, or tag) instead of the default branch",
    negated_description: None,
    discrete_values: None,
};

static SELECT: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Select repo, file, content, symbol, or commit results",
    negated_description: None,
    discrete_values: Some(select_values),
};

static TIMEOUT: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Duration before the search times out",
    negated_description: None,
    discrete_values: None,
};

static TYPE: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Limit results to the specified type",
    negated_description: None,
    discrete_values: Some(result_type_values),
};

static VISIBILITY: FilterDefinition = FilterDefinition {
    aliases: &[],
    negatable: false,
    description: "Include results from repositories with the matching visibility",
    negated_description: None,
    discrete_values: Some(visibility_values),
};
