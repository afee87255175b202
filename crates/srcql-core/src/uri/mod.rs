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

//! The `sourcegraph://` URI model.
//!
//! A [`SourcegraphUri`] names a location on a Sourcegraph instance:
//!
//! ```text
//! sourcegraph://HOST/REPOSITORY@REVISION/-/blob/PATH?L1337:42
//! ```
//!
//! The `/-/` separator splits the repository (optionally `@revision`) from
//! a `blob`, `tree`, `commit`, or `compare` suffix. Parsing accepts
//! `https://` URLs interchangeably and always re-renders a canonical
//! `sourcegraph://` text form. The model is immutable; derivations like
//! [`SourcegraphUri::with_path`] return new values.

pub mod fragment;

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

use crate::position::Position;
use fragment::parse_query_and_hash;

/// A `base...head` revision pair from a `/-/compare/` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareRange {
    /// Base revision of the comparison.
    pub base: String,
    /// Head revision of the comparison.
    pub head: String,
}

/// Optional parts for [`SourcegraphUri::from_parts`] and
/// [`SourcegraphUri::with`].
#[derive(Debug, Clone, Default)]
pub struct Optionals {
    pub revision: Option<String>,
    pub path: Option<String>,
    pub position: Option<Position>,
    pub is_directory: bool,
    pub is_commit: bool,
    pub compare_range: Option<CompareRange>,
}

/// Failures turning text into a [`SourcegraphUri`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UriError {
    /// The text was not a well-formed URL at all.
    #[error("invalid URL {uri:?}: {source}")]
    InvalidUrl {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL carried no host, so no Sourcegraph instance is named.
    #[error("URL {uri:?} has no host")]
    MissingHost { uri: String },
}

/// An immutable, parsed `sourcegraph://` location.
///
/// # Examples
///
/// ```
/// use srcql_core::uri::SourcegraphUri;
///
/// let uri = SourcegraphUri::parse(
///     "https://sourcegraph.com/github.com/gorilla/mux@v1.8.0/-/blob/mux.go?L42:7",
/// )
/// .unwrap();
/// assert_eq!(uri.host(), "sourcegraph.com");
/// assert_eq!(uri.repository_name(), "github.com/gorilla/mux");
/// assert_eq!(uri.revision(), Some("v1.8.0"));
/// assert_eq!(uri.path(), Some("mux.go"));
/// assert!(uri.is_file());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcegraphUri {
    uri: String,
    host: String,
    repository_name: String,
    // Empty string means no revision, matching the falsy checks the text
    // form is built with.
    revision: String,
    path: Option<String>,
    position: Option<Position>,
    compare_range: Option<CompareRange>,
}

const TREE_SEPARATOR: &str = "/-/tree/";
const BLOB_SEPARATOR: &str = "/-/blob/";
const COMMIT_SEPARATOR: &str = "/-/commit/";
const COMPARE_SEPARATOR: &str = "/-/compare/";

impl SourcegraphUri {
    /// Parses a `sourcegraph://` or `https://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`UriError`] when the text is not a URL or names no host.
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let uri = uri.replacen("https://", "sourcegraph://", 1);
        let as_https = uri.replacen("sourcegraph://", "https://", 1);
        let url = Url::parse(&as_https).map_err(|source| UriError::InvalidUrl {
            uri: uri.clone(),
            source,
        })?;
        let host = match url.host_str() {
            Some(host) => match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            },
            None => return Err(UriError::MissingHost { uri }),
        };

        let mut pathname = url.path().trim_start_matches('/');
        if let Some(trimmed) = pathname.strip_suffix('/') {
            pathname = trimmed;
        }

        // Everything before the first `/-/` is `repository[@revision]`;
        // the revision may itself contain slashes.
        let repo_revision = match pathname.find("/-/") {
            Some(index) => &pathname[..index],
            None => pathname,
        };
        let (repository_name, mut revision) = match repo_revision.split_once('@') {
            Some((repository, revision)) => {
                (percent_decode(repository), Some(percent_decode(revision)))
            }
            None => (percent_decode(repo_revision), None),
        };

        let mut path = None;
        for separator in [TREE_SEPARATOR, BLOB_SEPARATOR, COMMIT_SEPARATOR] {
            if let Some(index) = pathname.find(separator) {
                path = Some(percent_decode(&pathname[index + separator.len()..]));
            }
        }
        let compare_range = pathname.find(COMPARE_SEPARATOR).and_then(|index| {
            let range = &pathname[index + COMPARE_SEPARATOR.len()..];
            let mut parts = range.split("...");
            match (parts.next(), parts.next(), parts.next()) {
                (Some(base), Some(head), None) => Some(CompareRange {
                    base: base.to_string(),
                    head: head.to_string(),
                }),
                _ => None,
            }
        });

        let parsed = parse_query_and_hash(url.query(), url.fragment());
        // Well-formed URLs carry 1-indexed lines; line 0 is treated as no
        // position at all.
        let position = parsed
            .lpr
            .filter(|lpr| lpr.line() != 0)
            .map(|lpr| lpr.start_position());

        let is_directory = uri.contains(TREE_SEPARATOR);
        let is_commit = uri.contains(COMMIT_SEPARATOR);
        if is_commit {
            // A commit URL's revision is the oid path segment right after
            // the separator; whatever follows it is the file path.
            if let Some(index) = url.path().find(COMMIT_SEPARATOR) {
                let after = &url.path()[index + COMMIT_SEPARATOR.len()..];
                let oid = after.split('/').next().unwrap_or(after);
                path = path.map(|p| p.get(oid.len() + 1..).unwrap_or("").to_string());
                revision = Some(oid.to_string());
            }
        }

        Ok(Self::from_parts(
            &host,
            &repository_name,
            Optionals {
                revision,
                path,
                position,
                is_directory,
                is_commit,
                compare_range,
            },
        ))
    }

    /// Assembles a URI from parts without going through text parsing.
    /// Never fails; nonsense parts produce a nonsense URI.
    pub fn from_parts(host: &str, repository_name: &str, optional: Optionals) -> Self {
        let revision = optional.revision.unwrap_or_default();
        let revision_part = if !revision.is_empty() && !optional.is_commit {
            format!("@{revision}")
        } else {
            String::new()
        };
        let directory_part = if optional.is_directory {
            "tree"
        } else if optional.is_commit {
            "commit"
        } else if optional.compare_range.is_some() {
            "compare"
        } else {
            "blob"
        };
        let path_part = if let Some(range) = &optional.compare_range {
            format!("{COMPARE_SEPARATOR}{}...{}", range.base, range.head)
        } else if optional.is_commit && !revision.is_empty() {
            format!("{COMMIT_SEPARATOR}{revision}")
        } else {
            match &optional.path {
                Some(path) if !path.is_empty() => format!("/-/{directory_part}/{path}"),
                _ => String::new(),
            }
        };
        let uri = format!("sourcegraph://{host}/{repository_name}{revision_part}{path_part}");
        Self {
            uri,
            host: host.to_string(),
            repository_name: repository_name.to_string(),
            revision,
            path: optional.path,
            position: optional.position,
            compare_range: optional.compare_range,
        }
    }

    // ==================== Accessors ====================

    /// The canonical `sourcegraph://` text form. Excludes any position.
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Instance host, with port when one was given.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Repository name, e.g. `github.com/gorilla/mux`.
    #[inline]
    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    /// Revision, when one was given. For commit URIs this is the commit
    /// oid.
    #[inline]
    pub fn revision(&self) -> Option<&str> {
        (!self.revision.is_empty()).then_some(self.revision.as_str())
    }

    /// File or directory path within the repository, when one was given.
    /// A commit URI pointing at the commit itself has `Some("")`.
    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Position carried by the URL's query or hash.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Compare range of a `/-/compare/` URI.
    #[inline]
    pub fn compare_range(&self) -> Option<&CompareRange> {
        self.compare_range.as_ref()
    }

    /// Returns `true` for `/-/blob/` URIs.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.uri.contains(BLOB_SEPARATOR)
    }

    /// Returns `true` for `/-/tree/` URIs.
    #[inline]
    pub fn is_directory(&self) -> bool {
        self.uri.contains(TREE_SEPARATOR)
    }

    /// Returns `true` for `/-/commit/` URIs.
    #[inline]
    pub fn is_commit(&self) -> bool {
        self.uri.contains(COMMIT_SEPARATOR)
    }

    /// Returns `true` for `/-/compare/` URIs with a well-formed range.
    #[inline]
    pub fn is_compare(&self) -> bool {
        self.uri.contains(COMPARE_SEPARATOR) && self.compare_range.is_some()
    }

    // ==================== Derivations ====================

    /// The same blob location at a different revision. Drops tree, commit,
    /// and compare qualities; keeps path and position.
    pub fn with_revision(&self, new_revision: Option<&str>) -> Result<Self, UriError> {
        let revision_part = match new_revision {
            Some(revision) if !revision.is_empty() => format!("@{revision}"),
            _ => String::new(),
        };
        Self::parse(&format!(
            "sourcegraph://{}/{}{}{}{}{}",
            self.host,
            self.repository_name,
            revision_part,
            BLOB_SEPARATOR,
            self.path.as_deref().unwrap_or(""),
            self.position_suffix(),
        ))
    }

    /// A different file in the same repository at the same revision.
    pub fn with_path(&self, new_path: &str) -> Result<Self, UriError> {
        Self::parse(&format!(
            "{}{}{}{}",
            self.repository_uri(),
            BLOB_SEPARATOR,
            new_path,
            self.position_suffix(),
        ))
    }

    /// Rebuilds with selected parts replaced. `revision`, `path`,
    /// `position`, and `compare_range` default to this URI's values when
    /// `None`; the two flags are taken from `optionals` as passed.
    pub fn with(&self, optionals: Optionals) -> Self {
        Self::from_parts(
            &self.host,
            &self.repository_name,
            Optionals {
                revision: optionals.revision.or_else(|| self.revision().map(String::from)),
                path: optionals.path.or_else(|| self.path.clone()),
                position: optionals.position.or(self.position),
                compare_range: optionals.compare_range.or_else(|| self.compare_range.clone()),
                is_directory: optionals.is_directory,
                is_commit: optionals.is_commit,
            },
        )
    }

    /// The same location as a directory or file. Drops any compare range.
    pub fn with_is_directory(&self, is_directory: bool) -> Self {
        Self::from_parts(
            &self.host,
            &self.repository_name,
            Optionals {
                is_directory,
                path: self.path.clone(),
                revision: self.revision().map(String::from),
                position: self.position,
                ..Optionals::default()
            },
        )
    }

    /// Final path segment, or the empty string without a path.
    pub fn basename(&self) -> &str {
        let path = self.path.as_deref().unwrap_or("");
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Path with the final segment removed; empty for top-level paths.
    pub fn dirname(&self) -> &str {
        let path = self.path.as_deref().unwrap_or("");
        match path.rfind('/') {
            Some(index) => &path[..index],
            None => "",
        }
    }

    /// URI of the containing directory, or of the repository for
    /// top-level paths. `None` when this URI has no path at all.
    pub fn parent_uri(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        match self.uri.rfind('/') {
            Some(slash) if path.contains('/') => {
                Some(self.uri[..slash].replacen(BLOB_SEPARATOR, TREE_SEPARATOR, 1))
            }
            _ => Some(format!(
                "sourcegraph://{}/{}{}",
                self.host,
                self.repository_name,
                self.revision_part()
            )),
        }
    }

    /// URI of the repository root at this revision.
    pub fn repository_uri(&self) -> String {
        format!(
            "sourcegraph://{}/{}{}",
            self.host,
            self.repository_name,
            self.revision_part()
        )
    }

    /// Label for a file-tree entry: the path relative to `parent`, the
    /// whole path without one, or `repository@revision` for the root.
    pub fn tree_item_label(&self, parent: Option<&SourcegraphUri>) -> String {
        match self.path.as_deref().filter(|path| !path.is_empty()) {
            Some(path) => match parent.and_then(|p| p.path()).filter(|p| !p.is_empty()) {
                Some(parent_path) => path
                    .get(parent_path.len() + 1..)
                    .unwrap_or("")
                    .to_string(),
                None => path.to_string(),
            },
            None => format!("{}{}", self.repository_name, self.revision_part()),
        }
    }

    /// `@revision`, or the empty string without a revision.
    pub fn revision_part(&self) -> String {
        if self.revision.is_empty() {
            String::new()
        } else {
            format!("@{}", self.revision)
        }
    }

    /// `?L{line}:{character}`, or the empty string without a position.
    pub fn position_suffix(&self) -> String {
        match self.position {
            Some(position) => format!("?L{}:{}", position.line, position.character),
            None => String::new(),
        }
    }
}

impl fmt::Display for SourcegraphUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

fn percent_decode(text: &str) -> String {
    match percent_decode_str(text).decode_utf8() {
        Ok(Cow::Borrowed(_)) => text.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        // Undecodable bytes keep their escaped spelling.
        Err(_) => text.to_string(),
    }
}
