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

//! Search-query tooling for Sourcegraph-style code search.
//!
//! This facade re-exports the full API of [`srcql_core`] and
//! [`srcql_ide`] and adds document-level helpers for clients holding
//! multi-line query documents:
//!
//! - [`scan_document`]: scan every line of a document.
//! - [`decorate_document`]: scan and decorate every line for semantic
//!   highlighting.
//! - [`completion_at`]: completions at a `(line, character)` cursor.
//! - [`semantic_token_type`]: map decoration kinds onto LSP semantic
//!   token types.
//!
//! # Examples
//!
//! ```
//! use srcql::{completion_at, decorate_document};
//!
//! let document = "// service queries\nrepo:^github\\.com/foo/bar$ lang:";
//! let decorated = decorate_document(document)?;
//! assert_eq!(decorated.len(), 2);
//!
//! let list = completion_at(document, 1, 32)?.unwrap();
//! assert!(list.items.iter().any(|item| item.label == "go"));
//! # Ok::<(), srcql::QueryError>(())
//! ```

use lsp_types::SemanticTokenType;
use thiserror::Error;

pub use srcql_core::filters;
pub use srcql_core::lex;
pub use srcql_core::lex::{PatternKind, ScanError, Token};
pub use srcql_core::uri;
pub use srcql_core::uri::SourcegraphUri;
pub use srcql_core::{Position, PositionRange};
pub use srcql_ide::{
    completion_items, decorate, CompletionError, DecoratedToken, DecorationKind,
};

/// Failures of the document-level helpers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A line failed to scan.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// Completion failed at the requested cursor.
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// The requested line does not exist in the document.
    #[error("line {line} is out of bounds")]
    LineOutOfBounds {
        /// Zero-based line that was requested.
        line: u32,
    },
}

/// Splits on `\n`, tolerating `\r\n` documents.
fn document_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Scans every line of a document. Line `i` of the result holds the
/// tokens of line `i` of the document; ranges restart at 0 on each line.
///
/// # Errors
///
/// Propagates [`ScanError`], which cannot occur for lines produced by
/// splitting on line terminators.
pub fn scan_document(
    text: &str,
    interpret_comments: bool,
    pattern_type: PatternKind,
) -> Result<Vec<Vec<Token>>, ScanError> {
    document_lines(text)
        .map(|line| lex::scan(line, interpret_comments, pattern_type))
        .collect()
}

/// Scans and decorates every line of a document for semantic
/// highlighting, with comments interpreted and patterns read as regular
/// expressions, matching how highlighting clients scan.
pub fn decorate_document(text: &str) -> Result<Vec<Vec<DecoratedToken>>, QueryError> {
    let lines = scan_document(text, true, PatternKind::Regexp)?;
    Ok(lines
        .iter()
        .map(|tokens| tokens.iter().flat_map(decorate).collect())
        .collect())
}

/// Completion items at a zero-based `(line, character)` cursor in a
/// document, scanned the way interactive query inputs are: comments
/// interpreted, patterns literal.
///
/// # Errors
///
/// Returns [`QueryError::LineOutOfBounds`] for a line the document does
/// not have, and propagates completion failures for a cursor past the
/// end of its line.
pub fn completion_at(
    text: &str,
    line: u32,
    character: usize,
) -> Result<Option<lsp_types::CompletionList>, QueryError> {
    let line_text = document_lines(text)
        .nth(line as usize)
        .ok_or(QueryError::LineOutOfBounds { line })?;
    let tokens = lex::scan(line_text, true, PatternKind::Literal)?;
    Ok(completion_items(&tokens, character, false, false)?)
}

/// LSP semantic token type for a decoration kind. `None` for kinds the
/// highlighting theme leaves unstyled (plain patterns).
pub fn semantic_token_type(kind: DecorationKind) -> Option<SemanticTokenType> {
    match kind {
        DecorationKind::OpeningParen | DecorationKind::ClosingParen => {
            Some(SemanticTokenType::NAMESPACE)
        }
        DecorationKind::Comment => Some(SemanticTokenType::COMMENT),
        DecorationKind::Field => Some(SemanticTokenType::PROPERTY),
        DecorationKind::Keyword => Some(SemanticTokenType::KEYWORD),
        DecorationKind::Literal => Some(SemanticTokenType::NUMBER),
        DecorationKind::MetaPath => Some(SemanticTokenType::REGEXP),
        DecorationKind::MetaContextPrefix
        | DecorationKind::MetaPredicate
        | DecorationKind::MetaRegexp
        | DecorationKind::MetaRepoRevisionSeparator
        | DecorationKind::MetaRevision => Some(SemanticTokenType::INTERFACE),
        DecorationKind::Pattern => None,
    }
}
