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

//! Token types produced by the search-query scanner.
//!
//! Tokens carry their exact half-open character range `[start, end)` in the
//! scanned line, measured in UTF-16 code units so that ranges line up with
//! editor positions. Token ranges never overlap, and concatenating the
//! source substrings they name (whitespace included) reconstructs the
//! original line exactly.

use std::fmt;

/// A half-open `[start, end)` range of character offsets within one line.
///
/// Offsets are UTF-16 code units, matching the position model used by
/// editor ranges.
///
/// # Examples
///
/// ```
/// use srcql_core::lex::Range;
///
/// let range = Range::new(4, 9);
/// assert_eq!(range.len(), 5);
/// assert!(range.contains(4));
/// assert!(!range.contains(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Range {
    /// Creates a new range.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of UTF-16 code units covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` falls inside the half-open interval.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Interpretation applied to pattern tokens.
///
/// The scanner only demarcates pattern substrings; it never compiles
/// regular expressions or structural templates itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternKind {
    /// Patterns match as literal substrings.
    Literal,
    /// Patterns match as regular expressions.
    Regexp,
    /// Patterns match as structural-search templates.
    Structural,
}

/// A raw text run with its source range; used for filter field names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    /// The text as written, including a leading `-` for negated fields.
    pub value: String,
    /// Source range of the text.
    pub range: Range,
}

impl Literal {
    /// Creates a new literal.
    #[inline]
    pub fn new(value: impl Into<String>, range: Range) -> Self {
        Self {
            value: value.into(),
            range,
        }
    }
}

/// Shape of a filter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Bare (unquoted) value text.
    Literal,
    /// Value wrapped in single or double quotes.
    Quoted,
}

/// The value side of a `field:value` filter.
///
/// For quoted values, `value` holds the inner text while `range` covers
/// the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterValue {
    /// Whether the value was bare or quoted.
    pub kind: ValueKind,
    /// The value text (quotes stripped for quoted values).
    pub value: String,
    /// Source range, including quotes for quoted values.
    pub range: Range,
}

/// A `field:value` query term restricting results (e.g. `repo:foo`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    /// Field name as written, including a leading `-` when negated.
    pub field: Literal,
    /// Optional value after the colon; `repo:` alone has none.
    pub value: Option<FilterValue>,
    /// `true` when the field carried a leading `-`.
    pub negated: bool,
    /// Range of the whole filter, field through value.
    pub range: Range,
}

/// Boolean query operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorKind {
    And,
    Or,
    Not,
}

impl OperatorKind {
    /// The lowercase keyword as it appears in query text.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Not => "not",
        }
    }

    /// Recognizes a standalone operator word. Case-sensitive.
    #[inline]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "and" => Some(OperatorKind::And),
            "or" => Some(OperatorKind::Or),
            "not" => Some(OperatorKind::Not),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexical element of a search query line.
///
/// Produced in left-to-right source order by [`crate::lex::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A run of spaces and tabs.
    Whitespace { range: Range },
    /// A `//` comment consuming the rest of the line.
    Comment { value: String, range: Range },
    /// A single `(` outside any quoted value.
    OpenParen { range: Range },
    /// A single `)` outside any quoted value.
    CloseParen { range: Range },
    /// A standalone `and`/`or`/`not` keyword.
    Operator { kind: OperatorKind, range: Range },
    /// A quoted string outside filter position. `closed` is `false` for an
    /// unterminated quote that consumed to end of input.
    Quoted {
        value: String,
        range: Range,
        closed: bool,
    },
    /// Free-text search term, interpreted per its [`PatternKind`].
    Pattern {
        value: String,
        kind: PatternKind,
        range: Range,
    },
    /// A recognized `field:value` term.
    Filter(Filter),
}

impl Token {
    /// Source range of the whole token.
    pub fn range(&self) -> Range {
        match self {
            Token::Whitespace { range }
            | Token::Comment { range, .. }
            | Token::OpenParen { range }
            | Token::CloseParen { range }
            | Token::Operator { range, .. }
            | Token::Quoted { range, .. }
            | Token::Pattern { range, .. } => *range,
            Token::Filter(filter) => filter.range,
        }
    }

    /// Returns `true` for whitespace tokens.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace { .. })
    }

    /// Returns the filter payload if this is a filter token.
    #[inline]
    pub fn as_filter(&self) -> Option<&Filter> {
        match self {
            Token::Filter(filter) => Some(filter),
            _ => None,
        }
    }
}
