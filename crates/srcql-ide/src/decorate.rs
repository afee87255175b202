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

//! Fine-grained token decoration for syntax highlighting.
//!
//! [`decorate`] refines one scanner token into zero or more decorated
//! sub-ranges. Filter values get the most attention: repository patterns
//! split into pattern, `@`, and revision parts; path-like values
//! distinguish separators and regexp metacharacters; `repo:contains(...)`
//! predicates highlight the predicate name. Decorated ranges stay inside
//! the token's range and never overlap.

use srcql_core::filters::{resolve_filter, FilterKind};
use srcql_core::lex::{Filter, Range, Token, ValueKind};

/// Highlighting class of a decorated sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// A `(` grouping token.
    OpeningParen,
    /// A `)` grouping token.
    ClosingParen,
    /// A `//` comment.
    Comment,
    /// A filter's field name, including any leading `-`.
    Field,
    /// An `and`/`or`/`not` operator.
    Keyword,
    /// Plain value text.
    Literal,
    /// The `@` introducing a `context:` value.
    MetaContextPrefix,
    /// A `/` separator in a path-like value.
    MetaPath,
    /// A predicate name such as `contains.file` in a `repo:` value.
    MetaPredicate,
    /// A regular-expression metacharacter or escape.
    MetaRegexp,
    /// The `@` separating a repository pattern from its revision.
    MetaRepoRevisionSeparator,
    /// A revision name after `@` or in a `rev:` value.
    MetaRevision,
    /// A free-text search pattern.
    Pattern,
}

/// A classified sub-range of one scanner token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratedToken {
    /// Absolute UTF-16 range within the scanned line.
    pub range: Range,
    /// Highlighting class.
    pub kind: DecorationKind,
}

impl DecoratedToken {
    const fn new(range: Range, kind: DecorationKind) -> Self {
        Self { range, kind }
    }
}

/// Refines one token into decorated sub-ranges. Whitespace decorates to
/// nothing; most tokens to a single range; filters to a field range plus
/// value ranges.
pub fn decorate(token: &Token) -> Vec<DecoratedToken> {
    match token {
        Token::Whitespace { .. } => Vec::new(),
        Token::Comment { range, .. } => vec![DecoratedToken::new(*range, DecorationKind::Comment)],
        Token::OpenParen { range } => {
            vec![DecoratedToken::new(*range, DecorationKind::OpeningParen)]
        }
        Token::CloseParen { range } => {
            vec![DecoratedToken::new(*range, DecorationKind::ClosingParen)]
        }
        Token::Operator { range, .. } => {
            vec![DecoratedToken::new(*range, DecorationKind::Keyword)]
        }
        Token::Quoted { range, .. } => vec![DecoratedToken::new(*range, DecorationKind::Literal)],
        Token::Pattern { range, .. } => vec![DecoratedToken::new(*range, DecorationKind::Pattern)],
        Token::Filter(filter) => decorate_filter(filter),
    }
}

fn decorate_filter(filter: &Filter) -> Vec<DecoratedToken> {
    let mut decorated = vec![DecoratedToken::new(filter.field.range, DecorationKind::Field)];
    let value = match &filter.value {
        Some(value) => value,
        None => return decorated,
    };
    // Quoted values read as one literal; only bare values are split up.
    if value.kind == ValueKind::Quoted {
        decorated.push(DecoratedToken::new(value.range, DecorationKind::Literal));
        return decorated;
    }

    let kind = resolve_filter(&filter.field.value).map(|resolved| resolved.kind);
    let text = value.value.as_str();
    let start = value.range.start;
    match kind {
        Some(FilterKind::Repo) => decorated.extend(decorate_repo(text, start)),
        Some(FilterKind::File) | Some(FilterKind::RepoHasFile) => {
            decorated.extend(decorate_path(text, start));
        }
        Some(FilterKind::Rev) => {
            decorated.push(DecoratedToken::new(value.range, DecorationKind::MetaRevision));
        }
        Some(FilterKind::Context) => decorated.extend(decorate_context(text, start)),
        _ => decorated.push(DecoratedToken::new(value.range, DecorationKind::Literal)),
    }
    decorated
}

const PREDICATE_NAMES: [&str; 4] = [
    // Longest first, so `contains` never shadows its dotted forms.
    "contains.commit.after",
    "contains.content",
    "contains.file",
    "contains",
];

/// `repo:` values: a `name(...)` predicate, or a pattern with an optional
/// `@revision` suffix.
fn decorate_repo(text: &str, start: usize) -> Vec<DecoratedToken> {
    if let Some(decorated) = decorate_predicate(text, start) {
        return decorated;
    }
    match find_unescaped(text, '@') {
        Some(at) => {
            let pattern = &text[..at];
            let revision = &text[at + 1..];
            let mut decorated = decorate_path(pattern, start);
            let at_start = start + utf16_len(pattern);
            decorated.push(DecoratedToken::new(
                Range::new(at_start, at_start + 1),
                DecorationKind::MetaRepoRevisionSeparator,
            ));
            if !revision.is_empty() {
                decorated.push(DecoratedToken::new(
                    Range::new(at_start + 1, at_start + 1 + utf16_len(revision)),
                    DecorationKind::MetaRevision,
                ));
            }
            decorated
        }
        None => decorate_path(text, start),
    }
}

/// Recognizes `name(body)` for the known predicate names.
fn decorate_predicate(text: &str, start: usize) -> Option<Vec<DecoratedToken>> {
    let name = PREDICATE_NAMES
        .iter()
        .find(|name| text.starts_with(**name))?;
    let rest = &text[name.len()..];
    if !(rest.starts_with('(') && rest.ends_with(')') && rest.len() >= 2) {
        return None;
    }
    let name_end = start + utf16_len(name);
    Some(vec![
        DecoratedToken::new(Range::new(start, name_end), DecorationKind::MetaPredicate),
        DecoratedToken::new(
            Range::new(name_end, name_end + utf16_len(rest)),
            DecorationKind::Literal,
        ),
    ])
}

/// Path-like values: `/` separators, regexp metacharacters and escapes,
/// literal runs. Adjacent same-kind characters merge into one range.
fn decorate_path(text: &str, start: usize) -> Vec<DecoratedToken> {
    let chars: Vec<char> = text.chars().collect();
    let mut decorated: Vec<DecoratedToken> = Vec::new();
    let mut offset = start;
    let mut i = 0;
    while i < chars.len() {
        let (kind, width) = if chars[i] == '\\' && i + 1 < chars.len() {
            let width = chars[i].len_utf16() + chars[i + 1].len_utf16();
            i += 2;
            (DecorationKind::MetaRegexp, width)
        } else {
            let c = chars[i];
            let kind = if ".*+?^$()[]|{}".contains(c) {
                DecorationKind::MetaRegexp
            } else if c == '/' {
                DecorationKind::MetaPath
            } else {
                DecorationKind::Literal
            };
            i += 1;
            (kind, c.len_utf16())
        };
        match decorated.last_mut() {
            Some(last) if last.kind == kind && last.range.end == offset => {
                last.range.end += width;
            }
            _ => decorated.push(DecoratedToken::new(
                Range::new(offset, offset + width),
                kind,
            )),
        }
        offset += width;
    }
    decorated
}

/// `context:` values: a highlighted `@` prefix, then the context name.
fn decorate_context(text: &str, start: usize) -> Vec<DecoratedToken> {
    match text.strip_prefix('@') {
        Some(name) => {
            let mut decorated = vec![DecoratedToken::new(
                Range::new(start, start + 1),
                DecorationKind::MetaContextPrefix,
            )];
            if !name.is_empty() {
                decorated.push(DecoratedToken::new(
                    Range::new(start + 1, start + 1 + utf16_len(name)),
                    DecorationKind::Literal,
                ));
            }
            decorated
        }
        None => vec![DecoratedToken::new(
            Range::new(start, start + utf16_len(text)),
            DecorationKind::Literal,
        )],
    }
}

/// Byte index of the first unescaped occurrence of `needle`.
fn find_unescaped(text: &str, needle: char) -> Option<usize> {
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == needle {
            return Some(index);
        }
    }
    None
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcql_core::lex::{scan, PatternKind};

    fn decorate_line(line: &str) -> Vec<DecoratedToken> {
        scan(line, true, PatternKind::Regexp)
            .unwrap()
            .iter()
            .flat_map(decorate)
            .collect()
    }

    fn kinds(decorated: &[DecoratedToken]) -> Vec<DecorationKind> {
        decorated.iter().map(|token| token.kind).collect()
    }

    fn assert_well_formed(line: &str, decorated: &[DecoratedToken]) {
        let total: usize = line.chars().map(char::len_utf16).sum();
        let mut previous_end = 0;
        for token in decorated {
            assert!(token.range.start >= previous_end, "overlap in {line:?}");
            assert!(token.range.end <= total, "out of bounds in {line:?}");
            assert!(token.range.start < token.range.end, "empty range in {line:?}");
            previous_end = token.range.end;
        }
    }

    // ==================== Simple token tests ====================

    #[test]
    fn test_whitespace_decorates_to_nothing() {
        assert!(decorate_line("   ").is_empty());
    }

    #[test]
    fn test_simple_tokens() {
        let decorated = decorate_line("(a or b) // done");
        assert_eq!(
            kinds(&decorated),
            vec![
                DecorationKind::OpeningParen,
                DecorationKind::Pattern,
                DecorationKind::Keyword,
                DecorationKind::Pattern,
                DecorationKind::ClosingParen,
                DecorationKind::Comment,
            ]
        );
        assert_well_formed("(a or b) // done", &decorated);
    }

    #[test]
    fn test_quoted_is_literal() {
        let decorated = decorate_line("\"exact\"");
        assert_eq!(kinds(&decorated), vec![DecorationKind::Literal]);
    }

    // ==================== Filter value tests ====================

    #[test]
    fn test_plain_filter_value() {
        let decorated = decorate_line("lang:go");
        assert_eq!(
            kinds(&decorated),
            vec![DecorationKind::Field, DecorationKind::Literal]
        );
        assert_eq!(decorated[0].range, Range::new(0, 4));
        assert_eq!(decorated[1].range, Range::new(5, 7));
    }

    #[test]
    fn test_filter_without_value() {
        let decorated = decorate_line("repo:");
        assert_eq!(kinds(&decorated), vec![DecorationKind::Field]);
    }

    #[test]
    fn test_quoted_filter_value_is_one_literal() {
        let line = "message:\"a/b.c\"";
        let decorated = decorate_line(line);
        assert_eq!(
            kinds(&decorated),
            vec![DecorationKind::Field, DecorationKind::Literal]
        );
        // The literal covers the quotes.
        assert_eq!(decorated[1].range, Range::new(8, 15));
    }

    #[test]
    fn test_negated_field_includes_dash() {
        let decorated = decorate_line("-repo:foo");
        assert_eq!(decorated[0].kind, DecorationKind::Field);
        assert_eq!(decorated[0].range, Range::new(0, 6));
    }

    // ==================== repo: value tests ====================

    #[test]
    fn test_repo_with_revision() {
        let line = "repo:^github\\.com/foo$@v1.8";
        let decorated = decorate_line(line);
        let kinds = kinds(&decorated);
        assert_eq!(kinds[0], DecorationKind::Field);
        assert!(kinds.contains(&DecorationKind::MetaRepoRevisionSeparator));
        assert_eq!(*kinds.last().unwrap(), DecorationKind::MetaRevision);
        // The separator is exactly one unit wide.
        let separator = decorated
            .iter()
            .find(|token| token.kind == DecorationKind::MetaRepoRevisionSeparator)
            .unwrap();
        assert_eq!(separator.range.len(), 1);
        assert_well_formed(line, &decorated);
    }

    #[test]
    fn test_repo_pattern_classification() {
        // repo:^foo/bar$  ->  ^ regexp, foo literal, / path, bar literal, $ regexp
        let decorated = decorate_line("repo:^foo/bar$");
        assert_eq!(
            kinds(&decorated),
            vec![
                DecorationKind::Field,
                DecorationKind::MetaRegexp,
                DecorationKind::Literal,
                DecorationKind::MetaPath,
                DecorationKind::Literal,
                DecorationKind::MetaRegexp,
            ]
        );
    }

    #[test]
    fn test_repo_predicate() {
        // The scanner stops filter values at parens, so a predicate value
        // reaches the decorator on constructed tokens (quoted input or a
        // client passing its own token).
        let token = Token::Filter(Filter {
            field: srcql_core::lex::Literal::new("repo", Range::new(0, 4)),
            value: Some(srcql_core::lex::FilterValue {
                kind: ValueKind::Literal,
                value: "contains.file(README.md)".to_string(),
                range: Range::new(5, 29),
            }),
            negated: false,
            range: Range::new(0, 29),
        });
        let decorated = decorate(&token);
        assert_eq!(
            kinds(&decorated),
            vec![
                DecorationKind::Field,
                DecorationKind::MetaPredicate,
                DecorationKind::Literal,
            ]
        );
        // Predicate name range covers "contains.file".
        assert_eq!(decorated[1].range, Range::new(5, 18));
        assert_eq!(decorated[2].range, Range::new(18, 29));
    }

    #[test]
    fn test_repo_predicate_requires_parens() {
        // No parenthesized body: not a predicate, classified as a pattern.
        let decorated = decorate_line("repo:contains.file");
        assert!(!kinds(&decorated).contains(&DecorationKind::MetaPredicate));
    }

    #[test]
    fn test_repo_escaped_at_not_a_separator() {
        let decorated = decorate_line("repo:foo\\@bar");
        assert!(!kinds(&decorated).contains(&DecorationKind::MetaRepoRevisionSeparator));
    }

    // ==================== Other filter value tests ====================

    #[test]
    fn test_file_path_classification() {
        let decorated = decorate_line("file:src/.*\\.go$");
        let kinds = kinds(&decorated);
        assert!(kinds.contains(&DecorationKind::MetaPath));
        assert!(kinds.contains(&DecorationKind::MetaRegexp));
        assert_well_formed("file:src/.*\\.go$", &decorated);
    }

    #[test]
    fn test_adjacent_regexp_chars_merge() {
        let decorated = decorate_line("file:a.*b");
        // `.` and `*` merge into one MetaRegexp range.
        assert_eq!(
            kinds(&decorated),
            vec![
                DecorationKind::Field,
                DecorationKind::Literal,
                DecorationKind::MetaRegexp,
                DecorationKind::Literal,
            ]
        );
        assert_eq!(decorated[2].range, Range::new(6, 8));
    }

    #[test]
    fn test_rev_value_is_revision() {
        let decorated = decorate_line("rev:feature/x");
        assert_eq!(
            kinds(&decorated),
            vec![DecorationKind::Field, DecorationKind::MetaRevision]
        );
    }

    #[test]
    fn test_context_prefix() {
        let decorated = decorate_line("context:@global");
        assert_eq!(
            kinds(&decorated),
            vec![
                DecorationKind::Field,
                DecorationKind::MetaContextPrefix,
                DecorationKind::Literal,
            ]
        );
        assert_eq!(decorated[1].range, Range::new(8, 9));
        assert_eq!(decorated[2].range, Range::new(9, 15));
    }

    #[test]
    fn test_context_without_prefix() {
        let decorated = decorate_line("context:global");
        assert_eq!(
            kinds(&decorated),
            vec![DecorationKind::Field, DecorationKind::Literal]
        );
    }

    // ==================== Structure tests ====================

    #[test]
    fn test_decorate_is_pure() {
        for token in scan("repo:a@b file:c/d context:@e x", true, PatternKind::Regexp).unwrap() {
            assert_eq!(decorate(&token), decorate(&token));
        }
    }

    #[test]
    fn test_decorations_stay_inside_tokens() {
        for line in [
            "repo:^github\\.com/gorilla/mux$@v1 file:mux\\.go lang:go handler",
            "context:@me -repo:fork/.* \"lit\" (a or b)",
            "repo:contains.commit.after(\"1 week ago\")",
        ] {
            assert_well_formed(line, &decorate_line(line));
        }
    }
}
