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

//! Single-pass search-query scanner.
//!
//! At each cursor position, recognizers are attempted in a fixed priority
//! order and the first match wins:
//!
//! 1. whitespace run
//! 2. comment (`//` to end of line, only when interpreting comments and at
//!    a position where a comment is permitted)
//! 3. parenthesis
//! 4. quoted value
//! 5. filter (`field:value` with a registry-recognized field)
//! 6. operator (`and`/`or`/`not` as a standalone word)
//! 7. pattern (everything else, up to the next boundary)
//!
//! Unterminated quotes and unbalanced parentheses are tokenized, not
//! rejected; a higher layer may validate the result if it cares.

use crate::filters::resolve_filter;
use crate::lex::error::{ScanError, ScanResult};
use crate::lex::tokens::{
    Filter, FilterValue, Literal, OperatorKind, PatternKind, Range, Token, ValueKind,
};

/// Scans one line of a search query into tokens.
///
/// Character offsets in the returned token ranges are UTF-16 code units.
/// Every input except one containing a line terminator succeeds; the empty
/// string yields an empty token sequence.
///
/// # Examples
///
/// ```
/// use srcql_core::lex::{scan, PatternKind, Token};
///
/// let tokens = scan("repo:foo test", true, PatternKind::Literal).unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(tokens[0], Token::Filter(_)));
/// assert!(tokens[1].is_whitespace());
/// assert!(matches!(tokens[2], Token::Pattern { .. }));
/// ```
///
/// # Errors
///
/// Returns [`ScanError::MultilineInput`] if the input contains `\n` or
/// `\r`. Callers split multi-line documents and scan per line.
pub fn scan(line: &str, interpret_comments: bool, pattern_type: PatternKind) -> ScanResult<Vec<Token>> {
    let chars: Vec<char> = line.chars().collect();

    // Prefix sums of UTF-16 widths: off[i] is the offset of chars[i],
    // off[len] the total width.
    let mut off = Vec::with_capacity(chars.len() + 1);
    let mut total = 0;
    for &c in &chars {
        off.push(total);
        total += c.len_utf16();
    }
    off.push(total);

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' || c == '\r' {
            return Err(ScanError::MultilineInput { offset: off[i] });
        }
    }

    let mut tokens: Vec<Token> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == ' ' || c == '\t' {
            let start = i;
            while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
                i += 1;
            }
            tokens.push(Token::Whitespace {
                range: Range::new(off[start], off[i]),
            });
            continue;
        }

        // A comment is only permitted at start of line or after whitespace.
        if interpret_comments
            && c == '/'
            && chars.get(i + 1) == Some(&'/')
            && tokens.last().map_or(true, Token::is_whitespace)
        {
            let start = i;
            let value: String = chars[i..].iter().collect();
            i = chars.len();
            tokens.push(Token::Comment {
                value,
                range: Range::new(off[start], off[i]),
            });
            continue;
        }

        if c == '(' {
            tokens.push(Token::OpenParen {
                range: Range::new(off[i], off[i + 1]),
            });
            i += 1;
            continue;
        }
        if c == ')' {
            tokens.push(Token::CloseParen {
                range: Range::new(off[i], off[i + 1]),
            });
            i += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            let (end, closed) = quoted_end(&chars, i);
            let inner_end = if closed { end - 1 } else { end };
            let value: String = chars[i + 1..inner_end].iter().collect();
            tokens.push(Token::Quoted {
                value,
                range: Range::new(off[i], off[end]),
                closed,
            });
            i = end;
            continue;
        }

        // Word run: maximal span up to whitespace or an unescaped paren.
        let word_start = i;
        let mut j = i;
        while j < chars.len() {
            let w = chars[j];
            if w == ' ' || w == '\t' {
                break;
            }
            if (w == '(' || w == ')') && !is_escaped(&chars, j) {
                break;
            }
            j += 1;
        }

        let colon = (word_start..j).find(|&k| chars[k] == ':' && !is_escaped(&chars, k));
        if let Some(colon) = colon {
            let field: String = chars[word_start..colon].iter().collect();
            if resolve_filter(&field).is_some() {
                let negated = field.starts_with('-');
                let field = Literal::new(field, Range::new(off[word_start], off[colon]));
                let value_start = colon + 1;

                let (value, end) = match chars.get(value_start) {
                    Some(&q) if q == '"' || q == '\'' => {
                        let (qend, closed) = quoted_end(&chars, value_start);
                        let inner_end = if closed { qend - 1 } else { qend };
                        let text: String = chars[value_start + 1..inner_end].iter().collect();
                        (
                            Some(FilterValue {
                                kind: ValueKind::Quoted,
                                value: text,
                                range: Range::new(off[value_start], off[qend]),
                            }),
                            qend,
                        )
                    }
                    _ if value_start < j => {
                        let text: String = chars[value_start..j].iter().collect();
                        (
                            Some(FilterValue {
                                kind: ValueKind::Literal,
                                value: text,
                                range: Range::new(off[value_start], off[j]),
                            }),
                            j,
                        )
                    }
                    _ => (None, value_start),
                };

                tokens.push(Token::Filter(Filter {
                    field,
                    value,
                    negated,
                    range: Range::new(off[word_start], off[end]),
                }));
                i = end;
                continue;
            }
            // Unrecognized field name: the whole span is re-tried as a
            // pattern below, never an error.
        }

        let word: String = chars[word_start..j].iter().collect();
        if let Some(kind) = OperatorKind::from_word(&word) {
            tokens.push(Token::Operator {
                kind,
                range: Range::new(off[word_start], off[j]),
            });
        } else {
            tokens.push(Token::Pattern {
                value: word,
                kind: pattern_type,
                range: Range::new(off[word_start], off[j]),
            });
        }
        i = j;
    }

    Ok(tokens)
}

/// Finds the end of a quoted run opened at `start`. Returns the index one
/// past the closing quote and `true`, or the input length and `false` for
/// an unterminated quote.
fn quoted_end(chars: &[char], start: usize) -> (usize, bool) {
    let quote = chars[start];
    let mut k = start + 1;
    while k < chars.len() {
        if chars[k] == quote && !is_escaped(chars, k) {
            return (k + 1, true);
        }
        k += 1;
    }
    (chars.len(), false)
}

/// An occurrence at `index` is escaped when preceded by an odd number of
/// backslashes.
fn is_escaped(chars: &[char], index: usize) -> bool {
    let mut backslashes = 0;
    let mut k = index;
    while k > 0 && chars[k - 1] == '\\' {
        backslashes += 1;
        k -= 1;
    }
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_literal(line: &str) -> Vec<Token> {
        scan(line, true, PatternKind::Literal).unwrap()
    }

    fn covered(line: &str, tokens: &[Token]) -> usize {
        let total: usize = line.chars().map(char::len_utf16).sum();
        let mut offset = 0;
        for token in tokens {
            assert_eq!(token.range().start, offset, "gap before {:?}", token);
            offset = token.range().end;
        }
        assert_eq!(offset, total);
        total
    }

    // ==================== Basic recognizers ====================

    #[test]
    fn test_empty_input() {
        assert_eq!(scan_literal(""), Vec::new());
    }

    #[test]
    fn test_whitespace_run() {
        let tokens = scan_literal("  \t ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].range(), Range::new(0, 4));
        assert!(tokens[0].is_whitespace());
    }

    #[test]
    fn test_single_pattern() {
        let tokens = scan_literal("hello");
        assert_eq!(
            tokens,
            vec![Token::Pattern {
                value: "hello".to_string(),
                kind: PatternKind::Literal,
                range: Range::new(0, 5),
            }]
        );
    }

    #[test]
    fn test_pattern_kind_tagging() {
        let tokens = scan("x", false, PatternKind::Regexp).unwrap();
        assert!(matches!(
            tokens[0],
            Token::Pattern {
                kind: PatternKind::Regexp,
                ..
            }
        ));
    }

    #[test]
    fn test_multiline_rejected() {
        assert_eq!(
            scan("a\nb", true, PatternKind::Literal),
            Err(ScanError::MultilineInput { offset: 1 })
        );
    }

    // ==================== Filters ====================

    #[test]
    fn test_filter_and_pattern() {
        // repo:^github\.com/foo/bar$ test
        let line = "repo:^github\\.com/foo/bar$ test";
        let tokens = scan_literal(line);
        assert_eq!(tokens.len(), 3);
        let filter = tokens[0].as_filter().unwrap();
        assert_eq!(filter.field.value, "repo");
        assert!(!filter.negated);
        let value = filter.value.as_ref().unwrap();
        assert_eq!(value.value, "^github\\.com/foo/bar$");
        assert_eq!(value.kind, ValueKind::Literal);
        assert!(tokens[1].is_whitespace());
        assert!(matches!(&tokens[2], Token::Pattern { value, .. } if value == "test"));
        covered(line, &tokens);
    }

    #[test]
    fn test_negated_filter() {
        let tokens = scan_literal("-repo:foo");
        let filter = tokens[0].as_filter().unwrap();
        assert!(filter.negated);
        assert_eq!(filter.field.value, "-repo");
        assert_eq!(filter.field.range, Range::new(0, 5));
    }

    #[test]
    fn test_filter_alias() {
        let tokens = scan_literal("f:main.go");
        let filter = tokens[0].as_filter().unwrap();
        assert_eq!(filter.field.value, "f");
    }

    #[test]
    fn test_filter_empty_value() {
        let tokens = scan_literal("repo:");
        let filter = tokens[0].as_filter().unwrap();
        assert!(filter.value.is_none());
        assert_eq!(filter.range, Range::new(0, 5));
    }

    #[test]
    fn test_filter_quoted_value_with_spaces() {
        let line = r#"message:"fix the bug" x"#;
        let tokens = scan_literal(line);
        let filter = tokens[0].as_filter().unwrap();
        let value = filter.value.as_ref().unwrap();
        assert_eq!(value.kind, ValueKind::Quoted);
        assert_eq!(value.value, "fix the bug");
        assert_eq!(value.range, Range::new(8, 21));
        covered(line, &tokens);
    }

    #[test]
    fn test_unknown_field_is_pattern() {
        let tokens = scan_literal("foo:bar");
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "foo:bar"));
    }

    #[test]
    fn test_filter_lookup_case_sensitive() {
        let tokens = scan_literal("REPO:foo");
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "REPO:foo"));
    }

    #[test]
    fn test_escaped_colon_is_pattern() {
        let tokens = scan_literal("repo\\:foo");
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "repo\\:foo"));
    }

    // ==================== Operators and parens ====================

    #[test]
    fn test_grouped_query() {
        let line = "(repo:foo or repo:bar)";
        let tokens = scan_literal(line);
        assert!(matches!(tokens.first(), Some(Token::OpenParen { .. })));
        assert!(matches!(tokens.last(), Some(Token::CloseParen { .. })));
        let or_index = tokens
            .iter()
            .position(|t| matches!(t, Token::Operator { kind: OperatorKind::Or, .. }))
            .unwrap();
        let filters: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_filter().map(|_| i))
            .collect();
        assert_eq!(filters.len(), 2);
        assert!(filters[0] < or_index && or_index < filters[1]);
        covered(line, &tokens);
    }

    #[test]
    fn test_operator_word_boundaries() {
        let tokens = scan_literal("sandwich");
        assert!(matches!(tokens[0], Token::Pattern { .. }));

        let tokens = scan_literal("not x");
        assert!(matches!(
            tokens[0],
            Token::Operator {
                kind: OperatorKind::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_operator_uppercase_is_pattern() {
        let tokens = scan_literal("OR");
        assert!(matches!(tokens[0], Token::Pattern { .. }));
    }

    #[test]
    fn test_escaped_paren_stays_in_pattern() {
        let tokens = scan_literal("foo\\(bar\\)");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "foo\\(bar\\)"));
    }

    #[test]
    fn test_unbalanced_paren_tokenized() {
        let tokens = scan_literal("(repo:foo");
        assert!(matches!(tokens[0], Token::OpenParen { .. }));
        assert_eq!(tokens.len(), 2);
    }

    // ==================== Quotes ====================

    #[test]
    fn test_quoted_token() {
        let tokens = scan_literal(r#""exact phrase""#);
        assert_eq!(
            tokens,
            vec![Token::Quoted {
                value: "exact phrase".to_string(),
                range: Range::new(0, 14),
                closed: true,
            }]
        );
    }

    #[test]
    fn test_single_quoted_token() {
        let tokens = scan_literal("'abc'");
        assert!(matches!(&tokens[0], Token::Quoted { value, closed: true, .. } if value == "abc"));
    }

    #[test]
    fn test_unterminated_quote_consumes_rest() {
        let line = r#""no end here"#;
        let tokens = scan_literal(line);
        assert_eq!(
            tokens,
            vec![Token::Quoted {
                value: "no end here".to_string(),
                range: Range::new(0, 12),
                closed: false,
            }]
        );
        covered(line, &tokens);
    }

    #[test]
    fn test_escaped_quote_inside() {
        let tokens = scan_literal(r#""a\"b""#);
        assert!(matches!(&tokens[0], Token::Quoted { value, closed: true, .. } if value == r#"a\"b"#));
    }

    #[test]
    fn test_quote_inside_word_is_pattern() {
        let tokens = scan_literal(r#"foo"bar"#);
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "foo\"bar"));
    }

    // ==================== Comments ====================

    #[test]
    fn test_comment_at_line_start() {
        let tokens = scan_literal("// a comment");
        assert_eq!(
            tokens,
            vec![Token::Comment {
                value: "// a comment".to_string(),
                range: Range::new(0, 12),
            }]
        );
    }

    #[test]
    fn test_comment_after_whitespace() {
        let line = "repo:foo // trailing";
        let tokens = scan_literal(line);
        assert!(matches!(tokens.last(), Some(Token::Comment { .. })));
        covered(line, &tokens);
    }

    #[test]
    fn test_comment_disabled() {
        let tokens = scan("// not a comment", false, PatternKind::Literal).unwrap();
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "//"));
    }

    #[test]
    fn test_slashes_mid_word_not_comment() {
        let tokens = scan_literal("a//b");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "a//b"));
    }

    // ==================== Offsets ====================

    #[test]
    fn test_utf16_offsets() {
        // '😀' is two UTF-16 code units.
        let line = "😀 repo:x";
        let tokens = scan_literal(line);
        assert_eq!(tokens[0].range(), Range::new(0, 2));
        assert_eq!(tokens[1].range(), Range::new(2, 3));
        assert_eq!(tokens[2].range(), Range::new(3, 9));
        covered(line, &tokens);
    }

    #[test]
    fn test_token_coverage_assorted() {
        for line in [
            "repo:foo file:bar baz",
            "  (a or b) ",
            r#"content:"x y" -lang:go"#,
            "one\ttwo",
            "// only",
            "repo:",
        ] {
            let tokens = scan_literal(line);
            covered(line, &tokens);
        }
    }
}
