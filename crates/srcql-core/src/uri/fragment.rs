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

//! Line/position fragments of repository URLs.
//!
//! Positions travel in two places: a query string (`?L42:7`) and a hash
//! fragment. Hash fragments come in two dialects: a modern
//! `#L42:7&tab=references` form parsed as a query string, and a legacy
//! `#L42:7$references` form where `$`-prefixed words name a view state.
//! Query-string positions win over hash positions; view state only ever
//! comes from the hash.

use crate::position::Position;

/// A parsed `L`-prefixed location: line, range of lines, position, or
/// range of positions. Numbers are kept exactly as written (1-indexed in
/// well-formed URLs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrPositionOrRange {
    /// `L10`
    Line(u32),
    /// `L10-13`
    LineRange { line: u32, end_line: u32 },
    /// `L10:2`
    Position { line: u32, character: u32 },
    /// `L10:2-13:5`
    Range {
        line: u32,
        character: u32,
        end_line: u32,
        end_character: u32,
    },
}

impl LineOrPositionOrRange {
    /// Line the location starts on.
    #[inline]
    pub const fn line(&self) -> u32 {
        match self {
            LineOrPositionOrRange::Line(line)
            | LineOrPositionOrRange::LineRange { line, .. }
            | LineOrPositionOrRange::Position { line, .. }
            | LineOrPositionOrRange::Range { line, .. } => *line,
        }
    }

    /// Character the location starts at, when one was written.
    #[inline]
    pub const fn character(&self) -> Option<u32> {
        match self {
            LineOrPositionOrRange::Position { character, .. }
            | LineOrPositionOrRange::Range { character, .. } => Some(*character),
            _ => None,
        }
    }

    /// Start of the location as a [`Position`], defaulting a missing
    /// character to 0.
    #[inline]
    pub const fn start_position(&self) -> Position {
        Position::new(
            self.line(),
            match self.character() {
                Some(character) => character,
                None => 0,
            },
        )
    }
}

/// Position and view state recovered from a URL's query and hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFragment {
    /// The location, if either the query or the hash carried one.
    pub lpr: Option<LineOrPositionOrRange>,
    /// Trailing view-state name (`references`, `def`, ...), hash-only.
    pub view_state: Option<String>,
}

/// Parses position and view state from a URL's query string and hash
/// fragment. A position in the query string takes precedence over one in
/// the hash; the hash's view state is kept either way.
pub fn parse_query_and_hash(query: Option<&str>, fragment: Option<&str>) -> ParsedFragment {
    let from_hash = fragment.map(parse_hash).unwrap_or_default();
    let from_query = query.and_then(find_line_in_search_parameters);
    ParsedFragment {
        lpr: from_query.or(from_hash.lpr),
        view_state: from_hash.view_state,
    }
}

/// Parses a hash fragment in either dialect. A leading `#` is accepted
/// and stripped. Returns an empty result for malformed fragments.
pub fn parse_hash(hash: &str) -> ParsedFragment {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    if !is_legacy_fragment(hash) {
        // Modern form: the fragment is a query string, the position under
        // an `L...` key and the view state under `tab`.
        let lpr = find_line_in_search_parameters(hash);
        let view_state = url::form_urlencoded::parse(hash.as_bytes())
            .find(|(key, _)| key == "tab")
            .map(|(_, value)| value.into_owned());
        return ParsedFragment { lpr, view_state };
    }

    // Legacy form: `L1:2-3:4$references`. Anything not matching the shape
    // yields nothing.
    let (location, view_state) = match hash.split_once('$') {
        Some((location, rest)) => {
            // Only the first `$`-segment names a view state; any further
            // `$`-segments are discarded, and an empty segment is no view
            // state at all.
            let first = rest.split('$').next().unwrap_or("");
            let view_state = (!first.is_empty()).then(|| first.to_string());
            (location, view_state)
        }
        None => (hash, None),
    };
    // The legacy shape is stricter than the standalone location grammar:
    // no `L` on the end of a range. A shape violation invalidates the
    // whole fragment; a shape-valid but inconsistent location (character
    // on only one side of a range) loses just the location.
    if !is_legacy_location_shape(location) {
        return ParsedFragment::default();
    }
    ParsedFragment {
        lpr: parse_line_or_position_or_range(location),
        view_state,
    }
}

/// Shape check for the location part of a legacy fragment:
/// `(L{line}[:{char}][-{endLine}[:{endChar}]])?` with bare decimal
/// numbers and, unlike the query-string grammar, no `L` on the end line.
fn is_legacy_location_shape(location: &str) -> bool {
    if location.is_empty() {
        return true;
    }
    let Some(rest) = location.strip_prefix('L') else {
        return false;
    };
    let (start, end) = match rest.split_once('-') {
        Some((start, end)) => (start, Some(end)),
        None => (rest, None),
    };
    line_colon_char_shape(start) && end.map_or(true, line_colon_char_shape)
}

fn line_colon_char_shape(text: &str) -> bool {
    match text.split_once(':') {
        Some((line, character)) => is_decimal(line) && is_decimal(character),
        None => is_decimal(text),
    }
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Recognizes the legacy `$view-state` hash dialect: no `=` pairs, and at
/// least one of the known `$`-suffixes present.
pub fn is_legacy_fragment(hash: &str) -> bool {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    !hash.is_empty()
        && !hash.contains('=')
        && ["$info", "$def", "$references", "$impl", "$history"]
            .iter()
            .any(|suffix| hash.contains(suffix))
}

/// Looks for a position among query-string parameters. Only the first
/// parameter's key is examined; a position anywhere later is ignored.
pub fn find_line_in_search_parameters(query: &str) -> Option<LineOrPositionOrRange> {
    let (key, _) = url::form_urlencoded::parse(query.as_bytes()).next()?;
    parse_line_or_position_or_range(&key)
}

/// Parses `L{line}[:{char}][-[L]{endLine}[:{endChar}]]`. The empty string
/// and mixed forms (a character on only one side of a range) yield `None`.
pub fn parse_line_or_position_or_range(text: &str) -> Option<LineOrPositionOrRange> {
    let text = text.strip_prefix('L')?;
    let (start, end) = match text.split_once('-') {
        Some((start, end)) => (start, Some(end.strip_prefix('L').unwrap_or(end))),
        None => (text, None),
    };

    let (line, character) = parse_line_colon_char(start)?;
    let (end_line, end_character) = match end {
        Some(end) => {
            let (end_line, end_character) = parse_line_colon_char(end)?;
            (Some(end_line), end_character)
        }
        None => (None, None),
    };

    // A range must carry characters on both sides or neither.
    if end_line.is_some() && character.is_some() != end_character.is_some() {
        return None;
    }

    Some(match (character, end_line) {
        (None, None) => LineOrPositionOrRange::Line(line),
        (None, Some(end_line)) => LineOrPositionOrRange::LineRange { line, end_line },
        (Some(character), None) => LineOrPositionOrRange::Position { line, character },
        (Some(character), Some(end_line)) => LineOrPositionOrRange::Range {
            line,
            character,
            end_line,
            // Checked above: both sides have characters.
            end_character: end_character.unwrap_or(0),
        },
    })
}

/// Parses `{line}` or `{line}:{char}` where both parts are bare decimal.
fn parse_line_colon_char(text: &str) -> Option<(u32, Option<u32>)> {
    match text.split_once(':') {
        Some((line, character)) => {
            Some((parse_decimal(line)?, Some(parse_decimal(character)?)))
        }
        None => Some((parse_decimal(text)?, None)),
    }
}

/// Strict decimal parse: non-empty, ASCII digits only.
fn parse_decimal(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Location parsing tests ====================

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line_or_position_or_range("L10"),
            Some(LineOrPositionOrRange::Line(10))
        );
    }

    #[test]
    fn test_parse_line_range() {
        assert_eq!(
            parse_line_or_position_or_range("L10-13"),
            Some(LineOrPositionOrRange::LineRange { line: 10, end_line: 13 })
        );
        // The end line may carry its own L.
        assert_eq!(
            parse_line_or_position_or_range("L10-L13"),
            Some(LineOrPositionOrRange::LineRange { line: 10, end_line: 13 })
        );
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            parse_line_or_position_or_range("L42:7"),
            Some(LineOrPositionOrRange::Position { line: 42, character: 7 })
        );
    }

    #[test]
    fn test_parse_full_range() {
        assert_eq!(
            parse_line_or_position_or_range("L10:2-13:5"),
            Some(LineOrPositionOrRange::Range {
                line: 10,
                character: 2,
                end_line: 13,
                end_character: 5,
            })
        );
    }

    #[test]
    fn test_parse_mixed_range_rejected() {
        assert_eq!(parse_line_or_position_or_range("L10:2-13"), None);
        assert_eq!(parse_line_or_position_or_range("L10-13:5"), None);
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert_eq!(parse_line_or_position_or_range(""), None);
        assert_eq!(parse_line_or_position_or_range("L"), None);
        assert_eq!(parse_line_or_position_or_range("10"), None);
        assert_eq!(parse_line_or_position_or_range("Labc"), None);
        assert_eq!(parse_line_or_position_or_range("L10:"), None);
        assert_eq!(parse_line_or_position_or_range("L-5"), None);
    }

    #[test]
    fn test_start_position_defaults_character() {
        let lpr = LineOrPositionOrRange::Line(7);
        assert_eq!(lpr.start_position(), Position::new(7, 0));
        let lpr = LineOrPositionOrRange::Position { line: 7, character: 3 };
        assert_eq!(lpr.start_position(), Position::new(7, 3));
    }

    // ==================== Legacy detection tests ====================

    #[test]
    fn test_legacy_fragment_detection() {
        assert!(is_legacy_fragment("L42$references"));
        assert!(is_legacy_fragment("#$def"));
        assert!(is_legacy_fragment("L1:2$impl"));
        assert!(!is_legacy_fragment(""));
        assert!(!is_legacy_fragment("L42"));
        assert!(!is_legacy_fragment("tab=references"));
        assert!(!is_legacy_fragment("L42=x$references"));
    }

    // ==================== Hash parsing tests ====================

    #[test]
    fn test_parse_hash_modern() {
        let parsed = parse_hash("#L42:7&tab=references");
        assert_eq!(
            parsed.lpr,
            Some(LineOrPositionOrRange::Position { line: 42, character: 7 })
        );
        assert_eq!(parsed.view_state.as_deref(), Some("references"));
    }

    #[test]
    fn test_parse_hash_legacy() {
        let parsed = parse_hash("L42:7$references");
        assert_eq!(
            parsed.lpr,
            Some(LineOrPositionOrRange::Position { line: 42, character: 7 })
        );
        assert_eq!(parsed.view_state.as_deref(), Some("references"));
    }

    #[test]
    fn test_parse_hash_legacy_view_state_only() {
        let parsed = parse_hash("$references");
        assert_eq!(parsed.lpr, None);
        assert_eq!(parsed.view_state.as_deref(), Some("references"));
    }

    #[test]
    fn test_parse_hash_legacy_extra_dollar_segments_discarded() {
        let parsed = parse_hash("L1$references$extra");
        assert_eq!(parsed.view_state.as_deref(), Some("references"));
    }

    #[test]
    fn test_parse_hash_legacy_malformed_location() {
        assert_eq!(parse_hash("Lx$references"), ParsedFragment::default());
    }

    #[test]
    fn test_parse_hash_legacy_rejects_l_prefixed_end_line() {
        // The query-string grammar allows `L10-L13`; the legacy dialect
        // does not, and a shape violation empties the whole fragment.
        assert_eq!(parse_hash("L10-L13$def"), ParsedFragment::default());
        assert_eq!(
            parse_line_or_position_or_range("L10-L13"),
            Some(LineOrPositionOrRange::LineRange { line: 10, end_line: 13 })
        );
    }

    #[test]
    fn test_parse_hash_legacy_mixed_range_keeps_view_state() {
        // Character on only one side of the range: the location is
        // dropped, the view state survives.
        let parsed = parse_hash("L10:2-13$def");
        assert_eq!(parsed.lpr, None);
        assert_eq!(parsed.view_state.as_deref(), Some("def"));
    }

    #[test]
    fn test_parse_hash_plain_position() {
        // No `=` and no legacy suffix: treated as modern, first key parsed.
        let parsed = parse_hash("#L10");
        assert_eq!(parsed.lpr, Some(LineOrPositionOrRange::Line(10)));
        assert_eq!(parsed.view_state, None);
    }

    // ==================== Query parameter tests ====================

    #[test]
    fn test_find_line_first_key_only() {
        assert_eq!(
            find_line_in_search_parameters("L42:7"),
            Some(LineOrPositionOrRange::Position { line: 42, character: 7 })
        );
        // The position must be the first parameter.
        assert_eq!(find_line_in_search_parameters("utm=1&L42:7"), None);
        assert_eq!(find_line_in_search_parameters(""), None);
    }

    #[test]
    fn test_query_wins_over_hash() {
        let parsed = parse_query_and_hash(Some("L5"), Some("#L9$references"));
        assert_eq!(parsed.lpr, Some(LineOrPositionOrRange::Line(5)));
        assert_eq!(parsed.view_state.as_deref(), Some("references"));
    }

    #[test]
    fn test_hash_position_used_without_query() {
        let parsed = parse_query_and_hash(None, Some("#L9"));
        assert_eq!(parsed.lpr, Some(LineOrPositionOrRange::Line(9)));
    }
}
