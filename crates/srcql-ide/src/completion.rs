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

//! Completion over a scanned query line.
//!
//! Suggestions are computed from the token the cursor rests on: filter
//! names on patterns and whitespace, filter values inside a filter with a
//! known value vocabulary, nothing inside operators or quotes. All
//! suggestions are static; fetching dynamic suggestions (repository
//! names, file names) from an instance is the embedding client's job.

use lsp_types::{CompletionItem, CompletionItemKind, CompletionList};
use once_cell::sync::Lazy;
use thiserror::Error;

use srcql_core::filters::{resolve_filter, FilterKind};
use srcql_core::lex::{Filter, Token};

/// Failures computing completions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The cursor is past the end of the token sequence, so there is
    /// nothing to complete against.
    #[error("no token at character {character}")]
    NoTokenAtCursor {
        /// Zero-based cursor column the caller asked about.
        character: usize,
    },
}

/// One completion entry per filter, with a second negated entry for
/// negatable filters. Order drives `sort_text`, so filter suggestions
/// keep registry order and sort ahead of value suggestions.
static FILTER_TYPE_COMPLETIONS: Lazy<Vec<CompletionItem>> = Lazy::new(|| {
    let mut items = Vec::new();
    for kind in FilterKind::ALL {
        let definition = kind.definition();
        let name = kind.name();
        items.push(filter_item(name, definition.description));
        if let Some(negated_description) = definition.negated_description {
            items.push(filter_item(&format!("-{name}"), negated_description));
        }
    }
    for (index, item) in items.iter_mut().enumerate() {
        item.sort_text = Some(format!("0{index}"));
    }
    items
});

fn filter_item(label: &str, detail: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        detail: Some(detail.to_string()),
        insert_text: Some(format!("{label}:")),
        filter_text: Some(label.to_string()),
        ..CompletionItem::default()
    }
}

fn static_filter_suggestions() -> CompletionList {
    CompletionList {
        is_incomplete: false,
        items: FILTER_TYPE_COMPLETIONS.clone(),
    }
}

/// Computes completion items for a scanned query line at a zero-based
/// cursor column.
///
/// Returns `Ok(None)` when the cursor token offers nothing to complete
/// (operators, quoted values, or a filter whose field is still being
/// typed).
///
/// # Errors
///
/// Returns [`CompletionError::NoTokenAtCursor`] when no token spans the
/// cursor column, which happens only for columns past the line's end.
///
/// # Examples
///
/// ```
/// use srcql_core::lex::{scan, PatternKind};
/// use srcql_ide::completion_items;
///
/// let tokens = scan("case:", true, PatternKind::Literal).unwrap();
/// let list = completion_items(&tokens, 5, false, false).unwrap().unwrap();
/// let labels: Vec<&str> = list.items.iter().map(|item| item.label.as_str()).collect();
/// assert_eq!(labels, vec!["yes", "no"]);
/// ```
pub fn completion_items(
    tokens: &[Token],
    character: usize,
    _globbing: bool,
    is_public_instance: bool,
) -> Result<Option<CompletionList>, CompletionError> {
    // Shift to one-based so that "cursor right after a token" still
    // addresses that token.
    let column = character + 1;
    if column == 1 {
        return Ok(Some(static_filter_suggestions()));
    }
    let token = tokens
        .iter()
        .find(|token| {
            let range = token.range();
            range.start + 1 <= column && range.end + 1 >= column
        })
        .ok_or(CompletionError::NoTokenAtCursor { character })?;

    match token {
        Token::Pattern { .. } | Token::Whitespace { .. } => Ok(Some(static_filter_suggestions())),
        Token::Filter(filter) => Ok(complete_filter(filter, column, is_public_instance)),
        _ => Ok(None),
    }
}

fn complete_filter(
    filter: &Filter,
    column: usize,
    is_public_instance: bool,
) -> Option<CompletionList> {
    let completing_value = match &filter.value {
        None => true,
        Some(value) => value.range.start + 1 <= column,
    };
    if !completing_value {
        return None;
    }

    let mut items = Vec::new();
    // An unresolvable field (possible on caller-constructed tokens) still
    // yields an empty list, so clients can always show a widget.
    let discrete = resolve_filter(&filter.field.value)
        .and_then(|resolved| resolved.definition.discrete_values);
    if let Some(discrete_values) = discrete {
        let typed = filter.value.as_ref().map(|value| value.value.as_str());
        items = discrete_values(typed, is_public_instance)
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let insert = value.insert_text.as_deref().unwrap_or(&value.label);
                CompletionItem {
                    label: value.label.clone(),
                    // Keep list order rather than alphabetical order, for
                    // up to 99 values.
                    sort_text: Some(format!("{index:1>2}")),
                    kind: Some(CompletionItemKind::VALUE),
                    insert_text: Some(format!("{insert} ")),
                    filter_text: Some(value.label),
                    ..CompletionItem::default()
                }
            })
            .collect();
    }
    Some(CompletionList {
        is_incomplete: false,
        items,
    })
}
