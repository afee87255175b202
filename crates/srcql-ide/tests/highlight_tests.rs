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

//! End-to-end tests driving realistic queries through scan, completion,
//! and decoration together.

use srcql_core::lex::{scan, PatternKind, Token};
use srcql_ide::{completion_items, decorate, DecorationKind};

fn scan_regexp(line: &str) -> Vec<Token> {
    scan(line, true, PatternKind::Regexp).unwrap()
}

#[test]
fn realistic_query_decorates_every_non_whitespace_token() {
    let line = "context:@me repo:^github\\.com/gorilla/mux$@v1.8.0 lang:go -file:_test\\.go$ Router";
    let tokens = scan_regexp(line);
    for token in &tokens {
        let decorated = decorate(token);
        if token.is_whitespace() {
            assert!(decorated.is_empty());
            continue;
        }
        assert!(!decorated.is_empty(), "undecorated token {token:?}");
        let range = token.range();
        for sub in &decorated {
            assert!(sub.range.start >= range.start && sub.range.end <= range.end);
        }
    }
}

#[test]
fn repo_revision_suffix_is_highlighted() {
    let tokens = scan_regexp("repo:^gorilla/mux$@main");
    let decorated: Vec<_> = tokens.iter().flat_map(decorate).collect();
    let revision = decorated
        .iter()
        .find(|sub| sub.kind == DecorationKind::MetaRevision)
        .expect("revision decoration");
    // "@main" minus the separator.
    assert_eq!(revision.range.len(), 4);
}

#[test]
fn completion_mid_query_offers_values_for_the_cursor_filter() {
    let line = "repo:gorilla select: lang:go";
    let tokens = scan(line, true, PatternKind::Literal).unwrap();
    // Cursor right after "select:".
    let list = completion_items(&tokens, 20, false, false).unwrap().unwrap();
    let labels: Vec<&str> = list.items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["repo", "file", "content", "symbol", "commit"]);
}

#[test]
fn completion_and_decoration_agree_on_comments() {
    let line = "// find the router";
    let tokens = scan(line, true, PatternKind::Literal).unwrap();
    assert_eq!(tokens.len(), 1);
    let decorated = decorate(&tokens[0]);
    assert_eq!(decorated.len(), 1);
    assert_eq!(decorated[0].kind, DecorationKind::Comment);
    // Inside a comment there is nothing to complete.
    assert_eq!(completion_items(&tokens, 5, false, false).unwrap(), None);
}
