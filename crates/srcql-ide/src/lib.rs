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

//! Editor-facing services over scanned search queries.
//!
//! Two pure functions on top of [`srcql_core::lex`] tokens:
//!
//! - [`completion_items`]: filter-name and filter-value suggestions at a
//!   cursor position, shaped as `lsp_types` completion lists.
//! - [`decorate`]: per-token sub-range classification for semantic
//!   highlighting.
//!
//! Neither talks to a server; both operate on already-scanned tokens, so
//! callers control scanning options (pattern kind, comment handling).

mod completion;
mod decorate;

pub use completion::{completion_items, CompletionError};
pub use decorate::{decorate, DecoratedToken, DecorationKind};
