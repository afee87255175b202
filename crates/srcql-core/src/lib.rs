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

//! Core building blocks for Sourcegraph-style code search clients.
//!
//! This crate covers the pure, editor-agnostic layer:
//!
//! - [`lex`]: a single-pass scanner turning query text into tokens with
//!   exact UTF-16 source ranges.
//! - [`filters`]: the registry of recognized `field:` filters, their
//!   aliases, negatability, and value vocabularies.
//! - [`uri`]: the `sourcegraph://` URI model for locations inside
//!   repositories, with parsing, formatting, and derivation.
//! - [`Position`]: the shared `(line, character)` value type.
//!
//! Everything here is plain data and pure functions; nothing does I/O or
//! holds interior mutability, so all types are freely shared across
//! threads.
//!
//! # Examples
//!
//! ```
//! use srcql_core::lex::{scan, PatternKind, Token};
//!
//! let tokens = scan("repo:gorilla/mux lang:go handler", true, PatternKind::Literal)?;
//! let filters: Vec<_> = tokens.iter().filter_map(Token::as_filter).collect();
//! assert_eq!(filters.len(), 2);
//! # Ok::<(), srcql_core::lex::ScanError>(())
//! ```

pub mod filters;
pub mod lex;
mod position;
pub mod uri;

pub use position::{Position, PositionRange};
