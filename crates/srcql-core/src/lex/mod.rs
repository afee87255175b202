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

//! Lexical analysis of search queries.
//!
//! [`scan`] turns one line of query text into a flat [`Token`] sequence;
//! there is no parse tree. Tokens carry UTF-16 [`Range`]s into the source
//! line, and the sequence covers the line exactly.

mod error;
mod scanner;
mod tokens;

pub use error::{ScanError, ScanResult};
pub use scanner::scan;
pub use tokens::{
    Filter, FilterValue, Literal, OperatorKind, PatternKind, Range, Token, ValueKind,
};
