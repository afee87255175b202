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

//! Position and range value types shared by the URI model and its consumers.
//!
//! A [`Position`] is a plain `(line, character)` pair. URI text carries
//! 1-indexed positions (`?L10:2`); the URI layer stores them exactly as
//! written and leaves any re-indexing to the caller crossing into an
//! editor's coordinate space.

use std::fmt;

/// A `(line, character)` position.
///
/// # Examples
///
/// ```
/// use srcql_core::Position;
///
/// let pos = Position::new(10, 2);
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.character, 2);
/// assert_eq!(format!("{}", pos), "L10:2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number.
    pub line: u32,
    /// Character offset within the line, in UTF-16 code units.
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}:{}", self.line, self.character)
    }
}

/// A two-position span for multi-line ranges (definitions, hovers).
///
/// Distinct from the single-line character-offset range used by query
/// tokens ([`crate::lex::Range`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRange {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl PositionRange {
    /// Creates a new range from start and end positions.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width range at a single position.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Checks if this range is on a single line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}
