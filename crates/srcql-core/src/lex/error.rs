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

//! Scanner error types.
//!
//! The scanner succeeds on almost everything: unterminated quotes,
//! unbalanced parentheses, and unknown filter names are user-typed
//! realities that degrade into tokens rather than errors. Only input the
//! scanner cannot meaningfully tokenize at all is rejected.

use thiserror::Error;

/// Unrecoverable scanner failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The input contained a line terminator. `scan` operates on a single
    /// line; callers split multi-line documents and scan each line.
    #[error("offset {offset}: scan input must be a single line")]
    MultilineInput {
        /// UTF-16 offset of the first line terminator.
        offset: usize,
    },
}

/// Result type for scanner operations.
pub type ScanResult<T> = Result<T, ScanError>;
