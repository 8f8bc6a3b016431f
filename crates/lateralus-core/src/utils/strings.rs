// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String comparison helpers.

/// Compares two strings for equality, ignoring letter case.
///
/// Case is folded with Unicode lowercase mapping, so non-ASCII letters are
/// folded too. Characters without case (digits, punctuation, emoji) must
/// match exactly.
///
/// ```rust
/// use lateralus_core::utils::strings::case_insensitive_eq;
///
/// assert!(case_insensitive_eq("Window", "WINDOW"));
/// assert!(!case_insensitive_eq("Window", "Widow"));
/// ```
pub fn case_insensitive_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
