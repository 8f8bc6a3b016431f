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

//! Errors reported by the event primitives.

use super::token::SignalId;
use std::collections::TryReserveError;

/// An error that can occur while registering a listener on a [`Signal`](super::Signal).
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// The listener list could not grow to hold the new listener.
    #[error("failed to allocate storage for a new listener: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// Every subscription id this signal can hand out has been used.
    #[error("signal {signal} has exhausted its subscription token ids")]
    TokensExhausted {
        /// The signal that ran out of ids.
        signal: SignalId,
    },
}

/// A specialized `Result` type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;
