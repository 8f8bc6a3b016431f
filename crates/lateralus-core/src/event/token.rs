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

//! Identifiers for signals and the subscriptions they hand out.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique signal identifiers. Zero is never issued.
static NEXT_SIGNAL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier assigned to every [`Signal`](super::Signal)
/// at construction.
///
/// Tokens carry the id of the signal that issued them, which lets a signal
/// recognize and ignore tokens that belong to another signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

impl SignalId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opaque handle identifying one subscription on one [`Signal`](super::Signal).
///
/// Tokens are plain values: they hold no reference to the signal and can be
/// stored anywhere. Two subscriptions of the same closure receive two distinct
/// tokens, and a token id is never handed out twice by the same signal, even
/// after every listener has been removed. Passing a token to a signal other
/// than the one that issued it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken {
    signal: SignalId,
    id: u64,
}

impl SubscriptionToken {
    pub(crate) fn new(signal: SignalId, id: u64) -> Self {
        Self { signal, id }
    }

    /// The signal that issued this token.
    pub fn signal(&self) -> SignalId {
        self.signal
    }

    /// The per-signal subscription id. Ids increase with subscription order.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.signal, self.id)
    }
}
