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

//! Scoped subscriptions that unsubscribe when dropped.

use super::lock::SignalLock;
use super::signal::Signal;
use super::token::SubscriptionToken;
use std::fmt;
use std::mem;

/// A subscription bound to the lifetime of its [`Signal`].
///
/// Dropping the guard removes the listener. The borrow on the signal makes it
/// impossible for the guard to outlive the signal or to be used with another
/// one.
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
pub struct Subscription<'s, A, L: SignalLock> {
    signal: &'s Signal<A, L>,
    token: SubscriptionToken,
}

impl<'s, A, L: SignalLock> Subscription<'s, A, L> {
    pub(crate) fn new(signal: &'s Signal<A, L>, token: SubscriptionToken) -> Self {
        Self { signal, token }
    }

    /// The token of the underlying subscription.
    pub fn token(&self) -> SubscriptionToken {
        self.token
    }

    /// Releases the guard without unsubscribing and returns the plain token.
    pub fn detach(self) -> SubscriptionToken {
        let token = self.token;
        mem::forget(self);
        token
    }
}

impl<A, L: SignalLock> Drop for Subscription<'_, A, L> {
    fn drop(&mut self) {
        self.signal.unsubscribe(self.token);
    }
}

impl<A, L: SignalLock> fmt::Debug for Subscription<'_, A, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish()
    }
}
