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

//! The [`Signal`] event dispatcher.

use super::error::{SignalError, SignalResult};
use super::lock::{MutexLock, NoLock, SignalLock};
use super::subscription::Subscription;
use super::token::{SignalId, SubscriptionToken};
use std::fmt;

/// The state guarded by a signal's lock policy.
struct SignalState<A, L: SignalLock> {
    // Sorted by id, because ids are assigned in push order.
    listeners: Vec<(u64, Box<L::Listener<A>>)>,
    // Never rewound, so a stale token can't match a later subscription.
    next_id: u64,
}

/// A synchronous, multi-consumer callback registry.
///
/// Listeners are called on the invoking thread, in subscription order, each
/// with its own clone of the invocation argument. Signatures with several
/// arguments use a tuple, e.g. `Signal<(u32, u32)>`; signals without a payload
/// use `Signal<()>`.
///
/// The lock policy `L` decides whether the signal may be shared between
/// threads. See [`NoLock`] and [`MutexLock`].
///
/// # Listener failures
///
/// A panicking listener unwinds out of [`invoke`](Signal::invoke); the
/// listeners after it are not called for that invocation.
///
/// # Example
///
/// ```rust
/// use lateralus_core::Signal;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let resized = Signal::<(u32, u32)>::new();
/// let area = Rc::new(Cell::new(0));
///
/// let sink = Rc::clone(&area);
/// let token = resized.subscribe(move |(w, h)| sink.set(w * h));
///
/// resized.invoke((4, 3));
/// assert_eq!(area.get(), 12);
///
/// assert!(resized.unsubscribe(token));
/// resized.invoke((10, 10));
/// assert_eq!(area.get(), 12);
/// ```
pub struct Signal<A, L: SignalLock = NoLock> {
    id: SignalId,
    state: L::Cell<SignalState<A, L>>,
}

impl<A, L: SignalLock> Signal<A, L> {
    /// Creates a signal with no listeners. Does not allocate.
    pub fn new() -> Self {
        Self {
            id: SignalId::next(),
            state: L::new_cell(SignalState {
                listeners: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// The process-unique id of this signal, carried by every token it issues.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Returns the number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.with_state(|state| state.listeners.len())
    }

    /// Returns `true` if no listener is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `token` identifies a listener that is still subscribed
    /// to this signal.
    ///
    /// ## Arguments
    /// * `token` - A token issued by any signal.
    ///
    /// ## Returns
    /// `false` for removed tokens and for tokens issued by another signal.
    pub fn contains(&self, token: SubscriptionToken) -> bool {
        if token.signal() != self.id {
            return false;
        }
        self.with_state(|state| {
            state
                .listeners
                .binary_search_by_key(&token.id(), |(id, _)| *id)
                .is_ok()
        })
    }

    /// Removes the listener identified by `token`.
    ///
    /// Returns `true` if a listener was removed. Unknown tokens, tokens that
    /// were already removed, and tokens issued by another signal are ignored.
    ///
    /// With [`MutexLock`], this waits for any invocation in flight to finish,
    /// so the listener is guaranteed not to run again once this returns.
    ///
    /// ## Arguments
    /// * `token` - The token returned when the listener was subscribed.
    ///
    /// ## Returns
    /// `true` if a listener was removed, `false` if the call was a no-op.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        if token.signal() != self.id {
            log::debug!("Signal {} ignored token {token} issued by another signal.", self.id);
            return false;
        }

        let removed = self.with_state(|state| {
            state
                .listeners
                .binary_search_by_key(&token.id(), |(id, _)| *id)
                .ok()
                .map(|index| state.listeners.remove(index))
        });

        match removed {
            Some(_listener) => {
                // The listener is dropped here, outside the lock.
                log::trace!("Signal {} unsubscribed listener {}.", self.id, token.id());
                true
            }
            None => {
                log::debug!("Signal {} has no listener for token {token}.", self.id);
                false
            }
        }
    }

    /// Removes every listener.
    ///
    /// Outstanding tokens become unknown; ids are not reused by later
    /// subscriptions.
    pub fn clear(&self) {
        let listeners = self.with_state(|state| std::mem::take(&mut state.listeners));
        log::trace!("Signal {} cleared {} listener(s).", self.id, listeners.len());
    }

    /// Calls every subscribed listener once, in subscription order, on the
    /// calling thread.
    ///
    /// Each listener receives its own clone of `args`, so `N` listeners cost
    /// exactly `N` clones.
    ///
    /// With [`MutexLock`], the lock is held until the last listener returns:
    /// concurrent subscriptions, removals and invocations wait for it.
    ///
    /// ## Arguments
    /// * `args` - The payload; cloned once per listener and dropped afterwards.
    pub fn invoke(&self, args: A)
    where
        A: Clone,
    {
        self.with_state(|state| {
            log::trace!(
                "Signal {} invoking {} listener(s).",
                self.id,
                state.listeners.len()
            );
            for (_, listener) in &state.listeners {
                listener(args.clone());
            }
        });
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SignalState<A, L>) -> R) -> R {
        L::exclusive::<SignalState<A, L>, R>(&self.state, f)
    }

    fn insert(&self, listener: Box<L::Listener<A>>) -> SignalResult<SubscriptionToken> {
        let outcome = self.with_state(|state| {
            let reserved = state
                .next_id
                .checked_add(1)
                .ok_or(SignalError::TokensExhausted { signal: self.id })
                .and_then(|next_id| {
                    state.listeners.try_reserve(1)?;
                    Ok(next_id)
                });
            match reserved {
                Ok(next_id) => {
                    let id = state.next_id;
                    state.listeners.push((id, listener));
                    state.next_id = next_id;
                    Ok(SubscriptionToken::new(self.id, id))
                }
                // Hand the listener back so it is dropped outside the lock.
                Err(e) => Err((e, listener)),
            }
        });

        match outcome {
            Ok(token) => {
                log::trace!("Signal {} subscribed listener {}.", self.id, token.id());
                Ok(token)
            }
            Err((e, _listener)) => {
                log::debug!("Signal {} rejected a listener: {e}", self.id);
                Err(e)
            }
        }
    }
}

fn subscribe_or_panic(result: SignalResult<SubscriptionToken>) -> SubscriptionToken {
    match result {
        Ok(token) => token,
        Err(e) => panic!("Failed to subscribe listener: {e}"),
    }
}

impl<A> Signal<A, NoLock> {
    /// Appends `listener` to the signal and returns the token that removes it.
    ///
    /// The same closure may be subscribed several times; each subscription
    /// gets its own token and is called once per invocation.
    ///
    /// # Panics
    ///
    /// Panics if the listener list cannot grow, or if the signal has handed
    /// out every subscription id. Use [`try_subscribe`](Self::try_subscribe)
    /// to handle these as errors.
    ///
    /// ## Arguments
    /// * `listener` - The closure to call on every invocation.
    ///
    /// ## Returns
    /// The token that identifies this subscription for [`unsubscribe`](Signal::unsubscribe).
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionToken
    where
        F: Fn(A) + 'static,
    {
        subscribe_or_panic(self.try_subscribe(listener))
    }

    /// Fallible version of [`subscribe`](Self::subscribe).
    ///
    /// ## Returns
    /// The subscription token, or the [`SignalError`] that prevented the
    /// listener from being stored. A rejected listener is dropped before this
    /// returns, outside the signal's lock.
    pub fn try_subscribe<F>(&self, listener: F) -> SignalResult<SubscriptionToken>
    where
        F: Fn(A) + 'static,
    {
        self.insert(Box::new(listener))
    }

    /// Subscribes `listener` for as long as the returned guard lives.
    pub fn subscribe_scoped<F>(&self, listener: F) -> Subscription<'_, A, NoLock>
    where
        F: Fn(A) + 'static,
    {
        Subscription::new(self, self.subscribe(listener))
    }
}

impl<A> Signal<A, MutexLock> {
    /// Appends `listener` to the signal and returns the token that removes it.
    ///
    /// Waits for any invocation in flight on another thread to finish before
    /// appending. Every invocation that starts after this returns calls the
    /// new listener.
    ///
    /// # Panics
    ///
    /// Panics if the listener list cannot grow, or if the signal has handed
    /// out every subscription id. Use [`try_subscribe`](Self::try_subscribe)
    /// to handle these as errors.
    ///
    /// ## Arguments
    /// * `listener` - The closure to call on every invocation.
    ///
    /// ## Returns
    /// The token that identifies this subscription for [`unsubscribe`](Signal::unsubscribe).
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionToken
    where
        F: Fn(A) + Send + 'static,
    {
        subscribe_or_panic(self.try_subscribe(listener))
    }

    /// Fallible version of [`subscribe`](Self::subscribe).
    ///
    /// ## Returns
    /// The subscription token, or the [`SignalError`] that prevented the
    /// listener from being stored. A rejected listener is dropped before this
    /// returns, outside the signal's lock.
    pub fn try_subscribe<F>(&self, listener: F) -> SignalResult<SubscriptionToken>
    where
        F: Fn(A) + Send + 'static,
    {
        self.insert(Box::new(listener))
    }

    /// Subscribes `listener` for as long as the returned guard lives.
    pub fn subscribe_scoped<F>(&self, listener: F) -> Subscription<'_, A, MutexLock>
    where
        F: Fn(A) + Send + 'static,
    {
        Subscription::new(self, self.subscribe(listener))
    }
}

impl<A, L: SignalLock> Default for Signal<A, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, L: SignalLock> fmt::Debug for Signal<A, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("policy", &std::any::type_name::<L>())
            .finish_non_exhaustive()
    }
}
