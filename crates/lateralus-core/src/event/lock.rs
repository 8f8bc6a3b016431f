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

//! Concurrency policies deciding how a [`Signal`](super::Signal) guards its
//! listener list.
//!
//! A policy supplies the cell that owns the listener state and the single
//! exclusive-access operation through which subscription, removal and
//! invocation all go. At most one of those runs at a time on a given signal.

use std::cell::RefCell;
use std::sync::Mutex;

mod sealed {
    pub trait Sealed {}
}

/// The concurrency policy of a [`Signal`](super::Signal).
///
/// This trait is sealed; the available policies are [`NoLock`] and
/// [`MutexLock`].
pub trait SignalLock: sealed::Sealed {
    /// The boxed listener type stored for an argument type `A`.
    type Listener<A>: Fn(A) + ?Sized;

    /// The cell that owns the guarded state.
    type Cell<T>;

    /// Wraps `value` in this policy's cell.
    fn new_cell<T>(value: T) -> Self::Cell<T>;

    /// Runs `f` with exclusive access to the state inside `cell`, blocking
    /// the calling thread until that access is available.
    fn exclusive<T, R>(cell: &Self::Cell<T>, f: impl FnOnce(&mut T) -> R) -> R;
}

/// No synchronization, for signals owned and used by a single thread.
///
/// A signal using this policy is not `Sync` and cannot be shared between
/// threads. Its listeners do not need to be `Send`.
///
/// # Panics
///
/// Touching the signal from inside one of its own listeners (subscribing,
/// unsubscribing or invoking it again) panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl sealed::Sealed for NoLock {}

impl SignalLock for NoLock {
    type Listener<A> = dyn Fn(A);
    type Cell<T> = RefCell<T>;

    fn new_cell<T>(value: T) -> RefCell<T> {
        RefCell::new(value)
    }

    fn exclusive<T, R>(cell: &RefCell<T>, f: impl FnOnce(&mut T) -> R) -> R {
        match cell.try_borrow_mut() {
            Ok(mut state) => f(&mut state),
            Err(_) => panic!("signal was re-entered from one of its own listeners"),
        }
    }
}

/// Mutual exclusion, for signals shared between threads.
///
/// Subscription, removal and invocation each take the same mutex, and
/// invocation holds it until every listener has returned. Two concurrent
/// invocations are serialized as well. Listeners must be `Send`.
///
/// A listener that panics poisons the mutex. The next operation recovers the
/// listener list, which listeners never mutate, and logs a warning.
///
/// Touching the signal from inside one of its own listeners deadlocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutexLock;

impl sealed::Sealed for MutexLock {}

impl SignalLock for MutexLock {
    type Listener<A> = dyn Fn(A) + Send;
    type Cell<T> = Mutex<T>;

    fn new_cell<T>(value: T) -> Mutex<T> {
        Mutex::new(value)
    }

    fn exclusive<T, R>(cell: &Mutex<T>, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = cell.lock().unwrap_or_else(|poisoned| {
            log::warn!("A signal listener panicked during an earlier invocation; recovering the listener list.");
            cell.clear_poison();
            poisoned.into_inner()
        });
        f(&mut state)
    }
}
