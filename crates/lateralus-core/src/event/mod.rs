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

//! Provides foundational primitives for event-driven communication.
//!
//! The primary component is the [`Signal`], a synchronous multi-consumer
//! callback registry. Owners expose a `Signal` for a condition they detect
//! (a window resize, a device loss, ...), interested parties subscribe a
//! listener and keep the returned [`SubscriptionToken`] if they ever need to
//! leave, and the owner calls [`Signal::invoke`] whenever the condition occurs.
//!
//! How a `Signal` guards its listener list is chosen by type through the
//! [`SignalLock`] policy:
//!
//! - [`NoLock`] for strictly single-threaded owners. The signal is `!Sync`.
//! - [`MutexLock`] for signals shared between threads. Subscription, removal
//!   and invocation are mutually exclusive.

mod error;
mod lock;
mod signal;
mod subscription;
mod token;

pub use self::error::{SignalError, SignalResult};
pub use self::lock::{MutexLock, NoLock, SignalLock};
pub use self::signal::Signal;
pub use self::subscription::Subscription;
pub use self::token::{SignalId, SubscriptionToken};
