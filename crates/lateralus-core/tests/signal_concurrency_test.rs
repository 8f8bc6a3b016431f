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

use lateralus_core::event::{MutexLock, Signal};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const SLOW_LISTENER: Duration = Duration::from_millis(50);

/// Subscribes a listener that raises `entered`, sleeps, then bumps `counter`.
fn subscribe_slow_listener(
    signal: &Signal<(), MutexLock>,
    entered: &Arc<AtomicBool>,
    counter: &Arc<AtomicUsize>,
) -> lateralus_core::SubscriptionToken {
    let entered = Arc::clone(entered);
    let counter = Arc::clone(counter);
    signal.subscribe(move |()| {
        entered.store(true, Ordering::SeqCst);
        thread::sleep(SLOW_LISTENER);
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn wait_for(flag: &AtomicBool) {
    while !flag.load(Ordering::SeqCst) {
        thread::yield_now();
    }
}

#[test]
fn subscribe_waits_for_invoke_in_flight() {
    // --- 1. ARRANGE ---
    let signal = Signal::<(), MutexLock>::new();
    let entered = Arc::new(AtomicBool::new(false));
    let counter = Arc::new(AtomicUsize::new(0));
    let late_calls = Arc::new(AtomicUsize::new(0));
    subscribe_slow_listener(&signal, &entered, &counter);

    thread::scope(|scope| {
        scope.spawn(|| signal.invoke(()));

        // The slow listener is now sleeping while holding the signal.
        wait_for(&entered);
        thread::sleep(Duration::from_millis(1));

        // --- 2. ACT ---
        let sink = Arc::clone(&late_calls);
        signal.subscribe(move |()| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        // --- 3. ASSERT ---
        assert_eq!(
            counter.load(Ordering::SeqCst),
            1,
            "Subscribe must not return before the in-flight invocation completes"
        );
    });

    assert_eq!(signal.len(), 2);
    assert_eq!(
        late_calls.load(Ordering::SeqCst),
        0,
        "A listener added during an invocation must not join it"
    );

    signal.invoke(());
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribe_waits_for_invoke_in_flight() {
    let signal = Signal::<(), MutexLock>::new();
    let entered = Arc::new(AtomicBool::new(false));
    let counter = Arc::new(AtomicUsize::new(0));
    let token = subscribe_slow_listener(&signal, &entered, &counter);

    thread::scope(|scope| {
        scope.spawn(|| signal.invoke(()));

        wait_for(&entered);
        thread::sleep(Duration::from_millis(1));

        assert!(signal.unsubscribe(token));
        assert_eq!(
            counter.load(Ordering::SeqCst),
            1,
            "Unsubscribe must not return before the in-flight invocation completes"
        );
    });

    assert_eq!(
        counter.load(Ordering::SeqCst),
        1,
        "The removed listener ran exactly once, in the in-flight invocation"
    );

    // The listener is gone for every later invocation.
    signal.invoke(());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_invocations_are_serialized() {
    const THREADS: usize = 4;

    let signal = Signal::<(), MutexLock>::new();
    let active = Arc::new(AtomicUsize::new(0));
    let overlapped = Arc::new(AtomicBool::new(false));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let active = Arc::clone(&active);
        let overlapped = Arc::clone(&overlapped);
        let calls = Arc::clone(&calls);
        signal.subscribe(move |()| {
            if active.fetch_add(1, Ordering::SeqCst) != 0 {
                overlapped.store(true, Ordering::SeqCst);
            }
            thread::sleep(Duration::from_millis(2));
            calls.fetch_add(1, Ordering::SeqCst);
            active.fetch_sub(1, Ordering::SeqCst);
        });
    }

    let barrier = Barrier::new(THREADS);
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                signal.invoke(());
            });
        }
    });

    assert!(
        !overlapped.load(Ordering::SeqCst),
        "No two listeners should ever run at the same time"
    );
    assert_eq!(calls.load(Ordering::SeqCst), THREADS * 2);
}

#[test]
fn concurrent_subscriptions_get_unique_tokens() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 64;

    let signal = Signal::<u32, MutexLock>::new();

    let mut tokens: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..PER_THREAD)
                        .map(|_| signal.subscribe(|_| {}))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("Subscriber thread panicked"))
            .collect()
    });

    assert_eq!(signal.len(), THREADS * PER_THREAD);

    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), THREADS * PER_THREAD, "Token ids must never collide");

    for token in tokens {
        assert!(signal.unsubscribe(token));
    }
    assert!(signal.is_empty());
}

#[test]
fn shared_signal_survives_listener_panic() {
    let signal = Arc::new(Signal::<bool, MutexLock>::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let sink = Arc::clone(&calls);
    signal.subscribe(move |fail| {
        if fail {
            panic!("listener failure");
        }
        sink.fetch_add(1, Ordering::SeqCst);
    });

    let worker = Arc::clone(&signal);
    let result = thread::spawn(move || worker.invoke(true)).join();
    assert!(result.is_err(), "The listener panic should reach the invoker");

    // The listener list is still usable from other threads.
    signal.invoke(false);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(signal.len(), 1);
}
