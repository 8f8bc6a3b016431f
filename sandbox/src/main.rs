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

// Lateralus Sandbox
// Drives a shared resize signal from several threads.

mod window;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use window::{Window, WindowSize};

const DEFAULT_RESIZE_THREADS: u32 = 4;
const MAX_RESIZE_THREADS: u32 = 64;
const RESIZES_PER_THREAD: u32 = 8;

/// Reads the number of resizing threads from `SANDBOX_RESIZE_THREADS`.
fn resize_threads() -> Result<u32> {
    let Ok(value) = std::env::var("SANDBOX_RESIZE_THREADS") else {
        return Ok(DEFAULT_RESIZE_THREADS);
    };
    parse_resize_threads(&value)
        .with_context(|| format!("invalid SANDBOX_RESIZE_THREADS value {value:?}"))
}

fn parse_resize_threads(value: &str) -> Result<u32> {
    let threads: u32 = value.trim().parse().context("expected a whole number")?;
    if threads == 0 || threads > MAX_RESIZE_THREADS {
        bail!("expected between 1 and {MAX_RESIZE_THREADS} threads, got {threads}");
    }
    Ok(threads)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let threads = resize_threads()?;
    let window = Window::new(1280, 720);

    let resize_count = Arc::new(AtomicUsize::new(0));
    let total_area = Arc::new(AtomicU64::new(0));

    let count = Arc::clone(&resize_count);
    let counter_token = window.resized.subscribe(move |_| {
        count.fetch_add(1, Ordering::Relaxed);
    });
    let area = Arc::clone(&total_area);
    window.resized.subscribe(move |size: WindowSize| {
        area.fetch_add(u64::from(size.width) * u64::from(size.height), Ordering::Relaxed);
    });

    let _close_log = window
        .close_requested
        .subscribe_scoped(|()| log::info!("Shutting down the sandbox."));

    log::info!(
        "Resizing from {threads} thread(s), {} listener(s) on the resize signal.",
        window.resized.len()
    );

    thread::scope(|scope| -> Result<()> {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let window = &window;
                scope.spawn(move || {
                    for step in 1..=RESIZES_PER_THREAD {
                        window.resize(640 + t * 10, 360 + step);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow!("a resize thread panicked"))?;
        }
        Ok(())
    })?;

    // Later resizes are no longer counted.
    window.resized.unsubscribe(counter_token);
    window.resize(800, 600);

    log::info!(
        "Observed {} resize(s), final size {:?}, accumulated area {}.",
        resize_count.load(Ordering::Relaxed),
        window.size(),
        total_area.load(Ordering::Relaxed)
    );

    window.request_close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thread_counts_in_range() {
        assert_eq!(parse_resize_threads("1").unwrap(), 1);
        assert_eq!(parse_resize_threads(" 16 ").unwrap(), 16);
        assert_eq!(parse_resize_threads("64").unwrap(), MAX_RESIZE_THREADS);
    }

    #[test]
    fn rejects_out_of_range_thread_counts() {
        assert!(parse_resize_threads("0").is_err());
        assert!(parse_resize_threads("65").is_err());
        assert!(parse_resize_threads("4294967296").is_err(), "Must not wrap into u32");
        assert!(parse_resize_threads("-3").is_err());
        assert!(parse_resize_threads("many").is_err());
    }
}
