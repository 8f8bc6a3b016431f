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

//! A headless stand-in for a platform window, exposing its events as signals.

use lateralus_core::event::{MutexLock, Signal};
use std::sync::Mutex;

/// The client-area size of a window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// A window whose resize event may be raised from any thread.
pub struct Window {
    size: Mutex<WindowSize>,
    /// Raised after every size change, with the new size.
    pub resized: Signal<WindowSize, MutexLock>,
    /// Raised once when the window is asked to close.
    pub close_requested: Signal<(), MutexLock>,
}

impl Window {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Mutex::new(WindowSize { width, height }),
            resized: Signal::new(),
            close_requested: Signal::new(),
        }
    }

    pub fn size(&self) -> WindowSize {
        *self.size.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applies a new size and notifies the `resized` listeners.
    pub fn resize(&self, width: u32, height: u32) {
        let size = WindowSize { width, height };
        *self.size.lock().unwrap_or_else(|e| e.into_inner()) = size;
        log::debug!("Window resized to {}x{}", width, height);
        self.resized.invoke(size);
    }

    pub fn request_close(&self) {
        log::info!("Window close requested.");
        self.close_requested.invoke(());
    }
}
