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

//! Binary (power-of-two) byte-size units and conversions.
//!
//! Every function is `const`, so sizes can be spelled out in constants:
//!
//! ```rust
//! use lateralus_core::utils::bytes::{megabytes_to_bytes, MIB};
//!
//! const STAGING_BUFFER_SIZE: u64 = megabytes_to_bytes(64);
//! assert_eq!(STAGING_BUFFER_SIZE, 64 * MIB);
//! ```

/// Bytes in one kibibyte.
pub const KIB: u64 = 1 << 10;
/// Bytes in one mebibyte.
pub const MIB: u64 = 1 << 20;
/// Bytes in one gibibyte.
pub const GIB: u64 = 1 << 30;
/// Bytes in one tebibyte.
pub const TIB: u64 = 1 << 40;

// Growing conversions saturate at `u64::MAX` instead of wrapping.

/// Converts kibibytes to bytes.
pub const fn kilobytes_to_bytes(kib: u64) -> u64 {
    kib.saturating_mul(KIB)
}

/// Converts mebibytes to bytes.
pub const fn megabytes_to_bytes(mib: u64) -> u64 {
    mib.saturating_mul(MIB)
}

/// Converts gibibytes to bytes.
pub const fn gigabytes_to_bytes(gib: u64) -> u64 {
    gib.saturating_mul(GIB)
}

/// Converts tebibytes to bytes.
pub const fn terabytes_to_bytes(tib: u64) -> u64 {
    tib.saturating_mul(TIB)
}

/// Converts bytes to whole kibibytes, rounding down.
pub const fn bytes_to_kilobytes(bytes: u64) -> u64 {
    bytes / KIB
}

/// Converts bytes to whole mebibytes, rounding down.
pub const fn bytes_to_megabytes(bytes: u64) -> u64 {
    bytes / MIB
}

/// Converts bytes to whole gibibytes, rounding down.
pub const fn bytes_to_gigabytes(bytes: u64) -> u64 {
    bytes / GIB
}

/// Converts bytes to whole tebibytes, rounding down.
pub const fn bytes_to_terabytes(bytes: u64) -> u64 {
    bytes / TIB
}
