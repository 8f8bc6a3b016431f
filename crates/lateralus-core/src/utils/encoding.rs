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

//! Conversion of text between ASCII, UTF-8, UTF-16 and UTF-32 byte buffers.
//!
//! Buffers hold raw code units: one byte per unit for ASCII and UTF-8, two
//! for UTF-16 and four for UTF-32, both in native byte order. This matches
//! the in-memory layout of `[u16]` and `[u32]` strings handed over by
//! platform and font APIs.
//!
//! Decoding is strict and reports the first malformed unit. Encoding into
//! ASCII is lossy: every non-ASCII character becomes [`ASCII_REPLACEMENT`].

/// The character written in place of non-ASCII characters when encoding to
/// [`Encoding::Ascii`].
pub const ASCII_REPLACEMENT: char = '?';

/// A text encoding understood by [`re_encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// 7-bit ASCII, one byte per character.
    Ascii,
    /// UTF-8.
    Utf8,
    /// UTF-16 in native byte order.
    Utf16,
    /// UTF-32 in native byte order.
    Utf32,
}

impl Encoding {
    /// Size in bytes of one code unit.
    pub const fn unit_size(self) -> usize {
        match self {
            Encoding::Ascii | Encoding::Utf8 => 1,
            Encoding::Utf16 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Number of bytes `c` takes in this encoding.
    pub const fn encoded_len(self, c: char) -> usize {
        match self {
            Encoding::Ascii => 1,
            Encoding::Utf8 => c.len_utf8(),
            Encoding::Utf16 => c.len_utf16() * 2,
            Encoding::Utf32 => 4,
        }
    }
}

/// An error that can occur while decoding a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The buffer does not hold a whole number of code units.
    #[error("{len} bytes is not a whole number of {encoding:?} code units")]
    PartialCodeUnit {
        /// The encoding being decoded.
        encoding: Encoding,
        /// The buffer length in bytes.
        len: usize,
    },

    /// An ASCII buffer contains a byte above `0x7f`.
    #[error("byte {value:#04x} at offset {offset} is not ASCII")]
    NonAscii {
        /// Byte offset of the offending byte.
        offset: usize,
        /// The offending byte.
        value: u8,
    },

    /// A UTF-8 buffer contains a malformed or truncated sequence.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where the invalid sequence starts.
        offset: usize,
    },

    /// A UTF-16 buffer contains a surrogate without its partner.
    #[error("unpaired UTF-16 surrogate {unit:#06x} at code unit {index}")]
    UnpairedSurrogate {
        /// Code-unit index of the surrogate.
        index: usize,
        /// The surrogate itself.
        unit: u16,
    },

    /// A UTF-32 value is a surrogate or lies beyond `U+10FFFF`.
    #[error("{value:#x} at code unit {index} is not a Unicode scalar value")]
    InvalidCodePoint {
        /// Code-unit index of the value.
        index: usize,
        /// The offending value.
        value: u32,
    },
}

/// A specialized `Result` type for encoding conversions.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Decodes `bytes` from `encoding` into characters.
pub fn decode(encoding: Encoding, bytes: &[u8]) -> EncodingResult<Vec<char>> {
    if bytes.len() % encoding.unit_size() != 0 {
        return Err(EncodingError::PartialCodeUnit {
            encoding,
            len: bytes.len(),
        });
    }

    match encoding {
        Encoding::Ascii => bytes
            .iter()
            .enumerate()
            .map(|(offset, &value)| {
                if value.is_ascii() {
                    Ok(char::from(value))
                } else {
                    Err(EncodingError::NonAscii { offset, value })
                }
            })
            .collect(),
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(|text| text.chars().collect())
            .map_err(|e| EncodingError::InvalidUtf8 {
                offset: e.valid_up_to(),
            }),
        Encoding::Utf16 => {
            let units = bytes
                .chunks_exact(2)
                .map(|unit| u16::from_ne_bytes([unit[0], unit[1]]));
            let mut index = 0;
            char::decode_utf16(units)
                .map(|decoded| match decoded {
                    Ok(c) => {
                        index += c.len_utf16();
                        Ok(c)
                    }
                    Err(e) => Err(EncodingError::UnpairedSurrogate {
                        index,
                        unit: e.unpaired_surrogate(),
                    }),
                })
                .collect()
        }
        Encoding::Utf32 => bytes
            .chunks_exact(4)
            .map(|unit| u32::from_ne_bytes([unit[0], unit[1], unit[2], unit[3]]))
            .enumerate()
            .map(|(index, value)| {
                char::from_u32(value).ok_or(EncodingError::InvalidCodePoint { index, value })
            })
            .collect(),
    }
}

/// Encodes `chars` into a byte buffer in `encoding`.
pub fn encode(encoding: Encoding, chars: impl IntoIterator<Item = char>) -> Vec<u8> {
    let mut out = Vec::new();
    for c in chars {
        match encoding {
            Encoding::Ascii => {
                let c = if c.is_ascii() { c } else { ASCII_REPLACEMENT };
                out.push(c as u8);
            }
            Encoding::Utf8 => {
                out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
            }
            Encoding::Utf16 => {
                for unit in c.encode_utf16(&mut [0; 2]) {
                    out.extend_from_slice(&unit.to_ne_bytes());
                }
            }
            Encoding::Utf32 => out.extend_from_slice(&u32::from(c).to_ne_bytes()),
        }
    }
    out
}

/// Returns how many bytes `bytes` takes once converted from `from` to `to`.
pub fn re_encoded_size(from: Encoding, to: Encoding, bytes: &[u8]) -> EncodingResult<usize> {
    Ok(decode(from, bytes)?
        .into_iter()
        .map(|c| to.encoded_len(c))
        .sum())
}

/// Converts `bytes` from `from` to `to`.
///
/// The returned buffer is exactly [`re_encoded_size`] bytes long.
pub fn re_encode(from: Encoding, to: Encoding, bytes: &[u8]) -> EncodingResult<Vec<u8>> {
    let chars = decode(from, bytes)?;
    log::trace!(
        "Re-encoding {} character(s) from {:?} to {:?}.",
        chars.len(),
        from,
        to
    );
    Ok(encode(to, chars))
}

/// Converts `text` to ASCII, replacing non-ASCII characters with
/// [`ASCII_REPLACEMENT`].
pub fn to_ascii_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { ASCII_REPLACEMENT })
        .collect()
}

/// Converts a single UTF-32 code point to a UTF-8 string.
pub fn code_point_to_string(code_point: u32) -> EncodingResult<String> {
    char::from_u32(code_point)
        .map(String::from)
        .ok_or(EncodingError::InvalidCodePoint {
            index: 0,
            value: code_point,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "Hello, world!";

    fn utf16_bytes(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_ne_bytes).collect()
    }

    fn utf32_bytes(text: &str) -> Vec<u8> {
        text.chars().flat_map(|c| u32::from(c).to_ne_bytes()).collect()
    }

    fn bytes_in(encoding: Encoding, text: &str) -> Vec<u8> {
        match encoding {
            Encoding::Ascii | Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16 => utf16_bytes(text),
            Encoding::Utf32 => utf32_bytes(text),
        }
    }

    #[test]
    fn ascii_text_converts_between_every_pair() {
        let all = [
            Encoding::Ascii,
            Encoding::Utf8,
            Encoding::Utf16,
            Encoding::Utf32,
        ];
        for from in all {
            for to in all {
                let source = bytes_in(from, HELLO);
                let converted = re_encode(from, to, &source).expect("ASCII text is valid everywhere");
                assert_eq!(converted, bytes_in(to, HELLO), "{from:?} -> {to:?}");
                assert_eq!(
                    re_encoded_size(from, to, &source).unwrap(),
                    converted.len(),
                    "{from:?} -> {to:?}"
                );
            }
        }
    }

    #[test]
    fn non_ascii_text_round_trips_between_unicode_encodings() {
        for text in ["(\u{07ff})", "(\u{982d})", "ab\u{1F968}c"] {
            let utf8 = bytes_in(Encoding::Utf8, text);
            assert_eq!(
                re_encode(Encoding::Utf8, Encoding::Utf16, &utf8).unwrap(),
                utf16_bytes(text)
            );
            assert_eq!(
                re_encode(Encoding::Utf16, Encoding::Utf32, &utf16_bytes(text)).unwrap(),
                utf32_bytes(text)
            );
            assert_eq!(
                re_encode(Encoding::Utf32, Encoding::Utf8, &utf32_bytes(text)).unwrap(),
                utf8
            );
        }
    }

    #[test]
    fn non_ascii_becomes_replacement_in_ascii() {
        for from in [Encoding::Utf8, Encoding::Utf16, Encoding::Utf32] {
            let source = bytes_in(from, "(\u{982d})");
            assert_eq!(re_encode(from, Encoding::Ascii, &source).unwrap(), b"(?)");
            assert_eq!(re_encoded_size(from, Encoding::Ascii, &source).unwrap(), 3);
        }
        assert_eq!(to_ascii_lossy("(\u{07ff})"), "(?)");
        assert_eq!(to_ascii_lossy(HELLO), HELLO);
    }

    #[test]
    fn surrogate_pairs_count_as_four_bytes() {
        let emoji = utf32_bytes("\u{1F968}");
        assert_eq!(
            re_encoded_size(Encoding::Utf32, Encoding::Utf16, &emoji).unwrap(),
            4
        );
        assert_eq!(
            re_encoded_size(Encoding::Utf32, Encoding::Utf8, &emoji).unwrap(),
            4
        );
    }

    #[test]
    fn code_points_convert_to_utf8() {
        assert_eq!(code_point_to_string(0x61).unwrap(), "a");
        assert_eq!(code_point_to_string(0x7e).unwrap(), "~");
        assert_eq!(code_point_to_string(0x263a).unwrap(), "\u{263A}");
        assert_eq!(code_point_to_string(0x1f968).unwrap(), "\u{1F968}");
        assert!(code_point_to_string(0xd800).is_err());
        assert!(code_point_to_string(0x110000).is_err());
    }

    #[test]
    fn malformed_input_is_reported() {
        assert_eq!(
            decode(Encoding::Ascii, &[b'a', 0x80]),
            Err(EncodingError::NonAscii {
                offset: 1,
                value: 0x80
            })
        );
        assert_eq!(
            decode(Encoding::Utf8, &[b'a', b'b', 0xff]),
            Err(EncodingError::InvalidUtf8 { offset: 2 })
        );
        assert_eq!(
            decode(Encoding::Utf16, &[0; 3]),
            Err(EncodingError::PartialCodeUnit {
                encoding: Encoding::Utf16,
                len: 3
            })
        );

        let mut lone_surrogate = utf16_bytes("ab");
        lone_surrogate.extend_from_slice(&0xdc00u16.to_ne_bytes());
        assert_eq!(
            decode(Encoding::Utf16, &lone_surrogate),
            Err(EncodingError::UnpairedSurrogate {
                index: 2,
                unit: 0xdc00
            })
        );

        let mut out_of_range = utf32_bytes("a");
        out_of_range.extend_from_slice(&0x11_0000u32.to_ne_bytes());
        assert_eq!(
            decode(Encoding::Utf32, &out_of_range),
            Err(EncodingError::InvalidCodePoint {
                index: 1,
                value: 0x11_0000
            })
        );
    }
}
