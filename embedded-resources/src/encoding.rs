// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Byte to C escape sequence conversion.

Resource content is embedded in generated source as C string literals in
which every byte is rendered as a `\xHH` hexadecimal escape with uppercase
digits. Escaping everything keeps the literal free of quote, backslash, and
NUL hazards and sidesteps C's maximal munch rule for hex escapes, which
would otherwise let a literal hex digit following an escape extend it.
*/

use crate::error::{Error, Result};

/// Length in characters of one escaped byte (`\xHH`).
pub const ESCAPE_UNIT_LEN: usize = 4;

/// Encode bytes as a contiguous run of `\xHH` escape sequences.
///
/// The output is ASCII and exactly [ESCAPE_UNIT_LEN] characters per input
/// byte. Empty input produces an empty string.
pub fn encode_bytes(data: &[u8]) -> String {
    let digits = hex::encode_upper(data);
    let mut text = String::with_capacity(data.len() * ESCAPE_UNIT_LEN);

    for pair in digits.as_bytes().chunks(2) {
        text.push('\\');
        text.push('x');
        text.push(pair[0] as char);
        text.push(pair[1] as char);
    }

    text
}

/// Decode a run of `\xHH` escape sequences back into bytes.
///
/// Inverse of [encode_bytes]. Lowercase hex digits are accepted.
pub fn decode_escaped(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();

    if bytes.len() % ESCAPE_UNIT_LEN != 0 {
        return Err(Error::InvalidEscape(format!(
            "encoded length {} is not a multiple of {}",
            bytes.len(),
            ESCAPE_UNIT_LEN
        )));
    }

    let mut digits = String::with_capacity(bytes.len() / 2);

    for unit in bytes.chunks(ESCAPE_UNIT_LEN) {
        if unit[0] != b'\\' || unit[1] != b'x' {
            return Err(Error::InvalidEscape(format!(
                "expected \\x escape, got {:?}",
                String::from_utf8_lossy(unit)
            )));
        }

        digits.push(unit[2] as char);
        digits.push(unit[3] as char);
    }

    hex::decode(&digits).map_err(|e| Error::InvalidEscape(e.to_string()))
}

/// A resource after escape encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedResource {
    pub key: String,

    /// The full escaped rendering of the resource's content.
    pub text: String,

    /// Original content length in bytes. Recorded here because the length
    /// is not recoverable from a NUL-containing literal at runtime.
    pub byte_count: usize,
}

impl EncodedResource {
    pub fn from_raw(resource: crate::resource::RawResource) -> Self {
        let byte_count = resource.data.len();

        Self {
            key: resource.key,
            text: encode_bytes(&resource.data),
            byte_count,
        }
    }
}
