// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Splitting escaped content into source-friendly literal lines.

C string literal concatenation lets one logical literal span adjacent
quoted fragments, so long escaped blobs are broken into fixed-width chunks
that render as one fragment per line.
*/

use crate::encoding::{EncodedResource, ESCAPE_UNIT_LEN};

/// Escaped bytes per emitted literal line.
pub const CHUNK_UNITS: usize = 18;

/// Characters per emitted literal line.
pub const CHUNK_LEN: usize = CHUNK_UNITS * ESCAPE_UNIT_LEN;

/// A resource's escaped content, split into literal-sized chunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralBlock {
    pub key: String,

    /// Chunks of at most [CHUNK_LEN] characters. Chunk boundaries always
    /// fall between escape units, never inside one.
    pub chunks: Vec<String>,

    pub byte_count: usize,
}

impl LiteralBlock {
    pub fn from_encoded(encoded: EncodedResource) -> Self {
        let mut chunks = Vec::new();

        if encoded.text.is_empty() {
            // A zero-length resource still needs one fragment so the
            // emitted declaration contains a valid empty literal.
            chunks.push(String::new());
        } else {
            let mut offset = 0;

            while offset < encoded.text.len() {
                let end = (offset + CHUNK_LEN).min(encoded.text.len());
                chunks.push(encoded.text[offset..end].to_string());
                offset = end;
            }
        }

        Self {
            key: encoded.key,
            chunks,
            byte_count: encoded.byte_count,
        }
    }

    /// Render the chunks as newline-separated quoted fragments, each
    /// prefixed with `indent`.
    pub fn render(&self, indent: &str) -> String {
        self.chunks
            .iter()
            .map(|chunk| format!("{}\"{}\"", indent, chunk))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            encoding::{decode_escaped, encode_bytes},
            error::Result,
        },
    };

    fn block_for(key: &str, data: &[u8]) -> LiteralBlock {
        LiteralBlock::from_encoded(EncodedResource {
            key: key.to_string(),
            text: encode_bytes(data),
            byte_count: data.len(),
        })
    }

    #[test]
    fn short_content_is_one_chunk() {
        let block = block_for("short", b"Hi");

        assert_eq!(block.chunks, vec!["\\x48\\x69".to_string()]);
    }

    #[test]
    fn content_at_exact_boundary_fills_one_chunk() {
        let block = block_for("exact", &[0xaa; CHUNK_UNITS]);

        assert_eq!(block.chunks.len(), 1);
        assert_eq!(block.chunks[0].len(), CHUNK_LEN);
    }

    #[test]
    fn one_byte_past_boundary_starts_second_chunk() {
        let block = block_for("spill", &[0xaa; CHUNK_UNITS + 1]);

        assert_eq!(block.chunks.len(), 2);
        assert_eq!(block.chunks[0].len(), CHUNK_LEN);
        assert_eq!(block.chunks[1], "\\xAA");
    }

    #[test]
    fn empty_content_yields_single_empty_chunk() {
        let block = block_for("empty", b"");

        assert_eq!(block.chunks, vec![String::new()]);
        assert_eq!(block.render("    "), "    \"\"");
    }

    #[test]
    fn chunks_never_split_an_escape_unit() -> Result<()> {
        let data = (0u8..=255).cycle().take(1000).collect::<Vec<_>>();
        let block = block_for("big", &data);

        let mut reassembled = String::new();

        for chunk in &block.chunks {
            assert!(chunk.len() <= CHUNK_LEN);
            assert_eq!(chunk.len() % ESCAPE_UNIT_LEN, 0);
            reassembled.push_str(chunk);
        }

        assert_eq!(decode_escaped(&reassembled)?, data);

        Ok(())
    }

    #[test]
    fn render_quotes_and_indents_every_line() {
        let block = block_for("lines", &[0x11; CHUNK_UNITS * 2 + 3]);
        let rendered = block.render("  ");

        assert_eq!(rendered.lines().count(), 3);

        for line in rendered.lines() {
            assert!(line.starts_with("  \""));
            assert!(line.ends_with('"'));
        }
    }
}
