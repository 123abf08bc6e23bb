// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Assembling literal blocks into a sorted lookup table.

The emitted accessor performs binary search over rows ordered by `strcmp`
semantics, so rows here are kept sorted by byte-wise comparison of keys.
Table assembly is the ordering authority: emission renders rows in the
order this module produces them.
*/

use crate::{
    error::{Error, Result},
    literal::LiteralBlock,
};

/// One row of the lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRow {
    /// Position of the row after sorting. Data symbols in emitted source
    /// are numbered by this index.
    pub index: usize,

    pub key: String,

    pub byte_count: usize,
}

/// A complete, sorted lookup table.
#[derive(Clone, Debug, Default)]
pub struct LookupTable {
    rows: Vec<LookupRow>,
    blocks: Vec<LiteralBlock>,
}

impl LookupTable {
    /// Sort blocks by key and derive the row metadata.
    ///
    /// Input order does not matter. Duplicate keys are rejected here as a
    /// second line of defense, since a sorted table with equal adjacent
    /// keys would make binary search results ambiguous.
    pub fn assemble(mut blocks: Vec<LiteralBlock>) -> Result<Self> {
        // Byte-wise comparison, matching the strcmp order the emitted
        // search relies on.
        blocks.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));

        for pair in blocks.windows(2) {
            if pair[0].key == pair[1].key {
                return Err(Error::DuplicateKey(pair[1].key.clone()));
            }
        }

        let rows = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| LookupRow {
                index,
                key: block.key.clone(),
                byte_count: block.byte_count,
            })
            .collect();

        Ok(Self { rows, blocks })
    }

    /// Obtain the rows in sorted order.
    pub fn rows(&self) -> &[LookupRow] {
        &self.rows
    }

    /// Obtain the literal blocks in sorted order, parallel to [Self::rows].
    pub fn blocks(&self) -> &[LiteralBlock] {
        &self.blocks
    }

    /// Number of resources in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no resources.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by key using the same comparison the emitted
    /// accessor uses.
    pub fn find(&self, key: &str) -> Option<&LookupRow> {
        self.rows
            .binary_search_by(|row| row.key.as_bytes().cmp(key.as_bytes()))
            .ok()
            .map(|idx| &self.rows[idx])
    }
}
