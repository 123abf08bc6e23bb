// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Compile file resources into C/C++ source code.

This crate turns a manifest of `<key> <path>` declarations into a C or
C++ translation unit embedding each file's bytes, so applications can
link resources directly into the binary and retrieve them by key at
runtime without filesystem access.

The pipeline has distinct stages, each usable on its own:

1. [Manifest] parses the declarations and resolves source paths.
2. [resource::read_resources] ingests each file as raw bytes.
3. [encoding] renders bytes as `\xHH` escape sequences.
4. [literal] splits escaped content into source-friendly chunks.
5. [LookupTable] sorts resources by key for binary search.
6. [emission] renders the table as a C/C++ translation unit.

[compiler::compile] runs the whole pipeline; [crate::write_output_file]
persists results atomically. The emitted file exposes a C accessor
(`embedrc_get`) and optional C++ wrappers returning `std::string`,
`std::vector<uint8_t>`, or a pointer/length pair.
*/

pub mod compiler;
pub mod emission;
pub mod encoding;
pub mod error;
pub mod literal;
pub mod manifest;
pub mod resource;
pub mod table;

pub use crate::{
    compiler::{compile, compile_manifest_file, write_output_file},
    emission::{render_header, render_source, EmitOptions, OutputStyle},
    encoding::{decode_escaped, encode_bytes, EncodedResource},
    error::{Error, MissingResource, Result},
    literal::LiteralBlock,
    manifest::{Manifest, ManifestEntry},
    resource::{read_resources, RawResource},
    table::{LookupRow, LookupTable},
};
