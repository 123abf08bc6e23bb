// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! End-to-end compilation of a manifest into generated source. */

use {
    crate::{
        emission::{render_source, EmitOptions},
        encoding::EncodedResource,
        error::{Error, Result},
        literal::LiteralBlock,
        manifest::Manifest,
        resource::read_resources,
        table::LookupTable,
    },
    log::info,
    std::path::Path,
};

/// Compile a parsed manifest into generated source text.
///
/// Runs the full pipeline: read each source file, escape its content,
/// split it into literal chunks, assemble the sorted lookup table, and
/// render. Nothing is written to disk.
pub fn compile(manifest: &Manifest, options: &EmitOptions) -> Result<String> {
    options.validate()?;

    let resources = read_resources(manifest)?;

    info!("embedding {} resources", resources.len());

    let blocks = resources
        .into_iter()
        .map(EncodedResource::from_raw)
        .map(LiteralBlock::from_encoded)
        .collect::<Vec<_>>();

    let table = LookupTable::assemble(blocks)?;

    render_source(&table, options)
}

/// Compile a manifest file into generated source text.
pub fn compile_manifest_file(path: impl AsRef<Path>, options: &EmitOptions) -> Result<String> {
    compile(&Manifest::from_path(path)?, options)
}

/// Write generated output to a file.
///
/// Content is written to a temporary sibling and renamed into place so a
/// failed run never leaves a truncated output file behind.
pub fn write_output_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();

    let file_name = path.file_name().ok_or_else(|| Error::OutputWrite {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ),
    })?;

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(&tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);

        return Err(Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
