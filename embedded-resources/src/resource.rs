// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Reading resource content from the filesystem. */

use {
    crate::{
        error::{Error, MissingResource, Result},
        manifest::Manifest,
    },
    log::debug,
};

/// A resource's raw bytes, paired with its lookup key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResource {
    pub key: String,
    pub data: Vec<u8>,
}

/// Read the content of every resource declared by a manifest.
///
/// Each file is read exactly once, in declaration order. Content is treated
/// as opaque bytes. Unreadable files do not abort the scan: every failure is
/// collected and reported together via [Error::ResourceNotFound] so one run
/// surfaces all problems.
pub fn read_resources(manifest: &Manifest) -> Result<Vec<RawResource>> {
    let mut resources = Vec::with_capacity(manifest.len());
    let mut missing = Vec::new();

    for entry in manifest.entries() {
        let path = manifest.resolve_source_path(entry);

        match std::fs::read(&path) {
            Ok(data) => {
                debug!(
                    "resource {}: read {} bytes from {}",
                    entry.key,
                    data.len(),
                    path.display()
                );
                resources.push(RawResource {
                    key: entry.key.clone(),
                    data,
                });
            }
            Err(err) => {
                missing.push(MissingResource {
                    key: entry.key.clone(),
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }

    if !missing.is_empty() {
        return Err(Error::ResourceNotFound(missing));
    }

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bytes_in_declaration_order() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("b.bin"), [0x00, 0xff, 0x7f])?;
        std::fs::write(dir.path().join("a.bin"), b"alpha")?;

        let manifest_path = dir.path().join("resources.txt");
        std::fs::write(&manifest_path, "second b.bin\nfirst a.bin\n")?;

        let manifest = Manifest::from_path(&manifest_path)?;
        let resources = read_resources(&manifest)?;

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].key, "second");
        assert_eq!(resources[0].data, vec![0x00, 0xff, 0x7f]);
        assert_eq!(resources[1].key, "first");
        assert_eq!(resources[1].data, b"alpha".to_vec());

        Ok(())
    }

    #[test]
    fn empty_file_yields_empty_resource() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("empty.bin"), b"")?;

        let manifest_path = dir.path().join("resources.txt");
        std::fs::write(&manifest_path, "empty empty.bin\n")?;

        let resources = read_resources(&Manifest::from_path(&manifest_path)?)?;

        assert_eq!(resources.len(), 1);
        assert!(resources[0].data.is_empty());

        Ok(())
    }

    #[test]
    fn collects_every_missing_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("present.bin"), b"here")?;

        let manifest_path = dir.path().join("resources.txt");
        std::fs::write(
            &manifest_path,
            "one gone-1.bin\nok present.bin\ntwo gone-2.bin\nthree gone-3.bin\n",
        )?;

        match read_resources(&Manifest::from_path(&manifest_path)?) {
            Err(Error::ResourceNotFound(missing)) => {
                assert_eq!(missing.len(), 3);
                let keys = missing.iter().map(|m| m.key.as_str()).collect::<Vec<_>>();
                assert_eq!(keys, vec!["one", "two", "three"]);
                assert_eq!(missing[0].path, dir.path().join("gone-1.bin"));
                assert!(!missing[0].reason.is_empty());
            }
            other => panic!("expected missing resource error, got {:?}", other),
        }

        Ok(())
    }
}
