// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Resource manifest parsing.

A manifest is a plain text file declaring one resource per line as
`<key> <path>`, where the key runs up to the first space and the path is
the remainder of the line. Keys are opaque identifiers; paths may contain
spaces. Blank lines are ignored.
*/

use {
    crate::error::{Error, Result},
    std::{
        collections::HashSet,
        path::{Path, PathBuf},
    },
};

/// A single `<key> <path>` declaration from a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Identifier the resource will be looked up by at runtime.
    pub key: String,

    /// Path of the file providing the resource's content.
    pub source_path: PathBuf,
}

/// A parsed resource manifest.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,

    /// Directory that relative source paths are resolved against.
    base_dir: Option<PathBuf>,
}

impl Manifest {
    /// Parse manifest text into entries.
    ///
    /// Entries are returned in declaration order. Errors reference 1-based
    /// line numbers.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (idx, line) in text.lines().enumerate() {
            let line_number = idx + 1;

            if line.is_empty() {
                continue;
            }

            let (key, path) = line.split_once(' ').ok_or_else(|| Error::ManifestParse {
                line: line_number,
                message: "expected `<key> <path>` separated by a space".to_string(),
            })?;

            if key.is_empty() {
                return Err(Error::ManifestParse {
                    line: line_number,
                    message: "resource key is empty".to_string(),
                });
            }

            // Keys are emitted into C string literals. Control characters
            // would require escaping that the emitter does not perform.
            if key.chars().any(|c| c.is_ascii_control()) {
                return Err(Error::ManifestParse {
                    line: line_number,
                    message: format!("resource key {:?} contains control characters", key),
                });
            }

            if path.is_empty() {
                return Err(Error::ManifestParse {
                    line: line_number,
                    message: format!("resource key {} is missing a source path", key),
                });
            }

            if path.starts_with(char::is_whitespace) {
                return Err(Error::ManifestParse {
                    line: line_number,
                    message: format!("source path for key {} begins with whitespace", key),
                });
            }

            if !seen.insert(key.to_string()) {
                return Err(Error::DuplicateKey(key.to_string()));
            }

            entries.push(ManifestEntry {
                key: key.to_string(),
                source_path: PathBuf::from(path),
            });
        }

        Ok(Self {
            entries,
            base_dir: None,
        })
    }

    /// Read and parse a manifest file.
    ///
    /// The manifest's parent directory is recorded so relative source paths
    /// resolve against the manifest's location rather than the process
    /// working directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut manifest = Self::parse(&text)?;

        manifest.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf());

        Ok(manifest)
    }

    /// Obtain the entries in declaration order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of declared resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest declares no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an entry's source path to the path that should be read.
    ///
    /// Absolute paths are used as-is. Relative paths are joined to the
    /// manifest's directory, when known.
    pub fn resolve_source_path(&self, entry: &ManifestEntry) -> PathBuf {
        match &self.base_dir {
            Some(base) if !entry.source_path.is_absolute() => base.join(&entry.source_path),
            _ => entry.source_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_entry() -> Result<()> {
        let manifest = Manifest::parse("greeting files/hello.txt")?;

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.entries()[0].key, "greeting");
        assert_eq!(
            manifest.entries()[0].source_path,
            PathBuf::from("files/hello.txt")
        );

        Ok(())
    }

    #[test]
    fn parse_preserves_declaration_order() -> Result<()> {
        let manifest = Manifest::parse("zebra z.bin\nalpha a.bin\nmiddle m.bin")?;

        let keys = manifest
            .entries()
            .iter()
            .map(|e| e.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["zebra", "alpha", "middle"]);

        Ok(())
    }

    #[test]
    fn parse_path_may_contain_spaces() -> Result<()> {
        let manifest = Manifest::parse("doc My Documents/read me.txt")?;

        assert_eq!(
            manifest.entries()[0].source_path,
            PathBuf::from("My Documents/read me.txt")
        );

        Ok(())
    }

    #[test]
    fn parse_skips_blank_lines() -> Result<()> {
        let manifest = Manifest::parse("\na one.bin\n\nb two.bin\n\n")?;

        assert_eq!(manifest.len(), 2);

        Ok(())
    }

    #[test]
    fn parse_handles_crlf_line_endings() -> Result<()> {
        let manifest = Manifest::parse("a one.bin\r\nb two.bin\r\n")?;

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries()[0].source_path, PathBuf::from("one.bin"));
        assert_eq!(manifest.entries()[1].source_path, PathBuf::from("two.bin"));

        Ok(())
    }

    #[test]
    fn parse_rejects_line_without_space() {
        match Manifest::parse("good one.bin\nbroken-line") {
            Err(Error::ManifestParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected manifest parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_empty_key() {
        assert!(matches!(
            Manifest::parse(" just-a-path.bin"),
            Err(Error::ManifestParse { line: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_missing_path() {
        assert!(matches!(
            Manifest::parse("key "),
            Err(Error::ManifestParse { line: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_control_characters_in_key() {
        assert!(matches!(
            Manifest::parse("bad\tkey file.bin"),
            Err(Error::ManifestParse { line: 1, .. })
        ));
    }

    #[test]
    fn parse_rejects_duplicate_key() {
        match Manifest::parse("twin first.bin\ntwin second.bin") {
            Err(Error::DuplicateKey(key)) => assert_eq!(key, "twin"),
            other => panic!("expected duplicate key error, got {:?}", other),
        }
    }

    #[test]
    fn resolve_relative_to_manifest_directory() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let manifest_path = dir.path().join("resources.txt");
        std::fs::write(&manifest_path, "data files/blob.bin\n")?;

        let manifest = Manifest::from_path(&manifest_path)?;
        let resolved = manifest.resolve_source_path(&manifest.entries()[0]);

        assert_eq!(resolved, dir.path().join("files/blob.bin"));

        Ok(())
    }

    #[test]
    fn resolve_leaves_absolute_paths_alone() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let manifest_path = dir.path().join("resources.txt");
        let absolute = dir.path().join("elsewhere.bin");
        std::fs::write(
            &manifest_path,
            format!("data {}\n", absolute.display()),
        )?;

        let manifest = Manifest::from_path(&manifest_path)?;
        let resolved = manifest.resolve_source_path(&manifest.entries()[0]);

        assert_eq!(resolved, absolute);

        Ok(())
    }
}
