//! # Alias Store
//!
//! Loads, queries and persists the alias mapping of one scope.
//!
//! The store is a value snapshot: `with_added` and `with_removed` return new stores and
//! never touch the disk. Persisting always rewrites the whole document, first into a
//! temporary file next to the backing file and then by renaming it into place, so an
//! interrupted write never leaves a half-written backing file behind.
//!
//! Every CLI invocation performs a fresh load/mutate/persist cycle. Two invocations
//! racing on the same file can lose an update (last writer wins).

use crate::{
    core::scope::Scope,
    models::{AliasDefinition, AliasDocument},
};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failures while loading or persisting a store. Each names the backing file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("Failed to read alias collection '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid alias document.
    #[error("Failed to decode alias collection '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The document could not be serialized.
    #[error("Failed to encode alias collection for '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The temporary file could not be written or renamed into place.
    #[error("Failed to write alias collection '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An immutable snapshot of one scope's aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasStore {
    document: AliasDocument,
}

impl AliasStore {
    /// Loads the store of `scope`. A missing file yields an empty store.
    pub fn load(scope: Scope) -> Result<Self, StoreError> {
        Self::load_from(&scope.resolve())
    }

    /// Loads the store persisted at `path`.
    ///
    /// # Errors
    /// Returns [`StoreError::Decode`] when the file exists but is not a valid alias
    /// document. Callers treat this as fatal.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No alias file at '{}', starting empty.", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let document: AliasDocument =
            serde_json::from_str(&content).map_err(|e| StoreError::Decode {
                path: path.to_path_buf(),
                source: e,
            })?;
        log::debug!(
            "Loaded {} alias(es) from '{}'.",
            document.aliases.len(),
            path.display()
        );
        Ok(Self { document })
    }

    /// Exact-match lookup.
    pub fn lookup(&self, name: &str) -> Option<&AliasDefinition> {
        self.document.aliases.get(name)
    }

    /// Whether `name` is stored.
    pub fn contains(&self, name: &str) -> bool {
        self.document.aliases.contains_key(name)
    }

    /// Returns a copy of this store with `name` mapped to `definition`.
    pub fn with_added(&self, name: &str, definition: AliasDefinition) -> Self {
        let mut document = self.document.clone();
        document.aliases.insert(name.to_string(), definition);
        Self { document }
    }

    /// Returns a copy of this store without `name`.
    pub fn with_removed(&self, name: &str) -> Self {
        let mut document = self.document.clone();
        document.aliases.remove(name);
        Self { document }
    }

    /// Writes this store to the backing file of `scope`.
    pub fn persist(&self, scope: Scope) -> Result<(), StoreError> {
        self.persist_to(&scope.resolve())
    }

    /// Writes the full, pretty-printed document to `path`, replacing any previous content.
    pub fn persist_to(&self, path: &Path) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(&self.document).map_err(|e| StoreError::Encode {
                path: path.to_path_buf(),
                source: e,
            })?;

        let write_error = |source: std::io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let target = write_target(path).map_err(write_error)?;
        let parent = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent).map_err(write_error)?;
        temp_file.write_all(json.as_bytes()).map_err(write_error)?;
        temp_file.write_all(b"\n").map_err(write_error)?;
        match fs::metadata(&target) {
            Ok(existing) => fs::set_permissions(temp_file.path(), existing.permissions())
                .map_err(write_error)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(write_error(e)),
        }
        temp_file.as_file().sync_all().map_err(write_error)?;
        temp_file.persist(&target).map_err(|e| write_error(e.error))?;

        log::debug!(
            "Persisted {} alias(es) to '{}'.",
            self.document.aliases.len(),
            path.display()
        );
        Ok(())
    }

    /// Length in characters of the longest alias name, or 0 for an empty store.
    pub fn longest_name_length(&self) -> usize {
        self.document
            .aliases
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Whether the store holds no alias.
    pub fn is_empty(&self) -> bool {
        self.document.aliases.is_empty()
    }

    /// Number of stored aliases.
    pub fn len(&self) -> usize {
        self.document.aliases.len()
    }

    /// Iterates aliases in stable (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasDefinition)> {
        self.document
            .aliases
            .iter()
            .map(|(name, def)| (name.as_str(), def))
    }
}

/// The file a persist actually replaces. A symlinked backing file is followed to its
/// target so the link itself survives the rename; a dangling link resolves to the path
/// it points at.
fn write_target(path: &Path) -> std::io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(dir) if link.is_relative() => dir.join(link),
                    _ => link,
                })
            }
            Err(e) => Err(e),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Result of [`remove_alias`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The alias was removed and the file rewritten.
    Removed,
    /// No such alias; nothing was written.
    NotFound,
}

/// Load, add (overwriting any previous definition), persist.
pub fn add_alias(name: &str, definition: AliasDefinition, scope: Scope) -> Result<(), StoreError> {
    add_alias_at(&scope.resolve(), name, definition)
}

/// [`add_alias`] against an explicit backing file.
pub fn add_alias_at(path: &Path, name: &str, definition: AliasDefinition) -> Result<(), StoreError> {
    AliasStore::load_from(path)?
        .with_added(name, definition)
        .persist_to(path)
}

/// Load, remove, persist. The file is left untouched when `name` is not stored.
pub fn remove_alias(name: &str, scope: Scope) -> Result<RemoveOutcome, StoreError> {
    remove_alias_at(&scope.resolve(), name)
}

/// [`remove_alias`] against an explicit backing file.
pub fn remove_alias_at(path: &Path, name: &str) -> Result<RemoveOutcome, StoreError> {
    let store = AliasStore::load_from(path)?;
    if !store.contains(name) {
        return Ok(RemoveOutcome::NotFound);
    }
    store.with_removed(name).persist_to(path)?;
    Ok(RemoveOutcome::Removed)
}
