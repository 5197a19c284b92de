//! Cargo.toml extraction and classification.
//!
//! A manifest either declares a workspace (a `[workspace]` table with a
//! `members` list) or describes a single package. Extraction reads one file
//! and is a pure function of its contents.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use toml::Value;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Cargo.toml";

/// Path of the manifest inside a candidate directory.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_NAME)
}

/// Error raised when a manifest that exists cannot be extracted.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read manifest at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ExtractError {
    /// The manifest file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::Read { path, .. } => path,
            ExtractError::Parse { path, .. } => path,
        }
    }
}

/// Classified contents of a manifest.
///
/// A manifest with a `workspace.members` list is always classified as
/// `Workspace`, even when a `[package]` table is present alongside it; the
/// package data is discarded in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedData {
    /// A workspace root coordinating member subdirectories.
    Workspace {
        /// Relative subdirectory names listed under `workspace.members`.
        members: BTreeSet<String>,
    },

    /// A single package.
    Package {
        /// Package name, falling back to the containing directory name.
        name: String,

        /// Names of declared dependencies, excluding the package itself.
        dependencies: BTreeSet<String>,
    },
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    package: Option<RawPackage>,

    #[serde(default)]
    dependencies: BTreeMap<String, Value>,

    #[serde(default)]
    workspace: Option<RawWorkspace>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawWorkspace {
    #[serde(default)]
    members: Option<Vec<String>>,
}

/// Extract a manifest from a file path.
///
/// The caller is responsible for checking that the file exists; a missing
/// file surfaces as [`ExtractError::Read`].
pub fn extract(manifest_file: &Path) -> Result<ExtractedData, ExtractError> {
    let content = std::fs::read_to_string(manifest_file).map_err(|source| ExtractError::Read {
        path: manifest_file.to_path_buf(),
        source,
    })?;

    extract_from_str(&content, manifest_file)
}

/// Extract manifest content.
///
/// The path is used for error reporting and the directory-name fallback
/// only; nothing is read from disk.
pub fn extract_from_str(
    content: &str,
    manifest_file: &Path,
) -> Result<ExtractedData, ExtractError> {
    let raw: RawManifest = toml::from_str(content).map_err(|source| ExtractError::Parse {
        path: manifest_file.to_path_buf(),
        source,
    })?;

    // A members list makes this a workspace declaration regardless of any
    // co-present [package] table. A bare [workspace] table does not.
    if let Some(members) = raw.workspace.and_then(|ws| ws.members) {
        return Ok(ExtractedData::Workspace {
            members: members.into_iter().collect(),
        });
    }

    let name = raw
        .package
        .and_then(|pkg| pkg.name)
        .unwrap_or_else(|| directory_name(manifest_file));

    // Only dependency identity matters; version specs are ignored.
    let mut dependencies: BTreeSet<String> = raw.dependencies.into_keys().collect();

    // A package never depends on itself.
    dependencies.remove(&name);

    Ok(ExtractedData::Package { name, dependencies })
}

fn directory_name(manifest_file: &Path) -> String {
    manifest_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
