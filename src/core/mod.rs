//! Core data structures for Stevedore.
//!
//! This module contains the foundational types used throughout Stevedore:
//! - Manifest extraction and classification
//! - Workspace membership resolution
//! - The shared per-candidate metadata record

pub mod manifest;
pub mod metadata;
pub mod workspace;

pub use manifest::{
    extract, extract_from_str, manifest_path, ExtractError, ExtractedData, MANIFEST_NAME,
};
pub use metadata::{DependencyKind, PackageMetadata, PackageUpdate};
pub use workspace::{resolve_membership, Membership};
