//! Stevedore - Cargo package identification for polyglot build orchestrators
//!
//! This crate decides whether a candidate directory contains a Cargo
//! package, extracts its identity (name, dependency names), and resolves
//! whether the package stands alone or belongs to an enclosing workspace.
//! Identification providers propose updates to a shared per-candidate
//! metadata record; the host applies them through a single merge step.

pub mod core;
pub mod provider;

pub use crate::core::{
    extract, extract_from_str, manifest_path, resolve_membership, DependencyKind, ExtractError,
    ExtractedData, Membership, PackageMetadata, PackageUpdate, MANIFEST_NAME,
};

pub use crate::provider::{
    CargoProvider, Outcome, Provider, ProviderSet, RegistrationError, CARGO_PACKAGE_TYPE,
    IDENTIFICATION_API_VERSION,
};
