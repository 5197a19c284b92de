//! Cargo package identification.
//!
//! Identifies packages carrying a `Cargo.toml` manifest, honoring workspace
//! membership: a manifest below another manifest is only claimed when the
//! parent is a workspace root listing the candidate as a member.

use anyhow::Result;
use semver::VersionReq;
use tracing::debug;

use crate::core::manifest::{extract, manifest_path, ExtractedData};
use crate::core::metadata::{PackageMetadata, PackageUpdate};
use crate::core::workspace::{resolve_membership, Membership};
use crate::provider::{Outcome, Provider};

/// Package type tag claimed by this provider.
pub const CARGO_PACKAGE_TYPE: &str = "cargo";

/// Identifies Cargo packages with `Cargo.toml` files.
#[derive(Debug, Default)]
pub struct CargoProvider;

impl CargoProvider {
    /// Create a new Cargo provider.
    pub fn new() -> Self {
        CargoProvider
    }
}

impl Provider for CargoProvider {
    fn package_type(&self) -> &str {
        CARGO_PACKAGE_TYPE
    }

    fn supported_api(&self) -> VersionReq {
        VersionReq::parse("^1.0").expect("static version requirement")
    }

    fn identify(&self, metadata: &PackageMetadata) -> Result<Outcome> {
        if let Some(existing) = metadata.package_type() {
            if existing != CARGO_PACKAGE_TYPE {
                return Ok(Outcome::NotApplicable);
            }
        }

        let candidate = metadata.path();
        let manifest_file = manifest_path(candidate);
        if !manifest_file.is_file() {
            return Ok(Outcome::NotApplicable);
        }

        // The candidate's own manifest must extract cleanly; corrupted input
        // is surfaced, not masked.
        let data = extract(&manifest_file)?;

        let (extracted_name, dependencies) = match data {
            ExtractedData::Workspace { .. } => {
                // A workspace root coordinates members, it is not itself a
                // package.
                debug!(path = %candidate.display(), "skipping workspace root");
                return Ok(Outcome::NotApplicable);
            }
            ExtractedData::Package { name, dependencies } => (name, dependencies),
        };

        let parent = candidate.parent().unwrap_or(candidate);
        if resolve_membership(candidate, parent) == Membership::NotMember {
            return Ok(Outcome::NotApplicable);
        }

        let name = match metadata.name() {
            Some(hint) => hint.to_string(),
            None => extracted_name,
        };

        Ok(Outcome::Identified(PackageUpdate {
            package_type: CARGO_PACKAGE_TYPE.to_string(),
            name,
            dependencies,
        }))
    }
}
