//! Package identification providers.
//!
//! A provider is a unit of identification logic invoked by the host once per
//! candidate directory. Providers read the shared metadata record and return
//! a proposed update; the host owns the ordered provider list and applies
//! accepted updates through the metadata merge step.

mod cargo;
mod registry;

use anyhow::Result;
use semver::{Version, VersionReq};

use crate::core::metadata::{PackageMetadata, PackageUpdate};

pub use cargo::{CargoProvider, CARGO_PACKAGE_TYPE};
pub use registry::{ProviderSet, RegistrationError};

/// Version of the identification API offered to providers.
pub const IDENTIFICATION_API_VERSION: Version = Version::new(1, 0, 0);

/// Result of running one provider against one candidate.
///
/// Fatal conditions (a manifest that exists but cannot be extracted) travel
/// through the error channel of [`Provider::identify`], never through this
/// enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The provider does not claim this candidate. Silent skip, no
    /// metadata changes.
    NotApplicable,

    /// The provider identified a package and proposes this update.
    Identified(PackageUpdate),
}

/// A unit of package identification logic.
pub trait Provider {
    /// Tag recorded as the metadata type for claimed candidates.
    fn package_type(&self) -> &str;

    /// The identification API range this provider was written against.
    ///
    /// Checked once against [`IDENTIFICATION_API_VERSION`] when the provider
    /// is registered, never per call.
    fn supported_api(&self) -> VersionReq;

    /// Inspect one candidate directory.
    ///
    /// Hints already present on the metadata (a type claimed by an earlier
    /// provider, a pre-seeded name) must be honored. An absent manifest or
    /// an unlisted workspace member is [`Outcome::NotApplicable`], never an
    /// error; a manifest that exists but cannot be extracted is an error,
    /// never a silent skip.
    fn identify(&self, metadata: &PackageMetadata) -> Result<Outcome>;
}
