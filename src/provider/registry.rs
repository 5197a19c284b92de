//! Ordered provider registration and the identification pass.
//!
//! The host owns an explicit, ordered list of providers. API compatibility
//! is negotiated once when a provider is registered, not per call.

use anyhow::Result;
use semver::{Version, VersionReq};
use thiserror::Error;

use crate::core::metadata::PackageMetadata;
use crate::provider::{Outcome, Provider, IDENTIFICATION_API_VERSION};

/// Error raised when a provider cannot be registered.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(
        "provider `{package_type}` requires identification API {required}, host offers {offered}"
    )]
    IncompatibleApi {
        package_type: String,
        required: VersionReq,
        offered: Version,
    },
}

/// Ordered set of identification providers.
///
/// Providers run in registration order. The first provider to claim a
/// candidate decides its type and name; later claims can only add
/// dependencies.
#[derive(Default)]
pub struct ProviderSet {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderSet {
    /// Create an empty provider set.
    pub fn new() -> Self {
        ProviderSet {
            providers: Vec::new(),
        }
    }

    /// Register a provider, negotiating API compatibility.
    pub fn register(&mut self, provider: Box<dyn Provider>) -> Result<(), RegistrationError> {
        let required = provider.supported_api();
        if !required.matches(&IDENTIFICATION_API_VERSION) {
            return Err(RegistrationError::IncompatibleApi {
                package_type: provider.package_type().to_string(),
                required,
                offered: IDENTIFICATION_API_VERSION,
            });
        }

        self.providers.push(provider);
        Ok(())
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run every registered provider against one candidate.
    ///
    /// Accepted updates are merged into the metadata in provider order. The
    /// first provider error aborts the pass for this candidate; the caller
    /// decides whether that ends the whole identification run.
    pub fn identify(&self, metadata: &mut PackageMetadata) -> Result<()> {
        for provider in &self.providers {
            match provider.identify(metadata)? {
                Outcome::NotApplicable => {}
                Outcome::Identified(update) => metadata.apply(&update),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::core::metadata::{DependencyKind, PackageUpdate};

    /// Provider stub with a fixed API requirement and canned outcome.
    struct StubProvider {
        package_type: &'static str,
        api: &'static str,
        dependencies: &'static [&'static str],
    }

    impl StubProvider {
        fn new(package_type: &'static str, api: &'static str) -> Self {
            StubProvider {
                package_type,
                api,
                dependencies: &[],
            }
        }

        fn with_dependencies(mut self, dependencies: &'static [&'static str]) -> Self {
            self.dependencies = dependencies;
            self
        }
    }

    impl Provider for StubProvider {
        fn package_type(&self) -> &str {
            self.package_type
        }

        fn supported_api(&self) -> VersionReq {
            VersionReq::parse(self.api).unwrap()
        }

        fn identify(&self, _metadata: &PackageMetadata) -> Result<Outcome> {
            Ok(Outcome::Identified(PackageUpdate {
                package_type: self.package_type.to_string(),
                name: format!("{}-name", self.package_type),
                dependencies: self
                    .dependencies
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<BTreeSet<_>>(),
            }))
        }
    }

    #[test]
    fn test_register_compatible_provider() {
        let mut providers = ProviderSet::new();
        assert!(providers.is_empty());

        providers
            .register(Box::new(StubProvider::new("stub", "^1.0")))
            .unwrap();

        assert_eq!(providers.len(), 1);
    }

    #[test]
    fn test_register_incompatible_provider() {
        let mut providers = ProviderSet::new();
        let result = providers.register(Box::new(StubProvider::new("stub", "^2.0")));

        let err = result.unwrap_err();
        assert!(matches!(err, RegistrationError::IncompatibleApi { .. }));
        assert!(err.to_string().contains("stub"));
        assert!(providers.is_empty());
    }

    #[test]
    fn test_identify_merges_in_registration_order() {
        let mut providers = ProviderSet::new();
        providers
            .register(Box::new(
                StubProvider::new("first", "^1.0").with_dependencies(&["a"]),
            ))
            .unwrap();
        providers
            .register(Box::new(
                StubProvider::new("second", "^1.0").with_dependencies(&["b"]),
            ))
            .unwrap();

        let mut metadata = PackageMetadata::new("/ws/pkg");
        providers.identify(&mut metadata).unwrap();

        // First claim wins type and name, dependencies accumulate.
        assert_eq!(metadata.package_type(), Some("first"));
        assert_eq!(metadata.name(), Some("first-name"));
        let build = metadata.dependencies(DependencyKind::Build);
        let names: Vec<&str> = build.iter().map(String::as_str).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_identify_with_no_providers_is_noop() {
        let providers = ProviderSet::new();
        let mut metadata = PackageMetadata::new("/ws/pkg");

        providers.identify(&mut metadata).unwrap();
        assert!(!metadata.is_identified());
    }
}
