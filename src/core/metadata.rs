//! Shared metadata record for one candidate directory.
//!
//! The host creates one [`PackageMetadata`] per candidate before any
//! provider runs. Providers never mutate it directly; they return a proposed
//! [`PackageUpdate`] and the host applies it through [`PackageMetadata::apply`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Classification of a dependency's use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyKind {
    /// Needed to build the package.
    Build,

    /// Needed to run the package.
    Run,
}

impl DependencyKind {
    /// Every kind tracked on a metadata record.
    pub const ALL: [DependencyKind; 2] = [DependencyKind::Build, DependencyKind::Run];

    /// Stable string tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Build => "build",
            DependencyKind::Run => "run",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider's proposed partial update for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    /// Package type tag of the proposing provider.
    pub package_type: String,

    /// Resolved package name.
    pub name: String,

    /// Dependency names to add to every dependency kind.
    pub dependencies: BTreeSet<String>,
}

/// Metadata record for one candidate directory.
///
/// Lives for the whole identification pass of its candidate and is owned by
/// exactly one caller at a time.
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    path: PathBuf,
    package_type: Option<String>,
    name: Option<String>,
    dependencies: BTreeMap<DependencyKind, BTreeSet<String>>,
}

impl PackageMetadata {
    /// Create an unidentified record for a candidate directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let dependencies = DependencyKind::ALL
            .iter()
            .map(|kind| (*kind, BTreeSet::new()))
            .collect();

        PackageMetadata {
            path: path.into(),
            package_type: None,
            name: None,
            dependencies,
        }
    }

    /// Seed a name hint before providers run.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Seed a type hint before providers run.
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// The candidate directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The package type, once a provider has claimed the candidate.
    pub fn package_type(&self) -> Option<&str> {
        self.package_type.as_deref()
    }

    /// The package name, once set by a hint or a provider.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Dependency names recorded for one kind.
    pub fn dependencies(&self, kind: DependencyKind) -> &BTreeSet<String> {
        // Both kinds are inserted at construction.
        &self.dependencies[&kind]
    }

    /// Whether any provider has claimed the candidate.
    pub fn is_identified(&self) -> bool {
        self.package_type.is_some()
    }

    /// Apply an accepted identification update.
    ///
    /// `package_type` and `name` keep their first value; dependency sets
    /// union the update into every kind and only ever grow. Applying the
    /// same update twice changes nothing.
    pub fn apply(&mut self, update: &PackageUpdate) {
        if self.package_type.is_none() {
            self.package_type = Some(update.package_type.clone());
        }
        if self.name.is_none() {
            self.name = Some(update.name.clone());
        }
        for kind in DependencyKind::ALL {
            if let Some(set) = self.dependencies.get_mut(&kind) {
                set.extend(update.dependencies.iter().cloned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(package_type: &str, name: &str, deps: &[&str]) -> PackageUpdate {
        PackageUpdate {
            package_type: package_type.to_string(),
            name: name.to_string(),
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_new_metadata_is_unidentified() {
        let metadata = PackageMetadata::new("/ws/pkg");

        assert!(!metadata.is_identified());
        assert_eq!(metadata.package_type(), None);
        assert_eq!(metadata.name(), None);
        for kind in DependencyKind::ALL {
            assert!(metadata.dependencies(kind).is_empty());
        }
    }

    #[test]
    fn test_apply_sets_type_name_and_dependencies() {
        let mut metadata = PackageMetadata::new("/ws/pkg");
        metadata.apply(&update("cargo", "pkg", &["serde", "toml"]));

        assert_eq!(metadata.package_type(), Some("cargo"));
        assert_eq!(metadata.name(), Some("pkg"));
        for kind in DependencyKind::ALL {
            assert_eq!(metadata.dependencies(kind).len(), 2);
        }
    }

    #[test]
    fn test_first_writer_wins_for_type_and_name() {
        let mut metadata = PackageMetadata::new("/ws/pkg");
        metadata.apply(&update("cargo", "first", &[]));
        metadata.apply(&update("python", "second", &[]));

        assert_eq!(metadata.package_type(), Some("cargo"));
        assert_eq!(metadata.name(), Some("first"));
    }

    #[test]
    fn test_name_hint_is_kept() {
        let mut metadata = PackageMetadata::new("/ws/pkg").with_name("hinted");
        metadata.apply(&update("cargo", "extracted", &[]));

        assert_eq!(metadata.name(), Some("hinted"));
    }

    #[test]
    fn test_dependency_sets_only_grow() {
        let mut metadata = PackageMetadata::new("/ws/pkg");
        metadata.apply(&update("cargo", "pkg", &["serde", "toml"]));
        metadata.apply(&update("cargo", "pkg", &["serde", "anyhow"]));

        let build = metadata.dependencies(DependencyKind::Build);
        let names: Vec<&str> = build.iter().map(String::as_str).collect();
        assert_eq!(names, ["anyhow", "serde", "toml"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut metadata = PackageMetadata::new("/ws/pkg");
        let proposed = update("cargo", "pkg", &["serde", "toml"]);

        metadata.apply(&proposed);
        let before = metadata.dependencies(DependencyKind::Run).len();
        metadata.apply(&proposed);

        assert_eq!(metadata.dependencies(DependencyKind::Run).len(), before);
    }

    #[test]
    fn test_dependency_kind_tags() {
        assert_eq!(DependencyKind::Build.as_str(), "build");
        assert_eq!(DependencyKind::Run.to_string(), "run");
    }
}
