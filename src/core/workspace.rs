//! Workspace membership resolution.
//!
//! A candidate directory is only identifiable on its own when nothing above
//! it claims it: either there is no parent manifest, or the parent is a
//! workspace root that lists the candidate as a member.

use std::path::Path;

use tracing::debug;

use crate::core::manifest::{extract, manifest_path, ExtractedData};

/// Whether a candidate directory may be identified on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Root-level package, or listed member of the parent workspace.
    Eligible,

    /// Sits under another manifest without being listed as a member.
    NotMember,
}

/// Decide whether `candidate` is identifiable relative to `parent`.
///
/// The check is tolerant of the parent: a missing or unextractable parent
/// manifest counts as "no workspace above". Only the candidate's own
/// manifest is allowed to fail extraction, and that failure belongs to the
/// caller, not to this check.
pub fn resolve_membership(candidate: &Path, parent: &Path) -> Membership {
    // At the filesystem root there is nothing to check against.
    if candidate == parent {
        return Membership::Eligible;
    }

    let parent_manifest = manifest_path(parent);
    if !parent_manifest.is_file() {
        return Membership::Eligible;
    }

    match extract(&parent_manifest) {
        Ok(ExtractedData::Workspace { members }) => {
            let dir_name = candidate
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            if members.contains(&dir_name) {
                Membership::Eligible
            } else {
                debug!(
                    candidate = %candidate.display(),
                    "not listed in parent workspace members"
                );
                Membership::NotMember
            }
        }
        // The parent is an ordinary package. Anything below it must be
        // claimed through an enclosing workspace instead.
        Ok(ExtractedData::Package { .. }) => {
            debug!(
                candidate = %candidate.display(),
                "parent manifest is a package, not a workspace"
            );
            Membership::NotMember
        }
        // A parent manifest that does not extract cleanly is treated like a
        // missing one.
        Err(err) => {
            debug!(error = %err, "ignoring unextractable parent manifest");
            Membership::Eligible
        }
    }
}
