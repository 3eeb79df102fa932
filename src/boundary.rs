use std::fmt;

/// Non-fatal conditions met while resolving a version.
/// These are reported to the user but never abort a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The package manager could not name a registry, the default is used
    RegistryFallback { registry: String, reason: String },
    /// The registry has never seen this package
    UnpublishedPackage { package: String },
    /// The release tag for the published version is missing from history
    ReleaseTagNotFound { tag: String },
    /// The manifest was ahead of the registry and is moved back to it
    VersionLowered { from: String, to: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RegistryFallback { registry, reason } => {
                write!(
                    f,
                    "Could not read registry from npm ({}), using {}",
                    reason, registry
                )
            }
            BoundaryWarning::UnpublishedPackage { package } => {
                write!(f, "Package '{}' is not published yet", package)
            }
            BoundaryWarning::ReleaseTagNotFound { tag } => {
                write!(
                    f,
                    "Release tag '{}' not found in history, assuming unpublished changes",
                    tag
                )
            }
            BoundaryWarning::VersionLowered { from, to } => {
                write!(
                    f,
                    "Local version {} is ahead of the registry, resetting to {}",
                    from, to
                )
            }
        }
    }
}
