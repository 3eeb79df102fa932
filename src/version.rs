//! Version bump decisions.
//!
//! Both resolvers start from the registry's latest published version and never
//! from the local manifest version: the registry is the source of truth and
//! the manifest is brought in line with it.

use crate::domain::{increment, BumpLevel, BumpMode};
use crate::error::Result;
use crate::manifest::Manifest;
use semver::Version;

/// Result of aligning a manifest with the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// The version now held by the manifest
    pub version: Version,
    /// The manifest version differs from the one originally read
    pub local_changed: bool,
    /// The version is already the registry's latest, nothing to publish
    pub remote_current: bool,
}

impl BumpOutcome {
    /// Compare a manifest's current version against its original and the registry's
    pub fn compare(original: &Version, latest: &Version, manifest: &Manifest) -> Self {
        let version = manifest.version().clone();
        BumpOutcome {
            local_changed: *original != version,
            remote_current: *latest == version,
            version,
        }
    }
}

/// Manifest-driven decision.
///
/// Sets the manifest version to `latest` incremented by `mode`, or to `latest`
/// itself when the mode is [`BumpMode::None`].
///
/// # Errors
/// Returns [`crate::XutlError::Increment`] if the increment overflows.
pub fn bump(mode: BumpMode, manifest: &mut Manifest, latest: &Version) -> Result<BumpOutcome> {
    let original = manifest.version().clone();
    let next = match mode.level() {
        Some(level) => increment(latest, level)?,
        None => latest.clone(),
    };

    manifest.set_version(next);
    Ok(BumpOutcome::compare(&original, latest, manifest))
}

/// History-aware decision.
///
/// The manifest must already hold the registry's latest version. Without a
/// level nothing happens; with one the version is incremented.
///
/// # Returns
/// Whether the manifest version changed.
pub fn apply_level(manifest: &mut Manifest, level: Option<BumpLevel>) -> Result<bool> {
    match level {
        Some(level) => {
            let next = increment(manifest.version(), level)?;
            Ok(manifest.set_version(next))
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(version: &str) -> Manifest {
        Manifest::parse(&format!(
            r#"{{"name": "pkg", "version": "{}"}}"#,
            version
        ))
        .unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_none_at_published_version() {
        let mut pkg = manifest("1.2.3");
        let outcome = bump(BumpMode::None, &mut pkg, &v("1.2.3")).unwrap();

        assert_eq!(outcome.version, v("1.2.3"));
        assert!(!outcome.local_changed);
        assert!(outcome.remote_current);
    }

    #[test]
    fn test_minor_from_published_version() {
        let mut pkg = manifest("1.2.3");
        let outcome = bump(BumpMode::Minor, &mut pkg, &v("1.2.3")).unwrap();

        assert_eq!(outcome.version, v("1.3.0"));
        assert_eq!(pkg.version(), &v("1.3.0"));
        assert!(outcome.local_changed);
        assert!(!outcome.remote_current);
    }

    #[test]
    fn test_none_aligns_stale_manifest_with_registry() {
        let mut pkg = manifest("1.0.0");
        let outcome = bump(BumpMode::None, &mut pkg, &v("1.4.2")).unwrap();

        assert_eq!(outcome.version, v("1.4.2"));
        assert!(outcome.local_changed);
        assert!(outcome.remote_current);
    }

    #[test]
    fn test_none_never_changes_registry_version() {
        for (local, latest) in [("1.2.3", "1.2.3"), ("0.1.0", "2.0.0"), ("3.0.0", "0.0.0")] {
            let mut pkg = manifest(local);
            let outcome = bump(BumpMode::None, &mut pkg, &v(latest)).unwrap();
            assert_eq!(outcome.version, v(latest));
            assert_eq!(outcome.local_changed, local != latest);
        }
    }

    #[test]
    fn test_increment_ignores_local_version() {
        let mut pkg = manifest("9.9.9");
        let outcome = bump(BumpMode::Patch, &mut pkg, &v("1.2.3")).unwrap();
        assert_eq!(outcome.version, v("1.2.4"));
    }

    #[test]
    fn test_increment_then_noop_is_stable() {
        for mode in [BumpMode::Patch, BumpMode::Minor, BumpMode::Major] {
            let mut pkg = manifest("1.2.3");
            let first = bump(mode, &mut pkg, &v("1.2.3")).unwrap();
            let latest = first.version.clone();
            let second = bump(BumpMode::None, &mut pkg, &latest).unwrap();
            assert_eq!(second.version.to_string(), first.version.to_string());
            assert!(!second.local_changed);
        }
    }

    #[test]
    fn test_bump_overflow_is_increment_error() {
        let mut pkg = manifest("1.0.0");
        let latest = Version::new(1, 0, u64::MAX);
        let err = bump(BumpMode::Patch, &mut pkg, &latest).unwrap_err();
        assert!(matches!(err, crate::XutlError::Increment(_)));
        assert_eq!(pkg.version(), &v("1.0.0"));
    }

    #[test]
    fn test_apply_level_without_level() {
        let mut pkg = manifest("1.2.3");
        assert!(!apply_level(&mut pkg, None).unwrap());
        assert_eq!(pkg.version(), &v("1.2.3"));
    }

    #[test]
    fn test_apply_level_patch() {
        let mut pkg = manifest("1.2.3");
        assert!(apply_level(&mut pkg, Some(BumpLevel::Patch)).unwrap());
        assert_eq!(pkg.version(), &v("1.2.4"));
    }

    #[test]
    fn test_apply_level_major() {
        let mut pkg = manifest("1.2.3");
        assert!(apply_level(&mut pkg, Some(BumpLevel::Major)).unwrap());
        assert_eq!(pkg.version(), &v("2.0.0"));
    }

    #[test]
    fn test_compare_outcome() {
        let pkg = manifest("1.2.4");
        let outcome = BumpOutcome::compare(&v("1.0.0"), &v("1.2.3"), &pkg);
        assert!(outcome.local_changed);
        assert!(!outcome.remote_current);
    }
}
