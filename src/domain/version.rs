use crate::error::{Result, XutlError};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Version reported for a package that has never been published
pub const UNPUBLISHED: Version = Version::new(0, 0, 0);

/// Segment of a semantic version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

/// Requested mode of the manifest-driven resolver
///
/// `None` aligns the manifest with the registry without incrementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BumpMode {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpMode {
    /// The increment this mode asks for, if any
    pub fn level(self) -> Option<BumpLevel> {
        match self {
            BumpMode::None => None,
            BumpMode::Patch => Some(BumpLevel::Patch),
            BumpMode::Minor => Some(BumpLevel::Minor),
            BumpMode::Major => Some(BumpLevel::Major),
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        };
        f.write_str(name)
    }
}

impl fmt::Display for BumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level() {
            Some(level) => level.fmt(f),
            None => f.write_str("none"),
        }
    }
}

impl FromStr for BumpLevel {
    type Err = XutlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patch" => Ok(BumpLevel::Patch),
            "minor" => Ok(BumpLevel::Minor),
            "major" => Ok(BumpLevel::Major),
            other => Err(XutlError::argument(format!(
                "invalid mode: {} (patch | minor | major)",
                other
            ))),
        }
    }
}

impl FromStr for BumpMode {
    type Err = XutlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(BumpMode::None),
            "patch" => Ok(BumpMode::Patch),
            "minor" => Ok(BumpMode::Minor),
            "major" => Ok(BumpMode::Major),
            other => Err(XutlError::argument(format!(
                "invalid mode: {} (none | patch | minor | major)",
                other
            ))),
        }
    }
}

/// Normalizes a loosely written version into canonical semver.
///
/// Surrounding whitespace and any leading `=` or `v` characters are dropped
/// before parsing, so `" v1.2.3 "` and `"=1.2.3"` both clean to `1.2.3`.
///
/// # Returns
/// * `Some(Version)` - The canonical version
/// * `None` - If what remains is not a valid semantic version
pub fn clean_version(raw: &str) -> Option<Version> {
    let stripped = raw.trim().trim_start_matches(['=', 'v']).trim();
    Version::parse(stripped).ok()
}

/// Increments a version by the given level.
///
/// Follows the npm increment rules:
/// - **Major**: `1.2.3` -> `2.0.0`, but a `2.0.0-rc.1` prerelease becomes `2.0.0`
/// - **Minor**: `1.2.3` -> `1.3.0`, but a `1.3.0-rc.1` prerelease becomes `1.3.0`
/// - **Patch**: `1.2.3` -> `1.2.4`, but any prerelease `1.2.4-rc.1` becomes `1.2.4`
///
/// Prerelease and build metadata never survive an increment.
///
/// # Errors
/// Returns [`XutlError::Increment`] if the incremented segment overflows.
pub fn increment(version: &Version, level: BumpLevel) -> Result<Version> {
    let overflow = || XutlError::increment(version.to_string());
    let is_pre = !version.pre.is_empty();
    let mut next = version.clone();

    match level {
        BumpLevel::Major => {
            if !is_pre || version.minor != 0 || version.patch != 0 {
                next.major = version.major.checked_add(1).ok_or_else(overflow)?;
            }
            next.minor = 0;
            next.patch = 0;
        }
        BumpLevel::Minor => {
            if !is_pre || version.patch != 0 {
                next.minor = version.minor.checked_add(1).ok_or_else(overflow)?;
            }
            next.patch = 0;
        }
        BumpLevel::Patch => {
            if !is_pre {
                next.patch = version.patch.checked_add(1).ok_or_else(overflow)?;
            }
        }
    }

    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    Ok(next)
}
