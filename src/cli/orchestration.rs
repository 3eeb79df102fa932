//! Resolver workflows
//!
//! Each workflow runs the full sequence for one variant: read the manifest,
//! ask the registry, decide, and write the manifest back only when its
//! version changed. Nothing here parses arguments or picks exit codes.

use anyhow::{Context, Result};
use semver::Version;
use std::env;
use std::path::{Path, PathBuf};

use crate::analyzer::{publish_gap, CommitDistance};
use crate::boundary::BoundaryWarning;
use crate::cli::Services;
use crate::config::{resolve_registry, Config, RegistrySource};
use crate::domain::{BumpLevel, BumpMode, UNPUBLISHED};
use crate::manifest::Manifest;
use crate::ui::{self, Reporter};
use crate::version::{apply_level, bump, BumpOutcome};

/// Settings shared by both workflows
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Registry base URL given on the command line
    pub registry: Option<String>,

    /// Loaded configuration
    pub config: Config,

    /// Compute and report without writing the manifest
    pub dry_run: bool,

    pub reporter: Reporter,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Package name from the manifest
    pub name: String,

    /// Registry's latest published version
    pub latest: Version,

    pub outcome: BumpOutcome,

    /// Whether the manifest file was rewritten
    pub written: bool,
}

/// Changes the process working directory and restores it when dropped
pub struct WorkingDirGuard {
    original: PathBuf,
}

impl WorkingDirGuard {
    pub fn change_to(dir: &Path) -> Result<Self> {
        let original = env::current_dir().context("cannot read current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to {}", dir.display()))?;
        Ok(WorkingDirGuard { original })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            ui::display_error(&format!(
                "cannot restore directory {}: {}",
                self.original.display(),
                e
            ));
        }
    }
}

/// Manifest-driven workflow: align `manifest_path` with the registry and
/// optionally increment it by `mode`.
pub fn resolve_manifest(
    manifest_path: &Path,
    mode: BumpMode,
    options: &ResolveOptions,
    services: &Services,
) -> Result<Resolution> {
    let reporter = options.reporter;

    reporter.status(&format!("Reading {}", manifest_path.display()));
    let mut manifest = Manifest::read(manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path.display()))?;
    let original = manifest.version().clone();

    let latest = query_registry(manifest.name(), options, services)?;

    reporter.status(&format!("Applying mode '{}' to {}", mode, latest));
    let outcome = bump(mode, &mut manifest, &latest)?;
    warn_if_lowered(&original, &outcome.version);

    let written = finish(&manifest, manifest_path, &outcome, options)?;
    Ok(Resolution {
        name: manifest.name().to_string(),
        latest,
        outcome,
        written,
    })
}

/// History-aware workflow: align the manifest in `package_dir` with the
/// registry and increment it when the release tag is no longer the tip of
/// history, or when `level` asks for it explicitly.
///
/// The registry and history are queried from inside `package_dir`; the
/// original working directory is restored before this returns, on success
/// and on failure.
pub fn resolve_history(
    package_dir: &Path,
    manifest_path: &Path,
    level: Option<BumpLevel>,
    options: &ResolveOptions,
    services: &Services,
) -> Result<Resolution> {
    let reporter = options.reporter;
    let pattern = options.config.tag_pattern()?;

    reporter.status(&format!("Reading {}", manifest_path.display()));
    let mut manifest = Manifest::read(manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path.display()))?;
    let original = manifest.version().clone();

    let (latest, distance, tag) = {
        let _guard = WorkingDirGuard::change_to(package_dir)?;

        let latest = query_registry(manifest.name(), options, services)?;

        let tag = pattern.format(&latest);
        reporter.status(&format!("Locating {} in history", tag));
        let repo = (services.open_repository)(Path::new("."))
            .context("failed to open git repository")?;
        let distance =
            publish_gap(repo.as_ref(), &tag).context("failed to read commit history")?;

        (latest, distance, tag)
    };

    reporter.status(&format!("{} is {}", tag, distance));
    if distance == CommitDistance::Unknown && latest != UNPUBLISHED {
        ui::display_boundary_warning(&BoundaryWarning::ReleaseTagNotFound { tag });
    }

    manifest.set_version(latest.clone());
    let level = level.or(distance.default_level());
    if let Some(level) = level {
        reporter.status(&format!("Applying '{}' to {}", level, latest));
    }
    apply_level(&mut manifest, level)?;

    let outcome = BumpOutcome::compare(&original, &latest, &manifest);
    warn_if_lowered(&original, &outcome.version);

    let written = finish(&manifest, manifest_path, &outcome, options)?;
    Ok(Resolution {
        name: manifest.name().to_string(),
        latest,
        outcome,
        written,
    })
}

fn query_registry(name: &str, options: &ResolveOptions, services: &Services) -> Result<Version> {
    let (registry, source, reason) = resolve_registry(
        options.registry.as_deref(),
        &options.config,
        services.runner.as_ref(),
    );
    if source == RegistrySource::Default {
        ui::display_boundary_warning(&BoundaryWarning::RegistryFallback {
            registry: registry.clone(),
            reason: reason.map(|e| e.to_string()).unwrap_or_default(),
        });
    }

    options
        .reporter
        .status(&format!("Querying {} for {}", registry, name));
    let latest = services
        .registry
        .latest_version(&registry, name)
        .with_context(|| format!("failed to query {} for {}", registry, name))?;

    if latest == UNPUBLISHED {
        ui::display_boundary_warning(&BoundaryWarning::UnpublishedPackage {
            package: name.to_string(),
        });
    } else {
        options
            .reporter
            .success(&format!("Latest published version is {}", latest));
    }
    Ok(latest)
}

fn warn_if_lowered(original: &Version, next: &Version) {
    if next < original {
        ui::display_boundary_warning(&BoundaryWarning::VersionLowered {
            from: original.to_string(),
            to: next.to_string(),
        });
    }
}

fn finish(
    manifest: &Manifest,
    manifest_path: &Path,
    outcome: &BumpOutcome,
    options: &ResolveOptions,
) -> Result<bool> {
    if !outcome.local_changed {
        return Ok(false);
    }
    if options.dry_run {
        ui::display_status(&format!(
            "Dry run: {} not written",
            manifest_path.display()
        ));
        return Ok(false);
    }

    manifest
        .write(manifest_path)
        .with_context(|| format!("failed to write manifest {}", manifest_path.display()))?;
    options
        .reporter
        .success(&format!("Wrote {}", manifest_path.display()));
    Ok(true)
}
