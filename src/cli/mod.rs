//! Command-line entry points
//!
//! Both binaries are one-liners over [`manifest_main`] and [`history_main`],
//! which take the argument list and the external collaborators explicitly so
//! they can be driven from tests without spawning a process.

pub mod orchestration;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::command::{CommandRunner, SystemCommandRunner};
use crate::config::load_config;
use crate::domain::{BumpLevel, BumpMode};
use crate::error::{Result, XutlError};
use crate::git::{Git2Repository, Repository};
use crate::registry::{HttpRegistry, Registry};
use crate::ui::{self, Reporter};
use orchestration::{resolve_history, resolve_manifest, ResolveOptions};

pub const MANIFEST_USAGE: &str = "xutlversion <path/to/package.json> [ none | patch | minor | major ]";
pub const HISTORY_USAGE: &str = "xutlversion-git <path/to/package/> [ patch | minor | major ]";

/// Opens the repository containing a directory
pub type RepositoryOpener = Box<dyn Fn(&Path) -> Result<Box<dyn Repository>>>;

/// External collaborators used by the resolvers
pub struct Services {
    pub registry: Box<dyn Registry>,
    pub runner: Box<dyn CommandRunner>,
    pub open_repository: RepositoryOpener,
}

impl Services {
    /// Real HTTP registry, real child processes, libgit2 repositories
    pub fn system() -> Self {
        Services {
            registry: Box::new(HttpRegistry::new()),
            runner: Box::new(SystemCommandRunner),
            open_repository: Box::new(|path: &Path| -> Result<Box<dyn Repository>> {
                Ok(Box::new(Git2Repository::open(path)?))
            }),
        }
    }
}

/// Options shared by both binaries
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, help = "Registry base URL, overrides npm configuration")]
    pub registry: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Compute the version without writing the manifest")]
    pub dry_run: bool,

    #[arg(short, long, help = "Print progress to stderr")]
    pub verbose: bool,
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "xutlversion",
    version,
    about = "Align a package.json version with the registry and optionally bump it",
    override_usage = MANIFEST_USAGE
)]
pub struct ManifestArgs {
    #[arg(help = "Path to package.json")]
    pub manifest: PathBuf,

    #[arg(
        value_enum,
        value_name = "MODE",
        default_value_t = BumpMode::None,
        help = "Increment to apply"
    )]
    pub mode: BumpMode,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "xutlversion-git",
    version,
    about = "Bump a package version when commits exist past its release tag",
    override_usage = HISTORY_USAGE
)]
pub struct HistoryArgs {
    #[arg(help = "Path to the package directory")]
    pub package: PathBuf,

    #[arg(
        value_enum,
        value_name = "MODE",
        help = "Increment to apply; decided from history when omitted"
    )]
    pub mode: Option<BumpLevel>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Exit status of `xutlversion`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestExit {
    Success,
    Usage,
    Failure,
}

impl ManifestExit {
    pub fn code(self) -> u8 {
        match self {
            ManifestExit::Success => 0,
            ManifestExit::Usage => 1,
            ManifestExit::Failure => 2,
        }
    }
}

impl From<ManifestExit> for ExitCode {
    fn from(exit: ManifestExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Exit status of `xutlversion-git`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryExit {
    Success,
    ArgumentCount,
    InvalidMode,
    NotADirectory,
    MissingManifest,
    Failure,
}

impl HistoryExit {
    pub fn code(self) -> u8 {
        match self {
            HistoryExit::Success => 0,
            HistoryExit::ArgumentCount => 1,
            HistoryExit::InvalidMode => 2,
            HistoryExit::NotADirectory => 3,
            HistoryExit::MissingManifest => 4,
            HistoryExit::Failure => 5,
        }
    }
}

impl From<HistoryExit> for ExitCode {
    fn from(exit: HistoryExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// How an argument list was rejected
enum Rejection {
    /// Help or version was printed, not an error
    Informational,
    InvalidMode,
    Usage,
}

/// True when a parse error is about the `MODE` positional rather than an
/// option missing its value
fn names_mode(err: &clap::Error) -> bool {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => {
            arg.trim_matches(|c| matches!(c, '[' | ']' | '<' | '>')) == "MODE"
        }
        _ => false,
    }
}

fn reject(err: clap::Error, usage: &str, modes: &str) -> Rejection {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            Rejection::Informational
        }
        ErrorKind::InvalidValue if names_mode(&err) => {
            let value = match err.get(ContextKind::InvalidValue) {
                Some(ContextValue::String(value)) => value.clone(),
                _ => String::new(),
            };
            let err = XutlError::argument(format!("invalid mode: {} ({})", value, modes));
            ui::display_error(&err.to_string());
            ui::display_usage(usage);
            Rejection::InvalidMode
        }
        _ => {
            ui::display_usage(usage);
            Rejection::Usage
        }
    }
}

fn options(common: &CommonArgs) -> Result<ResolveOptions> {
    Ok(ResolveOptions {
        registry: common.registry.clone(),
        config: load_config(common.config.as_deref())?,
        dry_run: common.dry_run,
        reporter: Reporter::new(common.verbose),
    })
}

/// `xutlversion <path/to/package.json> [none|patch|minor|major]`
///
/// Exit codes: 0 success, 1 bad arguments, 2 runtime failure.
pub fn manifest_main<I, T>(args: I, services: &Services) -> ManifestExit
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match ManifestArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            return match reject(err, MANIFEST_USAGE, "none | patch | minor | major") {
                Rejection::Informational => ManifestExit::Success,
                Rejection::InvalidMode | Rejection::Usage => ManifestExit::Usage,
            };
        }
    };

    let result = options(&args.common)
        .map_err(anyhow::Error::from)
        .and_then(|options| resolve_manifest(&args.manifest, args.mode, &options, services));

    match result {
        Ok(resolution) => {
            ui::display_outcome(&resolution.name, &resolution.outcome);
            ManifestExit::Success
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ManifestExit::Failure
        }
    }
}

/// `xutlversion-git <path/to/package/> [patch|minor|major]`
///
/// Exit codes: 0 success, 1 bad argument count, 2 invalid mode, 3 path is not
/// a directory, 4 no manifest in the directory, 5 runtime failure.
pub fn history_main<I, T>(args: I, services: &Services) -> HistoryExit
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match HistoryArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            return match reject(err, HISTORY_USAGE, "patch | minor | major") {
                Rejection::Informational => HistoryExit::Success,
                Rejection::InvalidMode => HistoryExit::InvalidMode,
                Rejection::Usage => HistoryExit::ArgumentCount,
            };
        }
    };

    if !args.package.is_dir() {
        let err = XutlError::path(format!("{} is not a directory", args.package.display()));
        ui::display_error(&format!("{:#}", err));
        return HistoryExit::NotADirectory;
    }

    // The manifest file name comes from the configuration.
    let options = match options(&args.common) {
        Ok(options) => options,
        Err(e) => {
            ui::display_error(&format!("{:#}", anyhow::Error::from(e)));
            return HistoryExit::Failure;
        }
    };

    let manifest_path = args.package.join(&options.config.manifest);
    if !manifest_path.is_file() {
        let err = XutlError::path(format!("{} does not exist", manifest_path.display()));
        ui::display_error(&format!("{:#}", err));
        return HistoryExit::MissingManifest;
    }

    match resolve_history(&args.package, &manifest_path, args.mode, &options, services) {
        Ok(resolution) => {
            ui::display_outcome(&resolution.name, &resolution.outcome);
            HistoryExit::Success
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            HistoryExit::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_args_default_mode() {
        let args = ManifestArgs::try_parse_from(["xutlversion", "package.json"]).unwrap();
        assert_eq!(args.mode, BumpMode::None);
        assert_eq!(args.manifest, PathBuf::from("package.json"));
        assert!(!args.common.dry_run);
    }

    #[test]
    fn test_manifest_args_with_mode_and_flags() {
        let args = ManifestArgs::try_parse_from([
            "xutlversion",
            "pkg/package.json",
            "minor",
            "--registry",
            "https://npm.example.com/",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.mode, BumpMode::Minor);
        assert_eq!(args.common.registry.as_deref(), Some("https://npm.example.com/"));
        assert!(args.common.dry_run);
    }

    #[test]
    fn test_history_args_mode_is_optional() {
        let args = HistoryArgs::try_parse_from(["xutlversion-git", "pkg"]).unwrap();
        assert_eq!(args.mode, None);

        let args = HistoryArgs::try_parse_from(["xutlversion-git", "pkg", "major"]).unwrap();
        assert_eq!(args.mode, Some(BumpLevel::Major));
    }

    #[test]
    fn test_history_args_reject_none() {
        let err = HistoryArgs::try_parse_from(["xutlversion-git", "pkg", "none"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_invalid_value_names_mode() {
        let err = HistoryArgs::try_parse_from(["xutlversion-git", "pkg", "none"]).unwrap_err();
        assert!(names_mode(&err));

        let err = ManifestArgs::try_parse_from(["xutlversion", "package.json", "huge"]).unwrap_err();
        assert!(names_mode(&err));
    }

    #[test]
    fn test_option_without_value_is_not_a_mode() {
        let err = HistoryArgs::try_parse_from(["xutlversion-git", ".", "--registry"]).unwrap_err();
        assert!(!names_mode(&err));

        let err = ManifestArgs::try_parse_from(["xutlversion", "package.json", "--config"])
            .unwrap_err();
        assert!(!names_mode(&err));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = ManifestArgs::try_parse_from(["xutlversion", "a", "patch", "extra"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ManifestExit::Usage.code(), 1);
        assert_eq!(ManifestExit::Failure.code(), 2);
        assert_eq!(HistoryExit::InvalidMode.code(), 2);
        assert_eq!(HistoryExit::NotADirectory.code(), 3);
        assert_eq!(HistoryExit::MissingManifest.code(), 4);
        assert_eq!(HistoryExit::Failure.code(), 5);
    }
}
