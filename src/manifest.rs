//! Package manifest (`package.json`) handling.
//!
//! The manifest is kept as an ordered JSON object so every field other than
//! `version` is written back exactly as it was read, in its original order.

use crate::error::{Result, XutlError};
use semver::Version;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default manifest file name inside a package directory
pub const MANIFEST_FILE: &str = "package.json";

/// In-memory package manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    name: String,
    version: Version,
    document: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    /// * [`XutlError::Json`] - if the text is not JSON
    /// * [`XutlError::Manifest`] - if it is not an object, or `name`/`version`
    ///   are missing, or `version` is not a semantic version
    pub fn parse(text: &str) -> Result<Self> {
        let document = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            _ => return Err(XutlError::manifest("manifest must be a JSON object")),
        };

        let name = document
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| XutlError::manifest("missing string field 'name'"))?
            .to_string();

        let raw_version = document
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| XutlError::manifest("missing string field 'version'"))?;
        let version = Version::parse(raw_version).map_err(|e| {
            XutlError::manifest(format!("invalid version '{}': {}", raw_version, e))
        })?;

        Ok(Manifest {
            name,
            version,
            document,
        })
    }

    /// Read and parse a manifest file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Replace the version, returning whether it differs from the previous one
    pub fn set_version(&mut self, version: Version) -> bool {
        let changed = self.version != version;
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
        self.version = version;
        changed
    }

    /// Render the manifest as tab-indented JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(&self.document, &mut serializer)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| XutlError::manifest(e.to_string()))
    }

    /// Write the manifest to `path`.
    ///
    /// The content goes to a temporary file beside the resolved target and is
    /// renamed over it, so a failed write never leaves a truncated manifest.
    /// Symlinks are followed and the target keeps its permissions.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let target = match fs::canonicalize(path) {
            Ok(target) => target,
            Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(e.into()),
        };
        let staging = staging_path(&target);

        if let Err(e) = stage(&staging, &target, json.as_bytes())
            .and_then(|()| fs::rename(&staging, &target))
        {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }
}

fn stage(staging: &Path, target: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(staging, content)?;
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(staging, meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| MANIFEST_FILE.into());
    name.push(".xutlversion.tmp");
    path.with_file_name(name)
}
