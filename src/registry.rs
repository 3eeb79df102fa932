//! Registry version lookup
//!
//! A registry maps package names to published metadata. Only the
//! `dist-tags.latest` field of the package document is consulted.

use crate::domain::{clean_version, UNPUBLISHED};
use crate::error::{Result, XutlError};
use reqwest::Url;
use semver::Version;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Registry used when no other source names one
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Looks up the latest published version of a package
pub trait Registry {
    /// Latest published version of `package` on the registry at `registry`,
    /// or `0.0.0` if the package has never been published.
    fn latest_version(&self, registry: &str, package: &str) -> Result<Version>;
}

impl<R: Registry + ?Sized> Registry for Rc<R> {
    fn latest_version(&self, registry: &str, package: &str) -> Result<Version> {
        (**self).latest_version(registry, package)
    }
}

/// Build the package document URL, `<registry>/<encoded-name>`.
///
/// The name is encoded as a single path segment, so a scoped name such as
/// `@scope/pkg` keeps its slash as `%2F`. A trailing slash on the registry
/// base does not produce an empty segment.
pub fn package_url(registry: &str, package: &str) -> Result<Url> {
    let mut url = Url::parse(registry)
        .map_err(|e| XutlError::config(format!("invalid registry url '{}': {}", registry, e)))?;
    url.path_segments_mut()
        .map_err(|_| XutlError::config(format!("registry url '{}' cannot be a base", registry)))?
        .pop_if_empty()
        .push(package);
    Ok(url)
}

/// Turn a registry response into the latest published version.
///
/// * 404 - the package is unpublished, `0.0.0`
/// * any other non-200 status - [`XutlError::Registry`]
/// * 200 without a `dist-tags.latest` string - [`XutlError::NoVersionFound`]
/// * a `latest` that does not clean to semver - [`XutlError::InvalidVersion`]
pub fn interpret_response(status: u16, body: &str) -> Result<Version> {
    if status == 404 {
        return Ok(UNPUBLISHED);
    }
    if status != 200 {
        return Err(XutlError::registry(status));
    }

    let document: Value = serde_json::from_str(body).map_err(|_| XutlError::NoVersionFound)?;
    let latest = document
        .get("dist-tags")
        .and_then(|tags| tags.get("latest"))
        .and_then(Value::as_str)
        .filter(|latest| !latest.is_empty())
        .ok_or(XutlError::NoVersionFound)?;

    clean_version(latest).ok_or_else(|| XutlError::invalid_version(latest))
}

/// Registry client speaking HTTP
pub struct HttpRegistry {
    client: reqwest::blocking::Client,
}

impl HttpRegistry {
    pub fn new() -> Self {
        HttpRegistry {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for HttpRegistry {
    fn latest_version(&self, registry: &str, package: &str) -> Result<Version> {
        let url = package_url(registry, package)?;
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = if status == 200 {
            response.text()?
        } else {
            String::new()
        };
        interpret_response(status, &body)
    }
}

/// In-memory registry with canned responses, for tests and offline runs.
///
/// Packages without a canned response answer 404.
#[derive(Default)]
pub struct StaticRegistry {
    responses: HashMap<String, (u16, String)>,
    requests: RefCell<Vec<String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `package` with a document whose latest tag is `latest`
    pub fn with_latest(self, package: impl Into<String>, latest: &str) -> Self {
        let body = serde_json::json!({ "dist-tags": { "latest": latest } }).to_string();
        self.with_response(package, 200, body)
    }

    /// Answer lookups of `package` with a raw status and body
    pub fn with_response(
        mut self,
        package: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses.insert(package.into(), (status, body.into()));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Registry for StaticRegistry {
    fn latest_version(&self, registry: &str, package: &str) -> Result<Version> {
        let url = package_url(registry, package)?;
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(package) {
            Some((status, body)) => interpret_response(*status, body),
            None => interpret_response(404, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_url_plain_name() {
        let url = package_url("https://registry.npmjs.org", "left-pad").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/left-pad");
    }

    #[test]
    fn test_package_url_collapses_trailing_slash() {
        let url = package_url("https://registry.npmjs.org/", "left-pad").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/left-pad");
    }

    #[test]
    fn test_package_url_encodes_scoped_name() {
        let url = package_url("https://registry.npmjs.org/", "@xutl/json").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/@xutl%2Fjson");
    }

    #[test]
    fn test_package_url_keeps_registry_path() {
        let url = package_url("https://npm.example.com/api/npm/", "pkg").unwrap();
        assert_eq!(url.as_str(), "https://npm.example.com/api/npm/pkg");
    }

    #[test]
    fn test_package_url_invalid_registry() {
        assert!(matches!(
            package_url("not a url", "pkg"),
            Err(XutlError::Config(_))
        ));
    }

    #[test]
    fn test_not_found_is_unpublished() {
        assert_eq!(interpret_response(404, "").unwrap(), Version::new(0, 0, 0));
    }

    #[test]
    fn test_unexpected_status_is_registry_error() {
        assert!(matches!(
            interpret_response(500, ""),
            Err(XutlError::Registry { status: 500 })
        ));
        assert!(matches!(
            interpret_response(301, ""),
            Err(XutlError::Registry { status: 301 })
        ));
    }

    #[test]
    fn test_latest_is_cleaned() {
        let body = r#"{"name":"pkg","dist-tags":{"latest":"v1.4.0","next":"2.0.0-rc.1"}}"#;
        assert_eq!(interpret_response(200, body).unwrap(), Version::new(1, 4, 0));
    }

    #[test]
    fn test_missing_latest_is_no_version_found() {
        for body in [
            r#"{"name":"pkg"}"#,
            r#"{"dist-tags":{}}"#,
            r#"{"dist-tags":{"latest":""}}"#,
            r#"{"dist-tags":{"latest":7}}"#,
            "<html>",
        ] {
            assert!(
                matches!(interpret_response(200, body), Err(XutlError::NoVersionFound)),
                "body {} should have no version",
                body
            );
        }
    }

    #[test]
    fn test_unparseable_latest_is_invalid_version() {
        let body = r#"{"dist-tags":{"latest":"one point two"}}"#;
        assert!(matches!(
            interpret_response(200, body),
            Err(XutlError::InvalidVersion(raw)) if raw == "one point two"
        ));
    }

    #[test]
    fn test_static_registry_answers_and_records() {
        let registry = StaticRegistry::new()
            .with_latest("pkg", "1.2.3")
            .with_response("broken", 500, "");

        assert_eq!(
            registry.latest_version(DEFAULT_REGISTRY, "pkg").unwrap(),
            Version::new(1, 2, 3)
        );
        assert_eq!(
            registry.latest_version(DEFAULT_REGISTRY, "missing").unwrap(),
            Version::new(0, 0, 0)
        );
        assert!(registry.latest_version(DEFAULT_REGISTRY, "broken").is_err());
        assert_eq!(registry.requests().len(), 3);
        assert_eq!(registry.requests()[0], "https://registry.npmjs.org/pkg");
    }
}
