use crate::error::{Result, XutlError};
use crate::git::Repository;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    history: Vec<String>,
    tags: HashMap<String, String>,
    broken_tags: Vec<String>,
    history_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit; the first commit added is the newest
    pub fn add_commit(&mut self, hash: impl Into<String>) {
        self.history.push(hash.into());
    }

    /// Add a tag pointing to a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.insert(name.into(), hash.into());
    }

    /// Make resolving `name` fail
    pub fn break_tag(&mut self, name: impl Into<String>) {
        self.broken_tags.push(name.into());
    }

    /// Make listing the history fail with `message`
    pub fn fail_history(&mut self, message: impl Into<String>) {
        self.history_error = Some(message.into());
    }
}

impl Repository for MockRepository {
    fn commit_history(&self) -> Result<Vec<String>> {
        match &self.history_error {
            Some(message) => Err(XutlError::Git(git2::Error::from_str(message))),
            None => Ok(self.history.clone()),
        }
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>> {
        if self.broken_tags.iter().any(|t| t == tag_name) {
            return Err(XutlError::Git(git2::Error::from_str(&format!(
                "cannot peel tag {}",
                tag_name
            ))));
        }
        Ok(self.tags.get(tag_name).cloned())
    }
}
