//! Git operations abstraction layer
//!
//! The history-aware resolver only needs two questions answered by version
//! control: which commits exist (newest first) and which commit a tag points
//! at. The [Repository] trait captures exactly that so the real
//! implementation can be swapped for a mock in tests.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations needed to detect unpublished commits
pub trait Repository {
    /// List every commit reachable from HEAD
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Full commit hashes, newest first
    /// * `Err` - If HEAD cannot be resolved or the walk fails
    fn commit_history(&self) -> Result<Vec<String>>;

    /// Resolve a tag to the hash of the commit it points at
    ///
    /// Annotated tags are peeled to their target commit.
    ///
    /// # Returns
    /// * `Ok(Some(hash))` - The tagged commit
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If the tag exists but cannot be resolved to a commit
    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>>;
}
