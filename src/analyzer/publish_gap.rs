use crate::domain::BumpLevel;
use crate::error::Result;
use crate::git::Repository;
use std::fmt;

/// How far the released commit sits behind the tip of history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDistance {
    /// The tagged commit is the newest commit
    Tip,
    /// The tagged commit is this many commits behind the newest
    Behind(usize),
    /// The tag is missing, unresolvable, or its commit is not in history
    Unknown,
}

impl CommitDistance {
    /// Whether commits exist that the published release does not contain
    pub fn has_unpublished_changes(self) -> bool {
        !matches!(self, CommitDistance::Tip)
    }

    /// Level to apply when the caller did not request one
    pub fn default_level(self) -> Option<BumpLevel> {
        if self.has_unpublished_changes() {
            Some(BumpLevel::Patch)
        } else {
            None
        }
    }
}

impl fmt::Display for CommitDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitDistance::Tip => write!(f, "at the tip of history"),
            CommitDistance::Behind(n) => write!(f, "{} commit(s) behind the tip", n),
            CommitDistance::Unknown => write!(f, "not found in history"),
        }
    }
}

/// Locate the commit tagged `tag_name` in the history of `repo`.
///
/// Assumes a linear history and a consistent tagging convention. A tag that
/// is missing or cannot be resolved is reported as [`CommitDistance::Unknown`]
/// rather than an error; failing to list the history itself propagates.
pub fn publish_gap<R: Repository + ?Sized>(repo: &R, tag_name: &str) -> Result<CommitDistance> {
    let history = repo.commit_history()?;

    let tagged = match repo.resolve_tag(tag_name) {
        Ok(Some(hash)) => hash,
        Ok(None) | Err(_) => return Ok(CommitDistance::Unknown),
    };

    Ok(match history.iter().position(|hash| *hash == tagged) {
        Some(0) => CommitDistance::Tip,
        Some(n) => CommitDistance::Behind(n),
        None => CommitDistance::Unknown,
    })
}
