use crate::error::Result;
use crate::git::Repository;
use git2::{ErrorCode, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl Repository for Git2Repository {
    fn commit_history(&self) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        let mut history = Vec::new();
        for oid in revwalk {
            history.push(oid?.to_string());
        }

        Ok(history)
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let commit = reference.peel_to_commit()?;
                Ok(Some(commit.id().to_string()))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
