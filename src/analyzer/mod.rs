//! History analysis - decides whether a published release is stale

pub mod publish_gap;

pub use publish_gap::{publish_gap, CommitDistance};
