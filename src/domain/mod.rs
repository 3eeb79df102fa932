//! Domain logic - pure version rules independent of registries and git

pub mod tag;
pub mod version;

pub use tag::TagPattern;
pub use version::{clean_version, increment, BumpLevel, BumpMode, UNPUBLISHED};
