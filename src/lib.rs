pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod registry;
pub mod ui;
pub mod version;

pub use error::{Result, XutlError};
