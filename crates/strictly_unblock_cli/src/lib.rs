//! Strictly Unblock CLI - host for sliding-block levels
//!
//! Loads level files, applies host configuration and replays move
//! sequences through [`strictly_unblock::Puzzle`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod level_file;
pub mod report;

pub use config::{ConfigError, HostConfig};
pub use level_file::{LevelFormat, load_level};
