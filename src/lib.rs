//! One-shot filesystem capacity checks.
//!
//! Runs `df` for block and inode usage on each configured mount point,
//! zips the two-line table into a record, compares the usage percentage
//! against a threshold and writes one OK / WARNING / ERROR line per check.
//! `du` backs a separate directory-size query.
//!
//! Nothing here runs on import; `main.rs` is the only entry point.

pub mod collectors;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod pipeline;
pub mod util;

pub use collectors::probe::{Probe, SystemProbe};
pub use config::Config;
pub use error::CheckError;
pub use models::usage::{CheckKind, CheckResult, FilesystemTarget, UsageRecord};
