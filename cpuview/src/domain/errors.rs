//! Structured error types for cpuview
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! None of these reach the filesystem layer: the node logs them and degrades
//! to a smaller document instead.

use super::types::Pid;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpuInfoError {
    #[error("Failed to read CPU information from {}: {source}", path.display())]
    CatalogUnreadable { path: PathBuf, source: std::io::Error },

    #[error("Failed to read {}: {source}", path.display())]
    CpusetUnreadable { path: PathBuf, source: std::io::Error },

    #[error("Failed to read cgroup membership of process {pid}: {source}")]
    CgroupMembershipUnreadable { pid: Pid, source: std::io::Error },

    #[error("Process {pid} is not in any {subsystem} cgroup")]
    SubsystemNotFound { pid: Pid, subsystem: String },
}
