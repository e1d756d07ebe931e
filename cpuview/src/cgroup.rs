//! Locate the cgroup directory a process's cpuset lives in.
//!
//! `/proc/<pid>/cgroup` has one line per hierarchy: `0::/path` for the unified
//! (v2) hierarchy and `N:ctrl1,ctrl2:/path` for each v1 hierarchy. A v1
//! hierarchy carrying the subsystem wins over the unified one.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{CpuInfoError, Pid};

/// Where cgroupfs is normally mounted
pub const CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Directory holding a cgroup's control files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgroupDir(PathBuf);

impl CgroupDir {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_path_buf())
    }

    /// Resolve the `subsystem` cgroup of `pid` under `root`.
    ///
    /// # Errors
    /// - `/proc/<pid>/cgroup` cannot be read
    /// - the process has no hierarchy carrying `subsystem`
    pub fn for_pid(pid: Pid, root: &Path, subsystem: &str) -> Result<Self, CpuInfoError> {
        let membership_path = format!("/proc/{}/cgroup", pid.0);
        let membership = fs::read_to_string(&membership_path)
            .map_err(|source| CpuInfoError::CgroupMembershipUnreadable { pid, source })?;

        let dir = resolve_membership(&membership, root, subsystem).ok_or_else(|| {
            CpuInfoError::SubsystemNotFound { pid, subsystem: subsystem.to_string() }
        })?;
        debug!("{pid} {subsystem} cgroup resolved to {}", dir.display());
        Ok(Self(dir))
    }

    /// The calling process's own cgroup
    ///
    /// # Errors
    /// See [`CgroupDir::for_pid`].
    pub fn current(root: &Path, subsystem: &str) -> Result<Self, CpuInfoError> {
        Self::for_pid(Pid(std::process::id()), root, subsystem)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for CgroupDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Map the contents of `/proc/<pid>/cgroup` to a directory under `root`.
fn resolve_membership(membership: &str, root: &Path, subsystem: &str) -> Option<PathBuf> {
    let mut unified = None;

    for line in membership.lines() {
        let mut fields = line.splitn(3, ':');
        let (Some(hierarchy), Some(controllers), Some(path)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let relative = path.trim().trim_start_matches('/');

        if hierarchy == "0" && controllers.is_empty() {
            unified = Some(root.join(relative));
        } else if controllers.split(',').any(|c| c == subsystem) {
            return Some(root.join(subsystem).join(relative));
        }
    }

    unified
}
