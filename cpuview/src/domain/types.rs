//! Domain types providing compile-time safety and self-documentation
//!
//! Host CPU ids and container-visible ordinals are both small integers; the
//! newtypes keep them from being swapped by accident.

use std::fmt;

/// Host CPU ID
///
/// The index of a CPU as the host numbers it: the position of its block in
/// `/proc/cpuinfo` and the value used in `cpuset.cpus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CpuId(pub u32);

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPU:{}", self.0)
    }
}

impl From<u32> for CpuId {
    fn from(id: u32) -> Self {
        CpuId(id)
    }
}

/// Container-visible processor number (0-indexed, dense)
///
/// This is NOT the host CPU id: host CPUs 4 and 9 are shown to the container
/// as processors 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal(pub usize);

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process ID
///
/// Used to locate a process's cgroup membership under `/proc/<pid>/cgroup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID:{}", self.0)
    }
}

/// Inode number reported to the hosting filesystem layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Inode(pub u64);

impl fmt::Display for Inode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inode:{}", self.0)
    }
}
