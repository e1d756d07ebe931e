//! Table of virtual files the hosting filesystem layer can mount
//!
//! Each entry names the cgroup subsystem whose directory the file reads from,
//! so the host layer can resolve the right cgroup before constructing it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::HostCpuCatalog;
use crate::domain::Inode;
use crate::node::{CpuInfoFileNode, VirtualFile, INODE_CPUINFO};

/// Constructor for a virtual file bound to one cgroup directory
pub type InitFn = fn(PathBuf, Arc<HostCpuCatalog>) -> Box<dyn VirtualFile>;

/// Registration of one virtual file
#[derive(Debug, Clone, Copy)]
pub struct FileInfo {
    pub name: &'static str,
    pub inode: Inode,
    /// cgroup controller the file's directory belongs to
    pub subsystem: &'static str,
    pub init: InitFn,
}

static FILES: &[FileInfo] = &[FileInfo {
    name: "cpuinfo",
    inode: INODE_CPUINFO,
    subsystem: "cpuset",
    init: new_cpuinfo_file,
}];

fn new_cpuinfo_file(cgroup_dir: PathBuf, catalog: Arc<HostCpuCatalog>) -> Box<dyn VirtualFile> {
    Box::new(CpuInfoFileNode::new(cgroup_dir, catalog))
}

/// All registered files
#[must_use]
pub fn files() -> &'static [FileInfo] {
    FILES
}

/// Find a registered file by name
#[must_use]
pub fn lookup(name: &str) -> Option<&'static FileInfo> {
    FILES.iter().find(|f| f.name == name)
}
