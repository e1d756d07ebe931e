//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::catalog::HOST_CPUINFO_PATH;
use crate::cgroup::CGROUP_ROOT;

#[derive(Parser, Debug)]
#[command(
    name = "cpuview",
    version,
    about = "Show /proc/cpuinfo as seen through a cgroup cpuset",
    after_help = "\
EXAMPLES:
    cpuview                                          Current process's cgroup
    cpuview --pid 1234                               Cgroup of process 1234
    cpuview --cgroup-dir /sys/fs/cgroup/web.slice    Explicit cgroup directory
    cpuview --pid 1234 --stat                        File attributes as JSON"
)]
pub struct Args {
    /// cgroup directory containing cpuset.cpus
    #[arg(short = 'g', long, value_name = "DIR", conflicts_with = "pid")]
    pub cgroup_dir: Option<PathBuf>,

    /// Resolve the cpuset cgroup of this process from /proc/<PID>/cgroup
    #[arg(short, long)]
    pub pid: Option<u32>,

    /// Mount point of cgroupfs, used with --pid or the default lookup
    #[arg(long, value_name = "DIR", default_value = CGROUP_ROOT)]
    pub cgroup_root: PathBuf,

    /// Host CPU information dump
    #[arg(long, value_name = "FILE", default_value = HOST_CPUINFO_PATH)]
    pub cpuinfo: PathBuf,

    /// Print file attributes as JSON instead of the content
    #[arg(long)]
    pub stat: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
