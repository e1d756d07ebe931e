//! # cpuview - Main Entry Point
//!
//! Builds the host CPU catalog once, binds the `cpuinfo` virtual file to a
//! cgroup and prints what a process in that cgroup would read, or the file's
//! attributes with `--stat`.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::Write;
use std::sync::Arc;

use cpuview::catalog::HostCpuCatalog;
use cpuview::cgroup::CgroupDir;
use cpuview::cli::Args;
use cpuview::domain::Pid;
use cpuview::preflight::{check_catalog, run_preflight_checks};
use cpuview::registry;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOPERM: i32 = 77;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let permission_denied = err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
    });
    if permission_denied {
        EXIT_NOPERM
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let info = registry::lookup("cpuinfo").context("cpuinfo file is not registered")?;
    let cgroup_dir = resolve_cgroup_dir(&args, info.subsystem)?;
    run_preflight_checks(cgroup_dir.as_path())?;

    let catalog = Arc::new(HostCpuCatalog::build(&args.cpuinfo));
    check_catalog(&catalog, &args.cpuinfo, args.quiet);

    info!("Serving {} for {}", info.name, cgroup_dir.as_path().display());
    let file = (info.init)(cgroup_dir.into_path_buf(), catalog);

    let mut stdout = std::io::stdout().lock();
    if args.stat {
        serde_json::to_writer_pretty(&mut stdout, &file.attr())
            .context("Failed to write attributes")?;
        writeln!(stdout)?;
    } else {
        stdout.write_all(&file.read_all()).context("Failed to write cpuinfo")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Resolve the cgroup directory from CLI arguments.
///
/// - `--cgroup-dir DIR` - use DIR as is
/// - `--pid 1234` - look up process 1234's hierarchy for `subsystem`
/// - neither - look up the current process
fn resolve_cgroup_dir(args: &Args, subsystem: &str) -> Result<CgroupDir> {
    if let Some(ref dir) = args.cgroup_dir {
        return Ok(CgroupDir::from_path(dir));
    }

    let dir = match args.pid {
        Some(pid) => CgroupDir::for_pid(Pid(pid), &args.cgroup_root, subsystem),
        None => CgroupDir::current(&args.cgroup_root, subsystem),
    };
    Ok(dir?)
}
