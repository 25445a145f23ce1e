//! Command-line entry point: parses a workload file, runs the simulation,
//! and prints the completion report.
//!
//! Argument handling is manual `std::env::args()`, in the style of
//! `stenzel-os-x86-ultra/os/src/main.rs` rather than a `clap` app — the
//! surface is two flags and one positional path, not worth a derive.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use log::info;

use cfs_sim::sched::SchedulerCore;
use cfs_sim::{report, workload};

struct Args {
    workload_path: PathBuf,
    verbosity: i32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut workload_path = None;
    let mut verbosity = 0;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbosity += 1,
            "-q" | "--quiet" => verbosity -= 1,
            other if other.starts_with('-') => {
                anyhow::bail!("unsupported option `{other}`");
            }
            other => {
                if workload_path.is_some() {
                    anyhow::bail!("unexpected extra argument `{other}`");
                }
                workload_path = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Args {
        workload_path: workload_path.context("usage: cfs-sim [-v|-q] <workload-file>")?,
        verbosity,
    })
}

fn init_logging(verbosity: i32) {
    let level = match verbosity {
        i32::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;
    init_logging(args.verbosity);

    let file = File::open(&args.workload_path)
        .with_context(|| format!("failed to open {}", args.workload_path.display()))?;
    let parsed = workload::parse(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.workload_path.display()))?;

    info!(
        "loaded {} task(s); time_quantum={}ns min_granularity={}ns",
        parsed.tasks.len(),
        parsed.config.time_quantum,
        parsed.config.min_granularity
    );

    let mut sched =
        SchedulerCore::initialize(parsed.config.time_quantum, parsed.config.min_granularity);
    for task in parsed.tasks {
        sched.schedule_task(task);
    }
    sched.run_all_tasks();

    info!(
        "simulation finished at runtime={}ns, {} task(s) completed",
        sched.runtime(),
        sched.completed().len()
    );

    report::write_table(io::stdout().lock(), sched.completed()).context("failed to write report")?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cfs-sim: {err:#}");
            ExitCode::from(1)
        }
    }
}
