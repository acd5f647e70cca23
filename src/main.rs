use anyhow::{Context, Result};
use clap::Parser;
use focused_cwd::{Error, ProcessFilter, ProcessIndex, ProcessSnapshot, find_deepest_descendant, x11};
use log::debug;

#[derive(Parser)]
#[command(name = "focused-cwd")]
#[command(about = "Print the working directory of the deepest process under the focused window")]
#[command(version)]
struct Cli {}

fn main() {
    // DEBUG=1 turns on the traversal trace, as a shorthand for
    // FOCUSED_CWD_LOG=debug.
    let default_level = if std::env::var("DEBUG").is_ok_and(|v| !v.is_empty()) {
        "debug"
    } else {
        "info"
    };
    env_logger::builder()
        .parse_env(env_logger::Env::new().filter_or("FOCUSED_CWD_LOG", default_level))
        .format_timestamp(None)
        .init();

    let _cli = Cli::parse();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let pid = x11::focused_window_pid().context("failed to get window PID")?;
    debug!("focused window PID: {pid}");

    let snapshot = ProcessSnapshot::capture().context("failed to capture process snapshot")?;
    let index = ProcessIndex::new(snapshot.into_records());

    let result = find_deepest_descendant(&index, &ProcessFilter::default(), pid as i32)
        .context("failed to search the process tree")?;
    debug!("depth: {}  PID: {}", result.depth, result.pid);

    // The search only returns PIDs present in the index.
    let record = index
        .record(result.pid)
        .ok_or(Error::ProcessNotFound(result.pid))?;
    let cwd = record
        .cwd
        .as_deref()
        .ok_or(Error::WorkingDirectory(result.pid))?;

    println!("{}", cwd.display());
    Ok(())
}
