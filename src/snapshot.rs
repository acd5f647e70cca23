use crate::error::Error;
use std::path::PathBuf;

/// View of one OS process, frozen at snapshot time.
///
/// `exe` and `cwd` resolution can fail independently per process (permission
/// denied, process exited mid-query); a failure is captured as `None` rather
/// than propagated, so the traversal can still walk through such processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: i32,
    /// May reference a PID absent from the snapshot if the parent already exited.
    pub parent_pid: i32,
    pub exe: Option<PathBuf>,
    /// Diagnostics only.
    pub cmdline: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// A single, non-refreshing capture of the process table.
#[derive(Debug)]
pub struct ProcessSnapshot {
    records: Vec<ProcessRecord>,
}

impl ProcessSnapshot {
    /// Capture every process currently visible in procfs.
    ///
    /// Processes whose stat cannot be read (exited between enumeration and
    /// read) are skipped entirely; they have no parent PID to index under.
    pub fn capture() -> Result<Self, Error> {
        let procs = procfs::process::all_processes().map_err(Error::Snapshot)?;

        let mut records = Vec::new();
        for proc in procs {
            let Ok(proc) = proc else { continue };
            let Ok(stat) = proc.stat() else { continue };
            records.push(ProcessRecord {
                pid: stat.pid,
                parent_pid: stat.ppid,
                exe: proc.exe().ok(),
                cmdline: proc.cmdline().unwrap_or_default(),
                cwd: proc.cwd().ok(),
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}
