use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to X server")]
    Connect(#[from] ConnectError),

    #[error("lost connection to X server")]
    Connection(#[from] ConnectionError),

    #[error("X request failed")]
    Reply(#[from] ReplyError),

    #[error("no window is focused")]
    NoFocus,

    #[error("_NET_WM_PID property not set")]
    PropertyMissing,

    #[error("failed to get all processes")]
    Snapshot(#[source] procfs::ProcError),

    #[error("process {0} not found in snapshot")]
    ProcessNotFound(i32),

    #[error("failed to resolve working directory of process {0}")]
    WorkingDirectory(i32),
}
