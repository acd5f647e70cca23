//! Find the working directory of the deepest process under the focused X11
//! window.
//!
//! The focused window's `_NET_WM_PID` gives a root process; a single procfs
//! snapshot is searched for its deepest descendant whose executable basename
//! is not denylisted, and that process's working directory is the answer.

pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod snapshot;
pub mod x11;

pub use error::Error;
pub use filter::{DEFAULT_DENYLIST, ProcessFilter};
pub use hierarchy::{ProcessIndex, SearchResult, find_deepest_descendant};
pub use snapshot::{ProcessRecord, ProcessSnapshot};
