use crate::snapshot::ProcessRecord;

/// Executable basenames that must not win the traversal.
///
/// gopls is often the deepest child and sits in `~/.config/go/telemetry/local`,
/// which is never the directory the user means. The empty string and "." are
/// what a failed or degenerate executable-path resolution collapses to.
pub const DEFAULT_DENYLIST: &[&str] = &["gopls", "", "."];

/// Decides whether a process may be selected as the traversal result, based
/// on its executable basename.
#[derive(Debug, Clone)]
pub struct ProcessFilter {
    denylist: Vec<String>,
}

impl ProcessFilter {
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: denylist.into_iter().map(Into::into).collect(),
        }
    }

    /// An unresolvable executable path maps to the empty basename, so such
    /// processes are excluded under the default denylist. Their children are
    /// still explored by the traversal.
    pub fn is_allowed(&self, record: &ProcessRecord) -> bool {
        let basename = record
            .exe
            .as_deref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("");
        !self.denylist.iter().any(|denied| denied == basename)
    }
}

impl Default for ProcessFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}
