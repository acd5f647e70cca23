use crate::error::Error;
use crate::filter::ProcessFilter;
use crate::snapshot::ProcessRecord;
use log::debug;
use std::collections::HashMap;

/// Snapshot records indexed by PID and by parent PID.
///
/// Children lists keep snapshot enumeration order, which is what the
/// tie-break below is defined against. Duplicate PIDs (possible under racy
/// captures) are resolved last-write-wins in the PID map.
#[derive(Debug)]
pub struct ProcessIndex {
    processes: HashMap<i32, ProcessRecord>,
    children: HashMap<i32, Vec<i32>>,
}

impl ProcessIndex {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        let mut processes = HashMap::new();
        let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
        for record in records {
            children.entry(record.parent_pid).or_default().push(record.pid);
            processes.insert(record.pid, record);
        }
        Self {
            processes,
            children,
        }
    }

    pub fn record(&self, pid: i32) -> Option<&ProcessRecord> {
        self.processes.get(&pid)
    }

    pub fn children(&self, pid: i32) -> &[i32] {
        self.children.get(&pid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, pid: i32) -> bool {
        self.processes.contains_key(&pid)
    }
}

/// Outcome of the deepest-descendant search: the winning PID and its distance
/// in edges from the traversal root. A childless root comes back as depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub pid: i32,
    pub depth: u32,
}

/// Find the deepest descendant of `root_pid` whose executable basename passes
/// the filter, preferring the last-enumerated candidate among depth ties.
///
/// The filter applies to candidates only: a leaf returns itself regardless of
/// its own allow-status, and a disallowed interior node does not stop its
/// descendants from being candidates. A subtree whose candidate is disallowed
/// never overwrites the running best, so the search falls back to a shallower
/// allowed candidate, or to the current node itself.
///
/// Fails if `root_pid` is absent from the index. Assumes the parent links form
/// a forest; a cyclic (corrupt) snapshot would recurse without bound.
pub fn find_deepest_descendant(
    index: &ProcessIndex,
    filter: &ProcessFilter,
    root_pid: i32,
) -> Result<SearchResult, Error> {
    if !index.contains(root_pid) {
        return Err(Error::ProcessNotFound(root_pid));
    }
    Ok(search(index, filter, root_pid, 0))
}

fn search(index: &ProcessIndex, filter: &ProcessFilter, pid: i32, trace_depth: usize) -> SearchResult {
    if let Some(record) = index.record(pid) {
        debug!(
            "{}{} allowed={} exe={:?} cmdline={:?} cwd={:?}",
            "    ".repeat(trace_depth),
            pid,
            filter.is_allowed(record),
            record.exe,
            record.cmdline.join(" "),
            record.cwd,
        );
    }

    let children = index.children(pid);
    if children.is_empty() {
        return SearchResult { pid, depth: 0 };
    }

    let mut best = SearchResult { pid, depth: 0 };
    for &child in children {
        let candidate = search(index, filter, child, trace_depth + 1);
        let allowed = index
            .record(candidate.pid)
            .is_some_and(|record| filter.is_allowed(record));
        // >= keeps the last-enumerated candidate among equal-depth ties.
        if candidate.depth >= best.depth && allowed {
            best = candidate;
        }
    }

    SearchResult {
        pid: best.pid,
        depth: best.depth + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an index from `(pid, parent_pid, exe)` triples, in enumeration
    /// order.
    fn fixture(procs: &[(i32, i32, &str)]) -> ProcessIndex {
        ProcessIndex::new(procs.iter().map(|&(pid, parent_pid, exe)| ProcessRecord {
            pid,
            parent_pid,
            exe: (!exe.is_empty()).then(|| exe.into()),
            cmdline: vec![],
            cwd: None,
        }))
    }

    fn find(index: &ProcessIndex, root: i32) -> SearchResult {
        find_deepest_descendant(index, &ProcessFilter::default(), root).unwrap()
    }

    #[test_log::test]
    fn childless_root_returns_itself_at_depth_zero() {
        let index = fixture(&[(1, 0, "/bin/sh")]);
        assert_eq!(find(&index, 1), SearchResult { pid: 1, depth: 0 });
    }

    #[test_log::test]
    fn childless_denylisted_root_is_still_returned() {
        let index = fixture(&[(1, 0, "/usr/bin/gopls")]);
        assert_eq!(find(&index, 1), SearchResult { pid: 1, depth: 0 });
    }

    #[test_log::test]
    fn result_depth_is_tree_height_when_everything_is_allowed() {
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/bin/sh"),
            (3, 1, "/bin/sh"),
            (4, 3, "/bin/sh"),
            (5, 4, "/bin/sh"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 5, depth: 3 });
    }

    #[test_log::test]
    fn deepest_leaf_wins() {
        // 1 -> {2, 3}, 2 -> {4}: longest path is 1 -> 2 -> 4.
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/bin/sh"),
            (3, 1, "/bin/sh"),
            (4, 2, "/bin/nvim"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 4, depth: 2 });
    }

    #[test_log::test]
    fn denylisted_deepest_leaf_falls_back_to_its_parent() {
        // Same tree, but 4 is denylisted. Node 2's only candidate is
        // disallowed, so 2 falls back to itself and reports (2, 1); at the
        // root that beats the leaf 3 at depth 0 and gains the final edge.
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/bin/sh"),
            (3, 1, "/bin/sh"),
            (4, 2, "/usr/bin/gopls"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 2, depth: 2 });
    }

    #[test_log::test]
    fn later_sibling_wins_depth_ties() {
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/bin/sh"),
            (3, 1, "/bin/sh"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 3, depth: 1 });
    }

    #[test_log::test]
    fn unresolvable_exe_is_never_selected_over_an_allowed_sibling() {
        // Process 2's executable could not be resolved; 3 is an allowed
        // alternative at the same depth on another branch.
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, ""),
            (3, 1, "/bin/sh"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 3, depth: 1 });

        // Same outcome with the branches enumerated the other way around.
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (3, 1, "/bin/sh"),
            (2, 1, ""),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 3, depth: 1 });
    }

    #[test_log::test]
    fn no_allowed_descendant_returns_the_root_with_accumulated_depth() {
        let index = fixture(&[(1, 0, "/bin/sh"), (2, 1, "/usr/bin/gopls")]);
        // Depth bookkeeping accumulates through the recursion even though
        // only the root is left as a PID candidate.
        assert_eq!(find(&index, 1), SearchResult { pid: 1, depth: 1 });
    }

    #[test_log::test]
    fn denylisted_interior_node_does_not_block_its_descendants() {
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/usr/bin/gopls"),
            (3, 2, "/bin/nvim"),
        ]);
        assert_eq!(find(&index, 1), SearchResult { pid: 3, depth: 2 });
    }

    #[test_log::test]
    fn missing_root_pid_is_an_error() {
        let index = fixture(&[(1, 0, "/bin/sh")]);
        let err = find_deepest_descendant(&index, &ProcessFilter::default(), 42).unwrap_err();
        assert!(matches!(err, Error::ProcessNotFound(42)));
    }

    #[test_log::test]
    fn search_is_deterministic_for_a_fixed_index() {
        let index = fixture(&[
            (1, 0, "/bin/sh"),
            (2, 1, "/bin/sh"),
            (3, 1, "/bin/sh"),
            (4, 2, "/bin/sh"),
            (5, 3, "/bin/sh"),
        ]);
        assert_eq!(find(&index, 1), find(&index, 1));
    }

    #[test]
    fn duplicate_pids_resolve_last_write_wins() {
        let index = ProcessIndex::new([
            ProcessRecord {
                pid: 2,
                parent_pid: 1,
                exe: Some("/bin/old".into()),
                cmdline: vec![],
                cwd: None,
            },
            ProcessRecord {
                pid: 2,
                parent_pid: 1,
                exe: Some("/bin/new".into()),
                cmdline: vec![],
                cwd: None,
            },
        ]);
        assert_eq!(
            index.record(2).unwrap().exe.as_deref(),
            Some(std::path::Path::new("/bin/new"))
        );
    }
}
