use std::path::Path;
use sysinfo::System;

pub struct ProcessChecker;

impl ProcessChecker {
    /// True if any running process executes from one of `target_paths`.
    /// Takes a mutable ref to System so sysinfo can reuse its internal
    /// buffers across calls.
    pub fn is_running<P: AsRef<Path>>(sys: &mut System, target_paths: &[P]) -> bool {
        sys.refresh_processes();

        sys.processes().values().any(|p| {
            p.exe()
                .map(|exe| target_paths.iter().any(|target| exe == target.as_ref()))
                .unwrap_or(false)
        })
    }
}
