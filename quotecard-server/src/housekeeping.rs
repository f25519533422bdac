use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

/// Outcome of a cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files deleted.
    pub removed: usize,
    /// Files that could not be deleted.
    pub failed: usize,
}

/// Bound the number and age of files in `dir`.
///
/// When more than `max_files` files exist, only the oldest surplus is deleted and age is not
/// considered in that pass. Otherwise every file last modified more than `max_age` ago is
/// deleted. A missing directory is a no-op; individual failures are logged and skipped.
pub fn cleanup_old_files(dir: &Path, max_age: Duration, max_files: usize) -> CleanupReport {
    let mut files = match list_with_mtime(dir) {
        Ok(files) => files,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(dir = %dir.display(), error = %err, "cannot list output dir");
            }
            return CleanupReport::default();
        }
    };
    files.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let mut report = CleanupReport::default();
    if files.len() > max_files {
        let surplus = files.len() - max_files;
        for (path, _) in files.iter().take(surplus) {
            remove(path, &mut report);
        }
        tracing::debug!(removed = report.removed, "output dir trimmed by count");
        return report;
    }

    let now = SystemTime::now();
    for (path, modified) in &files {
        let age = now.duration_since(*modified).unwrap_or(Duration::ZERO);
        if age > max_age {
            remove(path, &mut report);
        }
    }
    if report.removed > 0 {
        tracing::debug!(removed = report.removed, "output dir trimmed by age");
    }
    report
}

fn list_with_mtime(dir: &Path) -> std::io::Result<Vec<(PathBuf, SystemTime)>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        out.push((entry.path(), modified));
    }
    Ok(out)
}

fn remove(path: &Path, report: &mut CleanupReport) {
    match std::fs::remove_file(path) {
        Ok(()) => report.removed += 1,
        Err(err) => {
            report.failed += 1;
            tracing::warn!(path = %path.display(), error = %err, "failed to remove old output");
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/housekeeping.rs"]
mod tests;
