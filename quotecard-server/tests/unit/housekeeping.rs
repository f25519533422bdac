use super::*;

const HOUR: Duration = Duration::from_secs(3600);

fn touch(dir: &Path, name: &str, age: Duration) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"png").unwrap();
    let file = std::fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
    path
}

#[test]
fn missing_dir_is_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let report = cleanup_old_files(&tmp.path().join("nope"), HOUR, 10);
    assert_eq!(report, CleanupReport::default());
}

#[test]
fn surplus_is_removed_oldest_first_ignoring_age() {
    let tmp = tempfile::tempdir().unwrap();
    let oldest = touch(tmp.path(), "a.png", HOUR * 50);
    let older = touch(tmp.path(), "b.png", HOUR * 40);
    let stale = touch(tmp.path(), "c.png", HOUR * 30);
    let fresh = touch(tmp.path(), "d.png", Duration::ZERO);

    let report = cleanup_old_files(tmp.path(), HOUR * 24, 2);
    assert_eq!(report.removed, 2);
    assert!(!oldest.exists());
    assert!(!older.exists());
    // Count pass returns early, so the stale survivor is kept this time.
    assert!(stale.exists());
    assert!(fresh.exists());
}

#[test]
fn files_older_than_max_age_are_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let stale = touch(tmp.path(), "old.png", HOUR * 25);
    let fresh = touch(tmp.path(), "new.png", HOUR);
    std::fs::create_dir(tmp.path().join("subdir")).unwrap();

    let report = cleanup_old_files(tmp.path(), HOUR * 24, 100);
    assert_eq!(report, CleanupReport { removed: 1, failed: 0 });
    assert!(!stale.exists());
    assert!(fresh.exists());
    assert!(tmp.path().join("subdir").exists());
}
