use std::fs;

use super::*;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not really an image").unwrap();
    path
}

#[test]
fn known_theme_picks_existing_candidate() {
    let tmp = tempfile::tempdir().unwrap();
    for name in Theme::Motivation.background_candidates() {
        touch(tmp.path(), name);
    }
    touch(tmp.path(), "beach.jpg");

    for idx in 0..3 {
        let resolver =
            BackgroundResolver::with_chooser(tmp.path(), Arc::new(FixedChooser(idx)));
        let got = resolver.resolve(&Theme::Motivation).unwrap();
        assert_eq!(
            got,
            tmp.path()
                .join(Theme::Motivation.background_candidates()[idx])
        );
    }
}

#[test]
fn missing_candidate_falls_back_to_pool() {
    let tmp = tempfile::tempdir().unwrap();
    let only = touch(tmp.path(), "random.png");

    let resolver = BackgroundResolver::with_chooser(tmp.path(), Arc::new(FixedChooser(0)));
    assert_eq!(resolver.resolve(&Theme::Stoicism), Some(only));
}

#[test]
fn every_known_theme_resolves_when_pool_is_non_empty() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "a.png");
    touch(tmp.path(), "b.png");

    let resolver = BackgroundResolver::with_chooser(tmp.path(), Arc::new(SeededChooser::new(7)));
    for theme in Theme::KNOWN {
        for _ in 0..8 {
            let path = resolver.resolve(&theme).unwrap();
            assert!(path.exists(), "{} -> {}", theme, path.display());
        }
    }
}

#[test]
fn unknown_theme_uses_pool_or_none() {
    let tmp = tempfile::tempdir().unwrap();
    let resolver = BackgroundResolver::new(tmp.path());
    let theme = Theme::parse("unknown_theme");
    assert_eq!(resolver.resolve(&theme), None);

    let a = touch(tmp.path(), "a.jpg");
    let b = touch(tmp.path(), "b.jpg");
    let got = resolver.resolve(&theme).unwrap();
    assert!(got == a || got == b);
}

#[test]
fn missing_directory_is_an_empty_pool() {
    let tmp = tempfile::tempdir().unwrap();
    let resolver = BackgroundResolver::new(tmp.path().join("does-not-exist"));
    assert!(resolver.available().is_empty());
    assert_eq!(resolver.resolve(&Theme::Happiness), None);
}

#[test]
fn pool_listing_skips_directories_and_is_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("nested")).unwrap();
    let b = touch(tmp.path(), "b.png");
    let a = touch(tmp.path(), "a.png");

    let resolver = BackgroundResolver::new(tmp.path());
    assert_eq!(resolver.available(), vec![a, b]);
}

#[test]
fn seeded_chooser_is_reproducible() {
    let a = SeededChooser::new(42);
    let b = SeededChooser::new(42);
    let seq_a: Vec<usize> = (0..16).map(|_| a.choose_index(5)).collect();
    let seq_b: Vec<usize> = (0..16).map(|_| b.choose_index(5)).collect();
    assert_eq!(seq_a, seq_b);
    assert!(seq_a.iter().all(|&i| i < 5));
}

struct OutOfRange;

impl Chooser for OutOfRange {
    fn choose_index(&self, len: usize) -> usize {
        len + 7
    }
}

#[test]
fn out_of_range_chooser_is_clamped() {
    assert_eq!(choose(&OutOfRange, &["a", "b", "c"]), Some(&"c"));
    assert_eq!(choose::<&str>(&OutOfRange, &[]), None);

    let tmp = tempfile::tempdir().unwrap();
    let last = Theme::Happiness.background_candidates().last().unwrap();
    touch(tmp.path(), last);
    let resolver = BackgroundResolver::with_chooser(tmp.path(), Arc::new(OutOfRange));
    assert_eq!(resolver.resolve(&Theme::Happiness), Some(tmp.path().join(last)));
    assert_eq!(resolver.resolve(&Theme::parse("cosmic")), Some(tmp.path().join(last)));
}
