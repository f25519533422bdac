use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::assets::theme::Theme;

/// Source of uniform random indices used for background selection.
///
/// Injected so tests and reproducible CLI runs can pin which background is picked.
pub trait Chooser: Send + Sync {
    /// Return an index in `0..len`. Only called with `len > 0`.
    fn choose_index(&self, len: usize) -> usize;
}

/// Pick one item of `items` with `chooser`. Out-of-range indices are clamped to the last item,
/// so a misbehaving chooser still yields a valid pick. `None` only for an empty slice.
pub fn choose<'a, T>(chooser: &(impl Chooser + ?Sized), items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let i = chooser.choose_index(items.len()).min(items.len() - 1);
    items.get(i)
}

/// Thread-local RNG chooser used in production.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngChooser;

impl Chooser for ThreadRngChooser {
    fn choose_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic chooser driven by a seeded RNG.
#[derive(Debug)]
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    /// Build a chooser whose sequence depends only on `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Chooser for SeededChooser {
    fn choose_index(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}

/// Chooser that always returns the same position (clamped to the slice).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedChooser(pub usize);

impl Chooser for FixedChooser {
    fn choose_index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Maps themes to background image files on disk.
#[derive(Clone)]
pub struct BackgroundResolver {
    dir: PathBuf,
    chooser: Arc<dyn Chooser>,
}

impl std::fmt::Debug for BackgroundResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundResolver")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl BackgroundResolver {
    /// Resolver over `dir` using the thread RNG.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_chooser(dir, Arc::new(ThreadRngChooser))
    }

    /// Resolver over `dir` using an explicit random source.
    pub fn with_chooser(dir: impl Into<PathBuf>, chooser: Arc<dyn Chooser>) -> Self {
        Self {
            dir: dir.into(),
            chooser,
        }
    }

    /// Backgrounds directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Pick a background for `theme`.
    ///
    /// A curated candidate is tried first; if the theme has none or the picked file is missing,
    /// any file in the directory is chosen. `None` means no background is available at all.
    pub fn resolve(&self, theme: &Theme) -> Option<PathBuf> {
        if let Some(name) = choose(self.chooser.as_ref(), theme.background_candidates()) {
            let path = self.dir.join(name);
            if path.is_file() {
                tracing::debug!(theme = %theme, path = %path.display(), "themed background");
                return Some(path);
            }
            tracing::debug!(
                theme = %theme,
                missing = %path.display(),
                "themed background missing, using global pool"
            );
        }

        let pool = self.available();
        let Some(path) = choose(self.chooser.as_ref(), &pool).cloned() else {
            tracing::debug!(dir = %self.dir.display(), "no backgrounds available");
            return None;
        };
        tracing::debug!(theme = %theme, path = %path.display(), "pooled background");
        Some(path)
    }

    /// All regular files in the backgrounds directory, sorted by name.
    ///
    /// A missing or unreadable directory yields an empty list.
    pub fn available(&self) -> Vec<PathBuf> {
        list_files(&self.dir)
    }
}

pub(crate) fn list_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut out: Vec<PathBuf> = rd
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    // read_dir order is platform dependent; sorting keeps seeded picks reproducible.
    out.sort();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/backgrounds.rs"]
mod tests;
