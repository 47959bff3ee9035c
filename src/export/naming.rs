//! Collision-free document naming
//!
//! Names are allocated per output directory. A candidate is taken when the
//! directory already holds something with that name, or when the current run
//! already handed it out. Suffixes grow strictly: `x.md`, `x-1.md`, `x-2.md`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::sink::Sink;

/// Answers whether a name is unavailable in some directory
pub trait NameProbe {
    fn is_taken(&self, name: &str) -> bool;
}

impl<F> NameProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_taken(&self, name: &str) -> bool {
        self(name)
    }
}

impl NameProbe for HashSet<String> {
    fn is_taken(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Return the first of `base+ext`, `base-1+ext`, `base-2+ext`, ... not taken
pub fn allocate(base: &str, extension: &str, probe: &impl NameProbe) -> String {
    let mut candidate = format!("{}{}", base, extension);
    let mut suffix: u64 = 0;

    while probe.is_taken(&candidate) {
        suffix += 1;
        candidate = format!("{}-{}{}", base, suffix, extension);
    }

    candidate
}

/// The active output directory of an export and the names claimed in it
#[derive(Debug, Clone)]
pub struct OutputContext {
    dir: PathBuf,
    claimed: HashSet<String>,
}

impl OutputContext {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            claimed: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a name inside this directory
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Reserve a fixed name; returns false if it was already claimed
    pub fn claim(&mut self, name: impl Into<String>) -> bool {
        self.claimed.insert(name.into())
    }

    /// Allocate and claim a name that neither this run nor `sink` has used
    pub fn allocate<S: Sink + ?Sized>(&mut self, base: &str, extension: &str, sink: &S) -> String {
        let dir = &self.dir;
        let claimed = &self.claimed;
        let name = allocate(base, extension, &|candidate: &str| {
            claimed.contains(candidate) || sink.exists(&dir.join(candidate))
        });

        debug!(dir = %self.dir.display(), base, name = %name, "allocated name");
        self.claimed.insert(name.clone());
        name
    }
}
