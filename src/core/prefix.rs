//! Installation prefix layout.

use std::path::{Path, PathBuf};

use crate::core::platform::Platform;

/// Root of an installed dependency tree (`<prefix>/bin`, `<prefix>/lib`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    path: PathBuf,
}

impl Prefix {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Prefix { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding shared libraries.
    ///
    /// Windows resolves DLLs next to executables, so libraries live in `bin`.
    pub fn lib_dir(&self, platform: &Platform) -> PathBuf {
        if platform.is_windows() {
            self.bin_dir()
        } else {
            self.path.join("lib")
        }
    }

    /// Directory holding executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join("bin")
    }
}
