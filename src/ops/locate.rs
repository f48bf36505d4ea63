//! Product resolution.
//!
//! Turns a [`Product`] into a concrete path on disk when the product is
//! satisfied. Nothing here fails loudly: a missing directory, an
//! unreadable entry, a library that will not load or an executable
//! without its execute bit all come back as `None`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::loader::{DynamicLoader, SystemLoader};
use crate::core::naming::{is_valid_dynamic_library_name, required_executable_suffix};
use crate::core::platform::Platform;
use crate::core::product::{ExecutableProduct, FileProduct, LibraryProduct, Product};

static SYSTEM_LOADER: SystemLoader = SystemLoader;

/// Resolves products for one target platform.
///
/// Libraries are load-tested only when the target platform is the host;
/// a cross-compiled library cannot be opened here and is accepted on its
/// name alone.
pub struct Locator<'a> {
    platform: Platform,
    host: Platform,
    verbose: bool,
    loader: &'a dyn DynamicLoader,
}

impl<'a> Locator<'a> {
    /// Create a locator for `platform` using the system loader.
    pub fn new(platform: Platform) -> Self {
        Locator {
            platform,
            host: Platform::host(),
            verbose: false,
            loader: &SYSTEM_LOADER,
        }
    }

    /// Report each lookup step at info level instead of debug.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Override the platform considered to be the running host.
    pub fn with_host(mut self, host: Platform) -> Self {
        self.host = host;
        self
    }

    /// Use a different loader for the library load test.
    pub fn with_loader(mut self, loader: &'a dyn DynamicLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Resolve `product`, returning its path if satisfied.
    pub fn locate(&self, product: &Product) -> Option<PathBuf> {
        match product {
            Product::Library(p) => self.locate_library(p),
            Product::Executable(p) => self.locate_executable(p),
            Product::File(p) => self.locate_file(p),
        }
    }

    pub fn satisfied(&self, product: &Product) -> bool {
        self.locate(product).is_some()
    }

    fn locate_library(&self, lp: &LibraryProduct) -> Option<PathBuf> {
        let dir = lp.dir();
        if !dir.is_dir() {
            self.note(format_args!(
                "Directory {} does not exist!",
                dir.display()
            ));
            return None;
        }

        self.note(format_args!(
            "Checking for {} in {}",
            lp.candidates().join(", "),
            dir.display()
        ));

        for name in sorted_file_names(dir) {
            if !is_valid_dynamic_library_name(&name, &self.platform) {
                continue;
            }
            self.note(format_args!("Found a valid dl path {}", name));

            for candidate in lp.candidates() {
                if !name.starts_with(candidate.as_str()) {
                    continue;
                }

                let path = absolute(&dir.join(&name));
                self.note(format_args!(
                    "{} matches our search criteria of {}",
                    path.display(),
                    candidate
                ));

                if self.platform != self.host {
                    // Foreign binaries cannot be opened on this host.
                    return Some(path);
                }

                if self.loader.try_load(&path) {
                    return Some(path);
                }

                self.note(format_args!("{} cannot be dlopen'ed", path.display()));
            }
        }

        self.note(format_args!(
            "Could not locate {} inside {}",
            lp.candidates().join(", "),
            dir.display()
        ));
        None
    }

    fn locate_executable(&self, ep: &ExecutableProduct) -> Option<PathBuf> {
        let path = with_executable_suffix(ep.path(), required_executable_suffix(&self.platform));

        if !path.is_file() {
            self.note(format_args!("{} does not exist, reporting unsatisfied", path.display()));
            return None;
        }

        // Windows filesystems carry no execute bit.
        if !self.platform.is_windows() && !is_owner_executable(&path) {
            self.note(format_args!(
                "{} is not executable, reporting unsatisfied",
                path.display()
            ));
            return None;
        }

        Some(path)
    }

    fn locate_file(&self, fp: &FileProduct) -> Option<PathBuf> {
        if fp.path().is_file() {
            Some(fp.path().to_path_buf())
        } else {
            self.note(format_args!(
                "FileProduct {} does not exist",
                fp.path().display()
            ));
            None
        }
    }

    fn note(&self, msg: fmt::Arguments<'_>) {
        if self.verbose {
            tracing::info!("{}", msg);
        } else {
            tracing::debug!("{}", msg);
        }
    }
}

/// Entry names of `dir` in lexical order; unreadable entries are skipped.
fn sorted_file_names(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("failed to read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

fn with_executable_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() || path.as_os_str().to_string_lossy().ends_with(suffix) {
        return path.to_path_buf();
    }
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(unix)]
fn is_owner_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o100 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_owner_executable(path: &Path) -> bool {
    tracing::debug!(
        "cannot read permission bits on this host, accepting {}",
        path.display()
    );
    true
}
