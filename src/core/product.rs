//! Build products: the artifacts a package expects its install step to
//! have produced.
//!
//! A product is an expectation, not a file. It records where to look and
//! what to look for; [`crate::ops::locate::Locator`] turns it into a
//! concrete path when the expectation holds.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::platform::Platform;
use crate::core::prefix::Prefix;
use crate::ops::locate::Locator;

/// Error constructing a product.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("library product `{variable}` has no candidate names")]
    NoCandidates { variable: String },
}

/// A shared library found by scanning a directory for candidate names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryProduct {
    dir: PathBuf,
    candidates: Vec<String>,
    variable: String,
}

impl LibraryProduct {
    /// Declare a library searched for in `dir`.
    ///
    /// `candidates` are file name prefixes tried in order, e.g. `libfoo`
    /// matches `libfoo.so.2`. At least one is required.
    pub fn new(
        dir: impl Into<PathBuf>,
        candidates: Vec<String>,
        variable: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let variable = variable.into();
        if candidates.is_empty() {
            return Err(ProductError::NoCandidates { variable });
        }

        Ok(LibraryProduct {
            dir: dir.into(),
            candidates,
            variable,
        })
    }

    /// Declare a library in the library directory of `prefix`.
    pub fn in_prefix(
        prefix: &Prefix,
        platform: &Platform,
        candidates: Vec<String>,
        variable: impl Into<String>,
    ) -> Result<Self, ProductError> {
        LibraryProduct::new(prefix.lib_dir(platform), candidates, variable)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

/// An executable at a known path.
///
/// On Windows the `.exe` suffix is appended during lookup when missing,
/// so the same declaration works across platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableProduct {
    path: PathBuf,
    variable: String,
}

impl ExecutableProduct {
    pub fn new(path: impl Into<PathBuf>, variable: impl Into<String>) -> Self {
        ExecutableProduct {
            path: path.into(),
            variable: variable.into(),
        }
    }

    /// Declare `binname` inside the binary directory of `prefix`.
    pub fn in_prefix(prefix: &Prefix, binname: &str, variable: impl Into<String>) -> Self {
        ExecutableProduct::new(prefix.bin_dir().join(binname), variable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Any regular file at a known path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProduct {
    path: PathBuf,
    variable: String,
}

impl FileProduct {
    pub fn new(path: impl Into<PathBuf>, variable: impl Into<String>) -> Self {
        FileProduct {
            path: path.into(),
            variable: variable.into(),
        }
    }

    /// Declare a file at `relpath` under `prefix`.
    pub fn in_prefix(prefix: &Prefix, relpath: impl AsRef<Path>, variable: impl Into<String>) -> Self {
        FileProduct::new(prefix.path().join(relpath), variable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Kind of product, used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Library,
    Executable,
    File,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKind::Library => write!(f, "library"),
            ProductKind::Executable => write!(f, "executable"),
            ProductKind::File => write!(f, "file"),
        }
    }
}

/// An expected build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Product {
    Library(LibraryProduct),
    Executable(ExecutableProduct),
    File(FileProduct),
}

impl Product {
    /// Name bound to this product's path in a generated manifest.
    pub fn variable_name(&self) -> &str {
        match self {
            Product::Library(p) => &p.variable,
            Product::Executable(p) => &p.variable,
            Product::File(p) => &p.variable,
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Library(_) => ProductKind::Library,
            Product::Executable(_) => ProductKind::Executable,
            Product::File(_) => ProductKind::File,
        }
    }

    /// Resolve this product on `platform` using the system loader.
    pub fn locate(&self, platform: &Platform, verbose: bool) -> Option<PathBuf> {
        Locator::new(*platform).verbose(verbose).locate(self)
    }

    /// Whether [`Product::locate`] finds a path.
    pub fn satisfied(&self, platform: &Platform, verbose: bool) -> bool {
        self.locate(platform, verbose).is_some()
    }
}

impl From<LibraryProduct> for Product {
    fn from(p: LibraryProduct) -> Self {
        Product::Library(p)
    }
}

impl From<ExecutableProduct> for Product {
    fn from(p: ExecutableProduct) -> Self {
        Product::Executable(p)
    }
}

impl From<FileProduct> for Product {
    fn from(p: FileProduct) -> Self {
        Product::File(p)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Library(p) => write!(f, "LibraryProduct({})", p.candidates.join(", ")),
            Product::Executable(p) => write!(f, "ExecutableProduct({})", p.path.display()),
            Product::File(p) => write!(f, "FileProduct({})", p.path.display()),
        }
    }
}
