//! `Products.toml` parsing.
//!
//! A declaration file lists the products a package expects after its
//! install step, in the order they should appear in the manifest:
//!
//! ```toml
//! [prefix]
//! path = "deps/usr"
//!
//! [[product]]
//! kind = "library"
//! name = "libfoo"
//! candidates = ["libfoo", "libfoo2"]
//!
//! [[product]]
//! kind = "executable"
//! name = "fooifier"
//! path = "fooifier"
//!
//! [[product]]
//! kind = "file"
//! name = "foo_h"
//! path = "include/foo.h"
//! ```
//!
//! Relative paths resolve against the prefix: library `dir` and file
//! `path` against the prefix root, executable `path` against its `bin`
//! directory. The prefix itself resolves against the directory holding
//! the declaration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::platform::Platform;
use crate::core::prefix::Prefix;
use crate::core::product::{ExecutableProduct, FileProduct, LibraryProduct, Product, ProductError};

/// Canonical declaration file name.
pub const PRODUCTS_FILE: &str = "Products.toml";

/// Error loading a declaration file.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("could not find `Products.toml` in {} or any parent directory", dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Prefix section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixDecl {
    /// Install prefix (defaults to the declaration file's directory)
    pub path: Option<PathBuf>,
}

/// A single declared product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProductDecl {
    Library {
        name: String,
        candidates: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<PathBuf>,
    },
    Executable {
        name: String,
        path: PathBuf,
    },
    File {
        name: String,
        path: PathBuf,
    },
}

/// Parsed contents of a `Products.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub prefix: PrefixDecl,

    #[serde(default, rename = "product")]
    pub products: Vec<ProductDecl>,
}

impl Declaration {
    /// Parse a declaration from TOML text.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, DeclarationError> {
        toml::from_str(contents).map_err(|source| DeclarationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a declaration file.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DeclarationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Declaration::parse(&contents, path)
    }

    /// Install prefix, resolved against `base_dir`.
    pub fn prefix(&self, base_dir: &Path) -> Prefix {
        match &self.prefix.path {
            Some(path) => Prefix::new(base_dir.join(path)),
            None => Prefix::new(base_dir),
        }
    }

    /// Build products for `platform`, in declaration order.
    pub fn resolve(&self, base_dir: &Path, platform: &Platform) -> Result<Vec<Product>, DeclarationError> {
        let prefix = self.prefix(base_dir);

        self.products
            .iter()
            .map(|decl| -> Result<Product, DeclarationError> {
                let product: Product = match decl {
                    ProductDecl::Library {
                        name,
                        candidates,
                        dir: Some(dir),
                    } => LibraryProduct::new(prefix.path().join(dir), candidates.clone(), name)?.into(),
                    ProductDecl::Library {
                        name,
                        candidates,
                        dir: None,
                    } => LibraryProduct::in_prefix(&prefix, platform, candidates.clone(), name)?.into(),
                    ProductDecl::Executable { name, path } => {
                        ExecutableProduct::new(prefix.bin_dir().join(path), name).into()
                    }
                    ProductDecl::File { name, path } => FileProduct::in_prefix(&prefix, path, name).into(),
                };
                Ok(product)
            })
            .collect()
    }
}

/// Search `start` and its ancestors for a `Products.toml`.
pub fn find_products_file(start: &Path) -> Result<PathBuf, DeclarationError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(PRODUCTS_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(DeclarationError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}
