//! Berth - verification of installed build products
//!
//! A package's install step is expected to leave behind shared libraries,
//! executables and data files. Berth checks that each one is really there
//! (and, for libraries built for this host, really loadable), then writes a
//! small Rust manifest binding symbolic names to the verified paths.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    declaration::Declaration,
    loader::{can_load, DynamicLoader, SystemLoader},
    platform::Platform,
    prefix::Prefix,
    product::{ExecutableProduct, FileProduct, LibraryProduct, Product},
};

pub use ops::{locate::Locator, manifest::write_manifest};
pub use util::config::Config;
