//! Platform file naming conventions.
//!
//! Shared libraries are recognised by the shape of their file name, not by
//! inspecting their contents. Versioned names are accepted by pattern; the
//! version digits are never parsed.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::platform::{Os, Platform};

/// `libfoo.so`, `libfoo.so.1`, `libfoo.so.1.2.3`
static ELF_LIBRARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\.so(\.\d+){0,3}$").expect("valid regex"));

/// `libfoo.dylib`, `libfoo.1.dylib`, `libfoo.1.2.3.dylib`
static MACHO_LIBRARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(\.\d+){0,3}\.dylib$").expect("valid regex"));

/// `foo.dll`, `libfoo-1.DLL`
static PE_LIBRARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*)\.dll$").expect("valid regex"));

/// Check whether `filename` looks like a shared library on `platform`.
///
/// Only the file name is examined; pass `entry.file_name()`, not a path.
pub fn is_valid_dynamic_library_name(filename: &str, platform: &Platform) -> bool {
    match platform.os {
        Os::Linux | Os::FreeBSD => ELF_LIBRARY.is_match(filename),
        Os::MacOS => MACHO_LIBRARY.is_match(filename),
        Os::Windows => PE_LIBRARY.is_match(filename),
        Os::Unknown => false,
    }
}

/// Suffix every executable must carry on `platform`.
pub fn required_executable_suffix(platform: &Platform) -> &'static str {
    if platform.is_windows() {
        ".exe"
    } else {
        ""
    }
}
