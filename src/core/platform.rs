//! Target platform identity.
//!
//! A [`Platform`] describes the machine a set of products was built for.
//! It drives library naming rules, the executable suffix, and whether a
//! located library can be load-tested on the running host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a target triple.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("invalid target triple `{triple}`: expected at least `<arch>-<os>`")]
    MalformedTriple { triple: String },
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    #[serde(rename = "macos")]
    MacOS,
    Windows,
    #[serde(rename = "freebsd")]
    FreeBSD,
    Unknown,
}

impl Os {
    fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::MacOS => "macos",
            Os::Windows => "windows",
            Os::FreeBSD => "freebsd",
            Os::Unknown => "unknown",
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    I686,
    Aarch64,
    Armv7l,
    Powerpc64le,
    Unknown,
}

impl Arch {
    fn parse(s: &str) -> Self {
        match s {
            "x86_64" | "amd64" => Arch::X86_64,
            "i686" | "i586" | "i386" | "x86" => Arch::I686,
            "aarch64" | "arm64" => Arch::Aarch64,
            "armv7l" | "armv7" | "arm" => Arch::Armv7l,
            "powerpc64le" | "ppc64le" => Arch::Powerpc64le,
            _ => Arch::Unknown,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::I686 => "i686",
            Arch::Aarch64 => "aarch64",
            Arch::Armv7l => "armv7l",
            Arch::Powerpc64le => "powerpc64le",
            Arch::Unknown => "unknown",
        }
    }
}

/// C library flavour (Linux only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Libc {
    Glibc,
    Musl,
}

/// A build target platform.
///
/// Two platforms are the same only if OS, architecture and libc all
/// match; anything else is treated as a cross-compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
    pub libc: Option<Libc>,
}

impl Platform {
    /// Create a platform. `libc` is dropped for non-Linux systems.
    pub fn new(os: Os, arch: Arch, libc: Option<Libc>) -> Self {
        let libc = if os == Os::Linux { libc } else { None };
        Platform { os, arch, libc }
    }

    /// Linux with glibc.
    pub fn linux(arch: Arch) -> Self {
        Platform::new(Os::Linux, arch, Some(Libc::Glibc))
    }

    /// macOS.
    pub fn macos(arch: Arch) -> Self {
        Platform::new(Os::MacOS, arch, None)
    }

    /// Windows.
    pub fn windows(arch: Arch) -> Self {
        Platform::new(Os::Windows, arch, None)
    }

    /// FreeBSD.
    pub fn freebsd(arch: Arch) -> Self {
        Platform::new(Os::FreeBSD, arch, None)
    }

    /// The platform this process is running on.
    pub fn host() -> Self {
        let os = if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "macos") {
            Os::MacOS
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "freebsd") {
            Os::FreeBSD
        } else {
            Os::Unknown
        };

        let libc = if cfg!(target_env = "musl") {
            Some(Libc::Musl)
        } else {
            Some(Libc::Glibc)
        };

        Platform::new(os, Arch::parse(std::env::consts::ARCH), libc)
    }

    /// Parse a target triple such as `x86_64-unknown-linux-gnu`.
    ///
    /// Unrecognised OS or architecture components map to `Unknown`
    /// rather than failing, so exotic targets can still be described.
    pub fn from_triple(triple: &str) -> Result<Self, PlatformError> {
        let parts: Vec<&str> = triple.trim().split('-').filter(|p| !p.is_empty()).collect();
        if parts.len() < 2 {
            return Err(PlatformError::MalformedTriple {
                triple: triple.to_string(),
            });
        }

        let arch = Arch::parse(parts[0]);
        let rest = &parts[1..];

        let os = if rest.contains(&"linux") {
            Os::Linux
        } else if rest.iter().any(|p| *p == "darwin" || p.starts_with("macos")) {
            Os::MacOS
        } else if rest.iter().any(|p| *p == "windows" || p.starts_with("mingw")) {
            Os::Windows
        } else if rest.iter().any(|p| p.starts_with("freebsd")) {
            Os::FreeBSD
        } else {
            Os::Unknown
        };

        let libc = if rest.iter().any(|p| p.starts_with("musl")) {
            Some(Libc::Musl)
        } else {
            Some(Libc::Glibc)
        };

        Ok(Platform::new(os, arch, libc))
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arch = self.arch.as_str();
        match (self.os, self.libc) {
            (Os::Linux, Some(Libc::Musl)) => write!(f, "{}-unknown-linux-musl", arch),
            (Os::Linux, _) => write!(f, "{}-unknown-linux-gnu", arch),
            (Os::MacOS, _) => write!(f, "{}-apple-darwin", arch),
            (Os::Windows, _) => write!(f, "{}-pc-windows-msvc", arch),
            (Os::FreeBSD, _) => write!(f, "{}-unknown-freebsd", arch),
            (Os::Unknown, _) => write!(f, "{}-unknown-{}", arch, self.os.as_str()),
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_triple(s)
    }
}
