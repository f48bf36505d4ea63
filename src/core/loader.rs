//! Dynamic library load testing.
//!
//! A correctly named file is not necessarily a usable library: it may be
//! truncated, built for another architecture, or missing its own runtime
//! dependencies. The load test opens the library with the platform's
//! native loader and closes it again straight away.

use std::path::Path;

/// Something that can tell whether a shared library is loadable.
pub trait DynamicLoader {
    /// Try to open the library at `path`, releasing it before returning.
    fn try_load(&self, path: &Path) -> bool;
}

/// The host's native dynamic loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

impl DynamicLoader for SystemLoader {
    fn try_load(&self, path: &Path) -> bool {
        match sys::open(path) {
            Some(handle) => {
                drop(handle);
                true
            }
            None => false,
        }
    }
}

/// Check whether the library at `path` can be opened by the system loader.
///
/// Generated manifests call this from their `check_deps()` function.
pub fn can_load(path: impl AsRef<Path>) -> bool {
    SystemLoader.try_load(path.as_ref())
}

#[cfg(unix)]
mod sys {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    /// An open `dlopen` handle, closed on drop.
    pub(super) struct Handle(*mut libc::c_void);

    impl Drop for Handle {
        fn drop(&mut self) {
            // SAFETY: the handle came from a successful dlopen and is closed exactly once.
            unsafe {
                libc::dlclose(self.0);
            }
        }
    }

    pub(super) fn open(path: &Path) -> Option<Handle> {
        let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;

        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
        if handle.is_null() {
            tracing::trace!("dlopen failed for {}", path.display());
            None
        } else {
            Some(Handle(handle))
        }
    }
}

#[cfg(windows)]
mod sys {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    #[link(name = "kernel32")]
    extern "system" {
        fn LoadLibraryW(name: *const u16) -> *mut c_void;
        fn FreeLibrary(module: *mut c_void) -> i32;
    }

    /// An open module handle, freed on drop.
    pub(super) struct Handle(*mut c_void);

    impl Drop for Handle {
        fn drop(&mut self) {
            // SAFETY: the handle came from a successful LoadLibraryW and is freed exactly once.
            unsafe {
                FreeLibrary(self.0);
            }
        }
    }

    pub(super) fn open(path: &Path) -> Option<Handle> {
        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

        // SAFETY: wide is NUL-terminated and outlives the call.
        let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
        if handle.is_null() {
            tracing::trace!("LoadLibraryW failed for {}", path.display());
            None
        } else {
            Some(Handle(handle))
        }
    }
}

#[cfg(not(any(unix, windows)))]
mod sys {
    use std::path::Path;

    pub(super) struct Handle;

    pub(super) fn open(path: &Path) -> Option<Handle> {
        tracing::warn!(
            "dynamic loading not supported on this platform, cannot open {}",
            path.display()
        );
        None
    }
}
