// This file is automatically generated by berth.
// Do not edit.
//
// Include this file with `include!` and call `check_deps()`
// before using any of the paths below.

#[allow(non_upper_case_globals)]
pub const foo_h: &str = "/nonexistent/berth/include/foo.h";
#[allow(non_upper_case_globals)]
pub const libx: &str = "/nonexistent/berth/lib/libx.so";

/// Re-verify the paths recorded when this file was generated.
pub fn check_deps() -> ::std::result::Result<(), ::std::string::String> {
    if !::std::path::Path::new(foo_h).is_file() {
        return Err(format!("foo_h: {} does not exist, {}", foo_h, "please rebuild `fixture-sys` and try again"));
    }
    if !::std::path::Path::new(libx).is_file() {
        return Err(format!("libx: {} does not exist, {}", libx, "please rebuild `fixture-sys` and try again"));
    }
    if !::berth::can_load(libx) {
        return Err(format!("libx: {} cannot be opened, {}", libx, "please rebuild `fixture-sys` and try again"));
    }
    Ok(())
}
