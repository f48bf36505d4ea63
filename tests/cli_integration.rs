//! CLI integration tests for Berth.
//!
//! Each test lays out a fake install prefix in a temporary directory and
//! drives the `berth` binary against it.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the berth binary command, isolated from the user's global config.
fn berth(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("berth").unwrap();
    cmd.env("HOME", home).env_remove("BERTH_PRODUCTS");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_products(dir: &Path, contents: &str) {
    fs::write(dir.join("Products.toml"), contents).unwrap();
}

/// A prefix containing a header and a data file.
fn file_project(tmp: &TempDir) {
    let include = tmp.path().join("usr/include");
    fs::create_dir_all(&include).unwrap();
    fs::write(include.join("foo.h"), "int foo(void);").unwrap();
    fs::create_dir_all(tmp.path().join("usr/share")).unwrap();
    fs::write(tmp.path().join("usr/share/foo.dat"), "data").unwrap();

    write_products(
        tmp.path(),
        r#"
[prefix]
path = "usr"

[[product]]
kind = "file"
name = "foo_h"
path = "include/foo.h"

[[product]]
kind = "file"
name = "foo_dat"
path = "share/foo.dat"
"#,
    );
}

// ============================================================================
// berth check
// ============================================================================

#[test]
fn test_check_reports_satisfied_products() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .arg("check")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"))
        .stdout(predicate::str::contains("foo_h"))
        .stdout(predicate::str::contains("foo.dat"));
}

#[test]
fn test_check_fails_on_missing_product() {
    let tmp = temp_dir();
    file_project(&tmp);
    fs::remove_file(tmp.path().join("usr/share/foo.dat")).unwrap();

    berth(tmp.path())
        .arg("check")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing"))
        .stderr(predicate::str::contains("1 of 2 products unsatisfied"));
}

#[test]
fn test_check_json_output() {
    let tmp = temp_dir();
    file_project(&tmp);

    let output = berth(tmp.path())
        .args(["check", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["variable"], "foo_h");
    assert_eq!(entries[0]["kind"], "file");
    assert!(entries[0]["path"].as_str().unwrap().ends_with("foo.h"));
}

#[test]
fn test_check_finds_products_file_in_parent() {
    let tmp = temp_dir();
    file_project(&tmp);
    let nested = tmp.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    berth(tmp.path())
        .arg("check")
        .current_dir(&nested)
        .assert()
        .success();
}

#[test]
fn test_check_without_products_file() {
    let tmp = temp_dir();

    berth(tmp.path())
        .arg("check")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `Products.toml`"));
}

#[test]
fn test_check_rejects_invalid_target() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .args(["check", "--target", "bogus"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid target triple"));
}

// ============================================================================
// Libraries and executables
// ============================================================================

/// A prefix with an unloadable library file; only a cross target accepts it.
fn library_project(tmp: &TempDir) {
    let lib = tmp.path().join("usr/lib");
    fs::create_dir_all(&lib).unwrap();
    fs::write(lib.join("libfoo.so.2"), "not really a library").unwrap();

    write_products(
        tmp.path(),
        r#"
[prefix]
path = "usr"

[[product]]
kind = "library"
name = "libfoo"
candidates = ["libfoo"]
"#,
    );
}

#[cfg(not(target_os = "freebsd"))]
#[test]
fn test_cross_target_library_skips_load_test() {
    let tmp = temp_dir();
    library_project(&tmp);

    berth(tmp.path())
        .args(["locate", "libfoo", "--target", "x86_64-unknown-freebsd"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("libfoo.so.2"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_host_library_must_load() {
    let tmp = temp_dir();
    library_project(&tmp);

    berth(tmp.path())
        .args(["locate", "libfoo"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("LibraryProduct(libfoo) is not satisfied"));
}

#[cfg(not(target_os = "freebsd"))]
#[test]
fn test_config_target_triple() {
    let tmp = temp_dir();
    library_project(&tmp);
    fs::create_dir_all(tmp.path().join(".berth")).unwrap();
    fs::write(
        tmp.path().join(".berth/config.toml"),
        "[target]\ntriple = \"x86_64-unknown-freebsd\"\n",
    )
    .unwrap();

    berth(tmp.path())
        .arg("check")
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn test_windows_executable_suffix() {
    let tmp = temp_dir();
    let bin = tmp.path().join("usr/bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join("fooify.exe"), "MZ").unwrap();

    write_products(
        tmp.path(),
        r#"
[prefix]
path = "usr"

[[product]]
kind = "executable"
name = "fooify"
path = "fooify"
"#,
    );

    berth(tmp.path())
        .args(["locate", "fooify", "--target", "x86_64-pc-windows-msvc"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fooify.exe"));
}

// ============================================================================
// berth locate
// ============================================================================

#[test]
fn test_locate_prints_path() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .args(["locate", "foo_h"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.h"));
}

#[test]
fn test_locate_unknown_product() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .args(["locate", "nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no product named `nope`"));
}

// ============================================================================
// berth generate
// ============================================================================

#[test]
fn test_generate_writes_manifest() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .args(["generate", "--package", "foo-sys"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("deps.rs")).unwrap();
    assert!(manifest.contains("Do not edit."));
    assert!(manifest.contains("pub const foo_h: &str ="));
    assert!(manifest.contains("pub const foo_dat: &str ="));
    assert!(manifest.contains("pub fn check_deps()"));
    assert!(manifest.contains("please rebuild `foo-sys` and try again"));
    assert!(!manifest.contains("can_load"));
}

#[test]
fn test_generate_custom_output() {
    let tmp = temp_dir();
    file_project(&tmp);
    let out = tmp.path().join("generated.rs");

    berth(tmp.path())
        .arg("generate")
        .arg("--output")
        .arg(&out)
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(out.exists());
    assert!(!tmp.path().join("deps.rs").exists());
}

#[test]
fn test_generate_is_idempotent() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success();
    let first = fs::read(tmp.path().join("deps.rs")).unwrap();

    berth(tmp.path())
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(first, fs::read(tmp.path().join("deps.rs")).unwrap());
}

#[test]
fn test_generate_unsatisfied_writes_nothing() {
    let tmp = temp_dir();
    file_project(&tmp);
    fs::remove_file(tmp.path().join("usr/include/foo.h")).unwrap();

    berth(tmp.path())
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not satisfied, cannot generate manifest"))
        .stderr(predicate::str::contains("foo.h"));

    assert!(!tmp.path().join("deps.rs").exists());
}

#[test]
fn test_generate_rejects_duplicate_names() {
    let tmp = temp_dir();
    file_project(&tmp);
    write_products(
        tmp.path(),
        r#"
[prefix]
path = "usr"

[[product]]
kind = "file"
name = "same"
path = "include/foo.h"

[[product]]
kind = "file"
name = "same"
path = "share/foo.dat"
"#,
    );

    berth(tmp.path())
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("variable name `same`"));

    assert!(!tmp.path().join("deps.rs").exists());
}

#[test]
fn test_generate_relative_products_path_binds_absolute_paths() {
    let tmp = temp_dir();
    file_project(&tmp);

    berth(tmp.path())
        .args(["generate", "--products", "Products.toml"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("deps.rs")).unwrap();
    let literals: Vec<&str> = manifest
        .lines()
        .filter(|line| line.starts_with("pub const "))
        .filter_map(|line| line.split('"').nth(1))
        .collect();
    assert_eq!(literals.len(), 2);
    for literal in literals {
        assert!(Path::new(literal).is_absolute(), "relative binding: {literal}");
    }
}

#[test]
fn test_generate_library_includes_load_check() {
    let tmp = temp_dir();
    library_project(&tmp);

    berth(tmp.path())
        .args([
            "generate",
            "--target",
            "aarch64-apple-darwin",
            "--runtime-crate",
            "my_rt",
        ])
        .current_dir(tmp.path())
        .assert()
        .failure();

    // Darwin naming rules reject `.so`; a `.dylib` satisfies them.
    fs::write(tmp.path().join("usr/lib/libfoo.1.dylib"), "mach-o").unwrap();
    let target = if cfg!(target_os = "macos") {
        "x86_64-unknown-linux-gnu"
    } else {
        "aarch64-apple-darwin"
    };

    berth(tmp.path())
        .args(["generate", "--target", target, "--runtime-crate", "my_rt"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("deps.rs")).unwrap();
    assert!(manifest.contains("::my_rt::can_load(libfoo)"));
}

// ============================================================================
// berth completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    berth(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("berth"));
}
