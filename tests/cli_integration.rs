//! CLI integration tests for anchorage.
//!
//! Every test runs an MSVC toolchain description, whose search paths come
//! from `LIB`/`INCLUDE`, so no compiler needs to be installed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch project with numbered library directories.
struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("home")).unwrap();
        Project { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Create `name` under `root/<dir>`, returning the directory.
    fn file(&self, dir: &str, name: &str) -> PathBuf {
        let dir = self.root().join(dir);
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        dir
    }

    fn dir(&self, dir: &str) -> PathBuf {
        let dir = self.root().join(dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// anchorage for MSVC 15 in this project, with a clean environment.
    fn anchorage(&self) -> Command {
        let mut cmd = Command::cargo_bin("anchorage").unwrap();
        cmd.env_clear()
            .env("HOME", self.root().join("home"))
            .current_dir(self.root())
            .args(["--family", "msvc", "--compiler-version", "15"]);
        cmd
    }
}

fn path_list(dirs: &[&Path]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(";")
}

// ============================================================================
// anchorage toolchain
// ============================================================================

#[test]
fn test_toolchain_from_flags() {
    let project = Project::new();

    project
        .anchorage()
        .args(["--bits", "32", "--runtime", "debug", "toolchain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("msvc-15 (windows, x32"))
        .stdout(predicate::str::contains("Runtime:  shared debug"));
}

#[test]
fn test_toolchain_from_project_config() {
    let project = Project::new();
    let config_dir = project.dir(".anchorage");
    fs::write(
        config_dir.join("config.toml"),
        "[toolchain]\nversion_tag = \"16\"\nlinkage = \"static\"\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("anchorage").unwrap();
    cmd.env_clear()
        .env("HOME", project.root().join("home"))
        .current_dir(project.root())
        .args(["--family", "msvc", "toolchain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("msvc-16"))
        .stdout(predicate::str::contains("static runtime"));
}

#[test]
fn test_invalid_flag_value() {
    let project = Project::new();

    project
        .anchorage()
        .args(["--bits", "16", "toolchain"])
        .assert()
        .failure();
}

// ============================================================================
// anchorage search-dirs
// ============================================================================

#[test]
fn test_search_dirs_keep_lib_order() {
    let project = Project::new();
    let first = project.dir("b");
    let second = project.dir("a");

    let output = project
        .anchorage()
        .env("LIB", path_list(&[&first, &second]))
        .arg("search-dirs")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![first.display().to_string(), second.display().to_string()]);
}

// ============================================================================
// anchorage resolve
// ============================================================================

#[test]
fn test_openssl_earlier_generation_wins() {
    let project = Project::new();
    let legacy = project.file("old", "libeay32.lib");
    project.file("old", "ssleay32.lib");
    let current = project.file("new", "libssl.lib");
    project.file("new", "libcrypto.lib");

    project
        .anchorage()
        .env("LIB", path_list(&[&legacy, &current]))
        .args(["resolve", "openssl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: libeay32"))
        .stdout(predicate::str::contains("lib: ssleay32"));

    project
        .anchorage()
        .env("LIB", path_list(&[&current, &legacy]))
        .args(["resolve", "openssl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: libssl"))
        .stdout(predicate::str::contains("libeay32").not());
}

#[test]
fn test_resolve_json() {
    let project = Project::new();
    let lib = project.file("lib", "pcre2-8.lib");

    let output = project
        .anchorage()
        .env("LIB", path_list(&[&lib]))
        .args(["resolve", "pcre2", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(spec["logical_name"], "pcre2");
    assert_eq!(spec["link_tokens"][0], "pcre2-8");
    assert_eq!(spec["linkage"], "static");
}

#[test]
fn test_zlib_not_found() {
    let project = Project::new();
    let empty = project.dir("empty");

    project
        .anchorage()
        .env("LIB", path_list(&[&empty]))
        .args(["--no-color", "resolve", "zlib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: could not find `zlib`"))
        .stderr(predicate::str::contains("tried: z.lib"))
        .stderr(predicate::str::contains(format!("searched: {}", empty.display())));
}

#[test]
fn test_zlib_best_effort() {
    let project = Project::new();
    let empty = project.dir("empty");

    project
        .anchorage()
        .env("LIB", path_list(&[&empty]))
        .args(["resolve", "zlib", "--best-effort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: z"));
}

#[test]
fn test_override_file_wins() {
    let project = Project::new();
    fs::write(
        project.root().join("local-zlib.toml"),
        "link_tokens = [\"zlibstatic\"]\nsearch_paths = [\"C:/zlib/lib\"]\n",
    )
    .unwrap();

    project
        .anchorage()
        .args(["resolve", "zlib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: zlibstatic"))
        .stdout(predicate::str::contains("-LC:/zlib/lib"));

    fs::write(project.root().join("mine.toml"), "link_tokens = [\"myz\"]\n").unwrap();
    project
        .anchorage()
        .env("ZLIB_PRJ_FILE", "mine.toml")
        .args(["resolve", "zlib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: myz"));
}

#[test]
fn test_invalid_override_is_fatal() {
    let project = Project::new();
    fs::write(project.root().join("local-pcre.toml"), "link_tokens = 3\n").unwrap();

    project
        .anchorage()
        .args(["--no-color", "resolve", "pcre", "--best-effort"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid override file"));
}

// Boost header missing from BOOST_ROOT and INCLUDE: a broken install,
// not an absent library.
#[test]
fn test_boost_missing_header() {
    let project = Project::new();
    let include = project.dir("include");
    let root = project.dir("boost_1_66_0");

    project
        .anchorage()
        .env("INCLUDE", path_list(&[&include]))
        .args(["--no-color", "resolve", "boost", "--best-effort"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unable to read"))
        .stderr(predicate::str::contains(format!("searched: {}", include.display())));

    project
        .anchorage()
        .env("BOOST_ROOT", &root)
        .args(["--no-color", "resolve", "boost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unable to read"));
}

#[test]
fn test_boost_from_root() {
    let project = Project::new();
    let root = project.dir("boost_1_70_0");
    fs::create_dir_all(root.join("boost")).unwrap();
    fs::write(
        root.join("boost/version.hpp"),
        "#define BOOST_VERSION 107000\n",
    )
    .unwrap();

    project
        .anchorage()
        .env("BOOST_ROOT", &root)
        .args(["--linkage", "static", "resolve", "boost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib: libboost_system-vc141-mt-s-x64-1_70").or(
            predicate::str::contains("lib: libboost_system-vc141-mt-s-x32-1_70"),
        ))
        .stdout(predicate::str::contains(format!("-I{}", root.display())));
}

#[test]
fn test_unknown_family() {
    let project = Project::new();

    project
        .anchorage()
        .args(["resolve", "libfoo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown library 'libfoo'"));
}

// ============================================================================
// anchorage probe
// ============================================================================

#[test]
fn test_probe_reports_availability() {
    let project = Project::new();
    let lib = project.file("lib", "z.lib");
    project.file("lib", "pcre.lib");

    project
        .anchorage()
        .env("LIB", path_list(&[&lib]))
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"zlib\s+yes").unwrap())
        .stdout(predicate::str::is_match(r"pcre\s+yes").unwrap())
        .stdout(predicate::str::is_match(r"openssl\s+no").unwrap())
        .stdout(predicate::str::is_match(r"boost\s+no").unwrap())
        .stdout(predicate::str::contains("asio     bundled asio"))
        .stdout(predicate::str::contains("system zlib (z)"))
        .stdout(predicate::str::contains("Platform libraries: wsock32 ws2_32"));
}
