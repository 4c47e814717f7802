//! Tests for the `cmake-relink` binary.

use cmake_relink::test_utils::ProjectFixture;
use predicates::prelude::*;

use super::common::relink;

#[test]
fn test_check_fails_until_synced() {
    let fixture = ProjectFixture::reprex();

    relink(fixture.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("velox/io/CMakeLists.txt"))
        .stderr(predicate::str::contains("1 file(s) have out-of-date link statements"))
        .stderr(predicate::str::contains("cmake-relink sync"));

    relink(fixture.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));
    assert!(fixture.read("velox/io/CMakeLists.txt").contains("target_link_libraries(io PRIVATE util)"));

    relink(fixture.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = ProjectFixture::reprex();
    let before = fixture.read("velox/io/CMakeLists.txt");

    relink(fixture.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"))
        .stdout(predicate::str::contains("dry run"));

    assert_eq!(fixture.read("velox/io/CMakeLists.txt"), before);
}

#[test]
fn test_root_argument_and_project_dir() {
    let fixture = ProjectFixture::reprex();
    let elsewhere = ProjectFixture::new();

    relink(elsewhere.path())
        .arg("check")
        .arg(fixture.path())
        .assert()
        .code(1);

    relink(elsewhere.path())
        .args(["sync", "--project-dir"])
        .arg(fixture.path())
        .assert()
        .success();

    relink(elsewhere.path())
        .arg("check")
        .arg(fixture.path())
        .arg("--project-dir")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_config_file_sets_prefix_and_excludes() {
    let fixture = ProjectFixture::new()
        .file(
            "cmake-relink.toml",
            "internal_prefix = \"velox\"\nexclude = [\"third_party\"]\n\n[third_party]\n\"mylib/\" = \"MyLib::mylib\"\n",
        )
        .file(
            "CMakeLists.txt",
            "add_library(velox_core core.cpp)\ntarget_link_libraries(velox_core PRIVATE zlib)\n",
        )
        .file("core.cpp", "#include <mylib/api.h>\n#include \"velox_dep.h\"\n")
        .file("velox_dep.h", "")
        .file("third_party/CMakeLists.txt", "this is not ( valid cmake\n")
        .file(
            "dep/CMakeLists.txt",
            "add_library(velox_dep ${CMAKE_CURRENT_SOURCE_DIR}/../velox_dep.h)\n",
        );

    relink(fixture.path()).arg("sync").assert().success();
    assert!(
        fixture
            .read("CMakeLists.txt")
            .ends_with("target_link_libraries(velox_core PRIVATE velox_dep MyLib::mylib)\n")
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let fixture = ProjectFixture::reprex().file("cmake-relink.toml", "unknown_key = 1\n");

    relink(fixture.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_show_json() {
    let fixture = ProjectFixture::reprex();

    let output = relink(fixture.path())
        .args(["show", "io", "--format", "json"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["name"], "io");
    assert_eq!(value["kind"], "normal");
    assert_eq!(value["declared"]["public"], serde_json::json!(["util"]));
    assert_eq!(value["observed"]["private"], serde_json::json!(["util"]));
    assert_eq!(value["resolved"]["private"], serde_json::json!(["util"]));
    assert_eq!(value["resolved"]["public"], serde_json::json!([]));
}

#[test]
fn test_show_unknown_target_suggests() {
    let fixture = ProjectFixture::reprex();

    relink(fixture.path())
        .args(["show", "iox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target 'iox' not found"))
        .stderr(predicate::str::contains("Did you mean: io?"));
}

#[test]
fn test_graph_prints_dot() {
    let fixture = ProjectFixture::reprex();

    relink(fixture.path())
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("util"))
        .stdout(predicate::str::contains("PUBLIC"));

    relink(fixture.path())
        .args(["graph", "--resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PRIVATE"));
}

#[test]
fn test_syntax_error_exit_code() {
    let fixture = ProjectFixture::reprex().file("velox/bad/CMakeLists.txt", "add_library(bad \"oops)\n");

    relink(fixture.path())
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated quoted argument"));
    assert!(fixture.read("velox/io/CMakeLists.txt").contains("PUBLIC util"));
}
