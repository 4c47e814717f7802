//! Fatal errors abort the run before anything is written.

use cmake_relink::core::RelinkError;
use cmake_relink::sync::{SyncOptions, sync};
use cmake_relink::test_utils::ProjectFixture;

const IO_LIST_FILE: &str = "# io library\nadd_library(io io.cpp)\n\ntarget_link_libraries(io PUBLIC util) # linked\n";

fn relink_error(error: &anyhow::Error) -> Option<&RelinkError> {
    error.chain().find_map(|cause| cause.downcast_ref::<RelinkError>())
}

fn assert_untouched(fixture: &ProjectFixture) {
    assert_eq!(fixture.read("velox/io/CMakeLists.txt"), IO_LIST_FILE);
}

#[test]
fn test_missing_target_name_aborts() {
    let fixture = ProjectFixture::reprex().file("velox/zz/CMakeLists.txt", "target_link_libraries()\n");

    let error = sync(&SyncOptions::new(fixture.path()), false).unwrap_err();
    assert!(matches!(
        relink_error(&error),
        Some(RelinkError::MissingTargetName { command, .. }) if command == "target_link_libraries"
    ));
    assert_untouched(&fixture);
}

#[test]
fn test_target_without_dependencies_aborts() {
    // sorts after velox/io, so io has already been planned when this fails
    let fixture = ProjectFixture::reprex()
        .file(
            "velox/lonely/CMakeLists.txt",
            "add_library(lonely lonely.cpp)\ntarget_link_libraries(lonely PRIVATE lib_${SUFFIX})\n",
        )
        .file("velox/lonely/lonely.cpp", "int lonely() { return 0; }\n");

    let error = sync(&SyncOptions::new(fixture.path()), false).unwrap_err();
    assert_eq!(
        relink_error(&error),
        Some(&RelinkError::NoDependencies {
            target: "lonely".to_string()
        })
    );
    assert_untouched(&fixture);
}

#[test]
fn test_target_linking_only_itself_aborts_every_run() {
    const SELF_ONLY: &str = "add_library(core core.cpp)\ntarget_link_libraries(core PUBLIC core)\n";
    let fixture = ProjectFixture::new()
        .file("CMakeLists.txt", SELF_ONLY)
        .file("core.cpp", "int core() { return 0; }\n");
    let options = SyncOptions::new(fixture.path());

    for _ in 0..2 {
        let error = sync(&options, false).unwrap_err();
        assert_eq!(
            relink_error(&error),
            Some(&RelinkError::NoDependencies {
                target: "core".to_string()
            })
        );
        assert_eq!(fixture.read("CMakeLists.txt"), SELF_ONLY);
    }
}

#[test]
fn test_syntax_error_reports_position() {
    let fixture = ProjectFixture::reprex().file("velox/broken/CMakeLists.txt", "add_library(broken\n  \"a.cpp)\n");

    let error = sync(&SyncOptions::new(fixture.path()), false).unwrap_err();
    match relink_error(&error) {
        Some(RelinkError::Syntax { file, line, column, .. }) => {
            assert!(file.ends_with("CMakeLists.txt"));
            assert_eq!((*line, *column), (2, 3));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
    assert_untouched(&fixture);
}

#[test]
fn test_alias_cycle_aborts() {
    let fixture = ProjectFixture::reprex().file(
        "velox/alias/CMakeLists.txt",
        "add_library(first ALIAS second)\nadd_library(second ALIAS first)\n",
    );

    let error = sync(&SyncOptions::new(fixture.path()), false).unwrap_err();
    assert!(matches!(relink_error(&error), Some(RelinkError::AliasCycle { .. })));
    assert_untouched(&fixture);
}

#[test]
fn test_missing_root_is_an_error() {
    let fixture = ProjectFixture::new();
    let result = sync(&SyncOptions::new(fixture.join("does-not-exist")), false);
    assert!(result.is_err());
}
