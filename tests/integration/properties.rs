//! Guarantees that hold for any tree: untouched text survives byte for byte,
//! a second run is a no-op, and rendered lists follow the ordering rules.

use anyhow::Result;
use cmake_relink::sync::{Project, SyncOptions, sync};
use cmake_relink::test_utils::ProjectFixture;

const COMMENTED: &str = "# Copyright header\r\n\
#[[ block\r\n   comment ]]\r\n\
add_library(velox_core Core.cpp) # trailing\r\n\
\r\n\
  target_link_libraries( velox_core\r\n    PUBLIC glog::glog ) # keep me\r\n\
message(STATUS \"done (really)\")\r\n";

#[test]
fn test_text_outside_argument_regions_is_preserved() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file("CMakeLists.txt", COMMENTED)
        .file("Core.cpp", "#include <glog/logging.h>\n#include <fmt/format.h>\n");

    sync(&SyncOptions::new(fixture.path()), false)?;

    assert_eq!(
        fixture.read("CMakeLists.txt"),
        "# Copyright header\r\n\
#[[ block\r\n   comment ]]\r\n\
add_library(velox_core Core.cpp) # trailing\r\n\
\r\n\
  target_link_libraries(velox_core PRIVATE fmt::fmt glog::glog) # keep me\r\n\
message(STATUS \"done (really)\")\r\n"
    );
    Ok(())
}

#[test]
fn test_files_without_link_statements_are_untouched() -> Result<()> {
    let fixture = ProjectFixture::reprex().file(
        "velox/docs/CMakeLists.txt",
        "# docs only\nadd_custom_target(docs COMMAND doxygen)\n",
    );

    let changes = sync(&SyncOptions::new(fixture.path()), false)?;
    assert!(changes.iter().all(|change| !change.path.ends_with("velox/docs/CMakeLists.txt")));
    assert_eq!(
        fixture.read("velox/docs/CMakeLists.txt"),
        "# docs only\nadd_custom_target(docs COMMAND doxygen)\n"
    );
    assert_eq!(fixture.read("velox/CMakeLists.txt"), "add_subdirectory(util)\nadd_subdirectory(io)\n");
    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let fixture = ProjectFixture::reprex()
        .file(
            "velox/exec/CMakeLists.txt",
            "add_library(velox_exec Task.cpp)\ntarget_link_libraries(velox_exec io)\ntarget_link_libraries(velox_exec extra)\n",
        )
        .file("velox/exec/Task.h", "#include \"velox/util/util.h\"\n#include <folly/Range.h>\n")
        .file("velox/exec/Task.cpp", "#include \"velox/exec/Task.h\"\n#include \"velox/io/io.h\"\n");
    let options = SyncOptions::new(fixture.path()).with_internal_prefix("velox");

    let first = sync(&options, false)?;
    assert_eq!(first.len(), 2);
    assert_eq!(
        fixture.read("velox/exec/CMakeLists.txt"),
        "add_library(velox_exec Task.cpp)\n\
         target_link_libraries(velox_exec PUBLIC Folly::folly util PRIVATE io)\n\
         target_link_libraries(velox_exec PUBLIC extra)\n"
    );

    let second = sync(&options, false)?;
    assert!(second.is_empty(), "unexpected changes: {second:?}");
    Ok(())
}

#[test]
fn test_internal_prefix_orders_project_targets_first() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file(
            "CMakeLists.txt",
            "add_library(velox_b b.cpp)\n\
             add_library(velox_a a.cpp)\n\
             add_library(velox_main main.cpp)\n\
             target_link_libraries(velox_main PRIVATE velox_b)\n",
        )
        .file("b.h", "")
        .file("b.cpp", "")
        .file("a.h", "")
        .file("a.cpp", "")
        .file(
            "main.cpp",
            "#include <glog/logging.h>\n#include \"b.h\"\n#include <Folly/Bad.h>\n#include \"a.h\"\n#include <fmt/core.h>\n",
        );

    sync(&SyncOptions::new(fixture.path()).with_internal_prefix("velox"), true)?;
    assert!(fixture.read("CMakeLists.txt").contains("PRIVATE velox_b)"), "dry run must not write");

    let changes = sync(&SyncOptions::new(fixture.path()).with_internal_prefix("velox"), false)?;
    assert_eq!(changes.len(), 1);
    assert!(
        fixture
            .read("CMakeLists.txt")
            .ends_with("target_link_libraries(velox_main PRIVATE velox_a velox_b fmt::fmt glog::glog)\n")
    );

    let plain = ProjectFixture::new()
        .file("CMakeLists.txt", &fixture.read("CMakeLists.txt"))
        .file("b.h", "")
        .file("b.cpp", "")
        .file("a.h", "")
        .file("a.cpp", "")
        .file("main.cpp", &fixture.read("main.cpp"));
    sync(&SyncOptions::new(plain.path()), false)?;
    assert!(
        plain
            .read("CMakeLists.txt")
            .ends_with("target_link_libraries(velox_main PRIVATE fmt::fmt glog::glog velox_a velox_b)\n")
    );
    Ok(())
}

#[test]
fn test_target_never_links_itself() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file(
            "CMakeLists.txt",
            "add_library(core core.cpp)\ntarget_link_libraries(core PUBLIC core other)\n",
        )
        .file("core.h", "#pragma once\n")
        .file("core.cpp", "#include \"core.h\"\n");

    sync(&SyncOptions::new(fixture.path()), false)?;
    assert_eq!(
        fixture.read("CMakeLists.txt"),
        "add_library(core core.cpp)\ntarget_link_libraries(core PUBLIC other)\n"
    );
    Ok(())
}

#[test]
fn test_link_items_are_cleaned() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file(
            "CMakeLists.txt",
            "add_library(core core.cpp)\n\
             target_link_libraries(core PRIVATE $<BUILD_INTERFACE:gen> lib_${SUFFIX} ${PREFIX}_lib ${EXTRA_LIBS})\n",
        )
        .file("core.cpp", "#include <re2/re2.h>\n");

    let options = SyncOptions::new(fixture.path());
    let project = Project::analyze(&options)?;
    for removed in ["$<BUILD_INTERFACE:gen>", "lib_${SUFFIX}", "${PREFIX}_lib"] {
        assert!(project.graph().get(removed).is_none(), "{removed} should be dropped");
    }

    sync(&options, false)?;
    assert_eq!(
        fixture.read("CMakeLists.txt"),
        "add_library(core core.cpp)\ntarget_link_libraries(core PRIVATE ${EXTRA_LIBS} re2::re2)\n"
    );
    Ok(())
}
