//! Library-level pipeline tests.

use anyhow::Result;
use cmake_relink::graph::TargetKind;
use cmake_relink::sync::{Project, SyncOptions, sync};
use cmake_relink::test_utils::{ProjectFixture, init_test_logging};

#[test]
fn test_reprex_rewrites_io_as_private() -> Result<()> {
    init_test_logging(None);
    let fixture = ProjectFixture::reprex();

    let changes = sync(&SyncOptions::new(fixture.path()), false)?;
    assert_eq!(changes.len(), 1);
    assert!(changes[0].path.ends_with("velox/io/CMakeLists.txt"));

    assert_eq!(
        fixture.read("velox/io/CMakeLists.txt"),
        "# io library\nadd_library(io io.cpp)\n\ntarget_link_libraries(io PRIVATE util) # linked\n"
    );
    assert_eq!(
        fixture.read("velox/util/CMakeLists.txt"),
        "add_library(util util.cpp)\ntarget_link_libraries(util PUBLIC io)\n"
    );
    Ok(())
}

#[test]
fn test_reprex_with_private_declaration_is_stable() -> Result<()> {
    let fixture = ProjectFixture::reprex_private();
    let before = fixture.read("velox/io/CMakeLists.txt");
    let options = SyncOptions::new(fixture.path());

    let mut project = Project::analyze(&options)?;
    assert!(project.plan(&options.ordering())?.is_empty());

    let graph = project.graph();
    let io = graph.get("io").expect("io is defined");
    let util = graph.get("util").expect("util is defined");
    assert_eq!(graph.node(io).declared_private_deps, vec![util]);
    assert_eq!(graph.node(io).resolved_private_deps, vec![util]);
    assert!(graph.node(io).resolved_public_deps.is_empty());
    assert_eq!(graph.node(util).resolved_public_deps, vec![io]);

    assert!(sync(&options, false)?.is_empty());
    assert_eq!(fixture.read("velox/io/CMakeLists.txt"), before);
    Ok(())
}

#[test]
fn test_reprex_observed_state() -> Result<()> {
    let fixture = ProjectFixture::reprex();
    let project = Project::analyze(&SyncOptions::new(fixture.path()))?;
    let graph = project.graph();

    let io = graph.get("io").expect("io is defined");
    let util = graph.get("util").expect("util is defined");

    assert_eq!(graph.node(io).observed_private_deps.iter().copied().collect::<Vec<_>>(), vec![util]);
    assert!(graph.node(io).observed_public_deps.is_empty());
    assert_eq!(graph.node(util).observed_public_deps.iter().copied().collect::<Vec<_>>(), vec![io]);
    assert_eq!(graph.node(io).declared_public_deps, vec![util]);
    assert!(project.header_index().contains("velox/io/io.h"));
    assert!(project.header_index().contains("velox/util/util.h"));
    Ok(())
}

#[test]
fn test_third_party_alias_and_object_libraries() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file(
            "velox/common/CMakeLists.txt",
            r#"add_library(velox_flags OBJECT Flags.cpp)
add_library(velox_common Common.cpp)
add_library(velox::common ALIAS velox_common)
target_link_libraries(
  velox_common
  PUBLIC velox_flags Folly::folly
  PRIVATE stale_dependency ${EXTRA_LIBS} $<$<CONFIG:Debug>:debug_lib>)
"#,
        )
        .file("velox/common/Flags.cpp", "#include <gflags/gflags.h>\n")
        .file("velox/common/Common.h", "#pragma once\n#include <folly/Range.h>\n")
        .file("velox/common/Common.cpp", "#include \"velox/common/Common.h\"\n#include <glog/logging.h>\n")
        .file(
            "velox/exec/CMakeLists.txt",
            "add_executable(velox_exec_tool Tool.cpp)\ntarget_link_libraries(velox_exec_tool velox::common)\n",
        )
        .file("velox/exec/Tool.cpp", "#include \"velox/common/Common.h\"\n#include <fmt/format.h>\n");

    let options = SyncOptions::new(fixture.path()).with_internal_prefix("velox");
    let mut project = Project::analyze(&options)?;
    let graph = project.graph();

    let alias = graph.get("velox::common").expect("alias node");
    let common = graph.get("velox_common").expect("common node");
    assert_eq!(graph.node(alias).kind, TargetKind::Alias(common));
    assert_eq!(graph.node(graph.get("velox_flags").unwrap()).kind, TargetKind::ObjectLibrary);
    assert!(graph.get("gflags::gflags").is_some());

    let planned = project.plan(&options.ordering())?;
    assert_eq!(planned.len(), 2);
    sync(&options, false)?;

    assert_eq!(
        fixture.read("velox/common/CMakeLists.txt"),
        r#"add_library(velox_flags OBJECT Flags.cpp)
add_library(velox_common Common.cpp)
add_library(velox::common ALIAS velox_common)
target_link_libraries(velox_common PUBLIC velox_flags Folly::folly PRIVATE ${EXTRA_LIBS} glog::glog)
"#
    );
    assert_eq!(
        fixture.read("velox/exec/CMakeLists.txt"),
        "add_executable(velox_exec_tool Tool.cpp)\ntarget_link_libraries(velox_exec_tool PRIVATE velox_common fmt::fmt)\n"
    );
    Ok(())
}

#[test]
fn test_interface_library_and_repeated_statements() -> Result<()> {
    let fixture = ProjectFixture::new()
        .file(
            "CMakeLists.txt",
            r#"add_library(headers INTERFACE)
target_link_libraries(headers INTERFACE fmt::fmt)

add_library(core core.cpp)
target_link_libraries(core headers)
if(WITH_EXTRA)
  target_link_libraries(core extra_lib)
endif()
"#,
        )
        .file("core.h", "#pragma once\n#include <glog/logging.h>\n")
        .file("core.cpp", "#include \"core.h\"\n");

    sync(&SyncOptions::new(fixture.path()), false)?;

    assert_eq!(
        fixture.read("CMakeLists.txt"),
        r#"add_library(headers INTERFACE)
target_link_libraries(headers INTERFACE fmt::fmt)

add_library(core core.cpp)
target_link_libraries(core PUBLIC glog::glog headers)
if(WITH_EXTRA)
  target_link_libraries(core PUBLIC extra_lib)
endif()
"#
    );
    Ok(())
}

#[test]
fn test_excluded_directories_are_ignored() -> Result<()> {
    let fixture = ProjectFixture::reprex().file(
        "velox/proto/CMakeLists.txt",
        "add_library(proto proto.cpp)\ntarget_link_libraries(proto PUBLIC nothing_observed)\n",
    );
    fixture.write("velox/proto/proto.cpp", "int x;\n");

    let options = SyncOptions::new(fixture.path()).with_exclude("proto");
    let project = Project::analyze(&options)?;
    assert!(project.graph().get("proto").is_none());
    assert_eq!(project.files().len(), 3);
    Ok(())
}
