//! Temporary project trees.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A C++ project in a temporary directory, removed on drop.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// An empty project.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics on I/O errors.
    #[must_use]
    pub fn file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write `content` to `relative` in place.
    ///
    /// # Panics
    ///
    /// Panics on I/O errors.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
    }

    /// Read a file of the project.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative)).expect("Failed to read fixture file")
    }

    /// Project root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the project.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Two libraries that include each other's headers.
    ///
    /// `util`'s header includes `io`'s header, and `io`'s source includes
    /// `util`'s header, while both link statements say `PUBLIC`. Syncing turns
    /// `io`'s statement into `io PRIVATE util` and leaves `util` alone.
    #[must_use]
    pub fn reprex() -> Self {
        Self::new()
            .file("velox/CMakeLists.txt", "add_subdirectory(util)\nadd_subdirectory(io)\n")
            .file(
                "velox/util/CMakeLists.txt",
                "add_library(util util.cpp)\ntarget_link_libraries(util PUBLIC io)\n",
            )
            .file("velox/util/util.h", "#pragma once\n#include \"velox/io/io.h\"\n")
            .file("velox/util/util.cpp", "#include \"velox/util/util.h\"\n")
            .file(
                "velox/io/CMakeLists.txt",
                "# io library\nadd_library(io io.cpp)\n\ntarget_link_libraries(io PUBLIC util) # linked\n",
            )
            .file("velox/io/io.h", "#pragma once\n#include <string>\n")
            .file("velox/io/io.cpp", "#include \"velox/io/io.h\"\n#include \"velox/util/util.h\"\n")
    }

    /// [`reprex`](Self::reprex) with `io` already declaring `PRIVATE util`.
    ///
    /// `io`'s link statement already matches what its includes imply, so a
    /// sync leaves every file unchanged.
    #[must_use]
    pub fn reprex_private() -> Self {
        Self::reprex().file(
            "velox/io/CMakeLists.txt",
            "# io library\nadd_library(io io.cpp)\n\ntarget_link_libraries(io PRIVATE util) # linked\n",
        )
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
