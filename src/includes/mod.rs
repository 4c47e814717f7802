//! Include scanning and header ownership.
//!
//! [`SourceIncludeResolver`] extracts `#include` paths, [`CanonicalNames`]
//! maps well-known third-party headers to their link targets,
//! [`HeaderIndex`] records which target owns each local header, and
//! [`map_includes`] combines them into per-target observed dependencies.

pub mod canonical;
pub mod index;
pub mod mapper;
pub mod resolver;

pub use canonical::CanonicalNames;
pub use index::HeaderIndex;
pub use mapper::{MappingStats, map_includes};
pub use resolver::{IncludeResolver, SourceIncludeResolver};
