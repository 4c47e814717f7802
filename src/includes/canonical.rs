//! Canonical dependency names for well-known third-party headers.

use std::collections::BTreeMap;

/// Header prefix to link target, for libraries found via their CMake packages.
const BUILTIN: &[(&str, &str)] = &[
    ("folly/", "Folly::folly"),
    ("glog/", "glog::glog"),
    ("gflags/", "gflags::gflags"),
    ("fmt/", "fmt::fmt"),
    ("thrift/", "thrift::thrift"),
    ("snappy.h", "Snappy::snappy"),
    ("re2/", "re2::re2"),
    ("gtest/", "GTest::gtest"),
    ("gmock/", "GTest::gmock"),
    ("benchmark/", "benchmark::benchmark"),
    ("zstd.h", "zstd::zstd"),
    ("lz4.h", "lz4::lz4"),
    ("lz4frame.h", "lz4::lz4"),
    ("zlib.h", "ZLIB::ZLIB"),
    ("lzo/", "lzo2::lzo2"),
    ("double-conversion/", "double-conversion::double-conversion"),
    ("xsimd/", "xsimd"),
    ("boost/", "Boost::headers"),
    ("simdjson.h", "simdjson::simdjson"),
    ("arrow/", "arrow"),
    ("parquet/", "parquet"),
    ("protobuf/", "protobuf::libprotobuf"),
    ("google/protobuf/", "protobuf::libprotobuf"),
    ("openssl/", "OpenSSL::SSL"),
    ("curl/", "CURL::libcurl"),
];

/// Longest-prefix table from include path to dependency identifier.
#[derive(Debug, Clone)]
pub struct CanonicalNames {
    entries: BTreeMap<String, String>,
}

impl Default for CanonicalNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CanonicalNames {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(prefix, name)| ((*prefix).to_string(), (*name).to_string()))
                .collect(),
        }
    }

    /// An empty table.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace entries; later entries win over built-ins with the same prefix.
    #[must_use]
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (prefix, name) in entries {
            self.entries.insert(prefix.into(), name.into());
        }
        self
    }

    /// Dependency identifier for `header`, using the longest matching prefix.
    #[must_use]
    pub fn lookup(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(prefix, _)| header.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, name)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
