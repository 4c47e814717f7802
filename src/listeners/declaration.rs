//! First pass: populates the declared state of the graph.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::args::{
    LinkScopes, clean_link_args, clean_target_args, classify_files, command_args, is_variable_reference,
};
use crate::cmake::{CommandInvocation, ListFile, ListFileListener};
use crate::constants::{PAIRED_HEADER_GLOB, SOURCES_COMMAND};
use crate::graph::{TargetGraph, TargetId, TargetKind};
use crate::includes::HeaderIndex;

/// Records targets, their files and their first link statement.
pub struct DeclarationListener<'a> {
    graph: &'a mut TargetGraph,
    headers: Option<&'a mut HeaderIndex>,
    header_pattern: Option<glob::Pattern>,
}

impl<'a> DeclarationListener<'a> {
    /// Listener that only updates the graph.
    pub fn new(graph: &'a mut TargetGraph) -> Self {
        Self {
            graph,
            headers: None,
            header_pattern: glob::Pattern::new(PAIRED_HEADER_GLOB).ok(),
        }
    }

    /// Also record every attributed header in `index`.
    #[must_use]
    pub fn with_header_index(mut self, index: &'a mut HeaderIndex) -> Self {
        self.headers = Some(index);
        self
    }

    /// Attribute file arguments to `target`, adding headers that pair with a source.
    fn attribute_files(&mut self, target: TargetId, files: &[String], directory: &Path) {
        let classified = classify_files(files, directory);
        let mut headers = classified.headers;
        headers.extend(self.paired_headers(&classified.sources, directory));

        let node = self.graph.node_mut(target);
        node.sources.extend(classified.sources);

        let mut added = Vec::new();
        for header in headers {
            if node.headers.insert(header.clone()) {
                added.push(header);
            }
        }

        if let Some(index) = self.headers.as_deref_mut() {
            for header in &added {
                index.record(header, target);
            }
        }
    }

    /// Headers in `directory` whose stem matches one of `sources`.
    fn paired_headers(&self, sources: &[PathBuf], directory: &Path) -> Vec<PathBuf> {
        if sources.is_empty() {
            return Vec::new();
        }
        let stems: BTreeSet<_> = sources.iter().filter_map(|source| source.file_stem()).collect();

        let entries = match std::fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {} for paired headers: {e}", directory.display());
                return Vec::new();
            }
        };

        let mut headers: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| self.header_pattern.as_ref().is_some_and(|p| p.matches(name)))
            })
            .filter(|path| path.file_stem().is_some_and(|stem| stems.contains(stem)))
            .collect();
        headers.sort();
        headers
    }

    fn declare_links(&mut self, file: &ListFile, command: &CommandInvocation) -> Result<()> {
        let args = command_args(file, command, false)?;
        let name = &args[0];
        if is_variable_reference(name) {
            warn!("Ignoring link statement for variable target {name} in {}", file.path().display());
            return Ok(());
        }

        let target = self.graph.get_or_create(name);
        if self.graph.node(target).link_declared {
            debug!(
                "Ignoring repeated target_link_libraries for '{name}' at {}:{}",
                file.path().display(),
                command.line
            );
            return Ok(());
        }

        let (kept, removed) = clean_link_args(&args[1..]);
        if !removed.is_empty() {
            warn!("Removed invalid link items for '{name}': {}", removed.join(", "));
        }

        let scopes = LinkScopes::split(&kept);
        let public = self.ids(&scopes.public);
        let private = self.ids(&scopes.private);
        let interface = self.ids(&scopes.interface);

        let node = self.graph.node_mut(target);
        node.declared_public_deps = public;
        node.declared_private_deps = private;
        node.declared_interface_deps = interface;
        node.link_declared = true;
        Ok(())
    }

    fn declare_sources(&mut self, file: &ListFile, command: &CommandInvocation) -> Result<()> {
        let args = command_args(file, command, false)?;
        let name = &args[0];
        if is_variable_reference(name) {
            warn!("Ignoring target_sources for variable target {name} in {}", file.path().display());
            return Ok(());
        }

        let target = self.graph.get_or_create(name);
        let files = clean_target_args(&args[1..]);
        self.attribute_files(target, &files, &file.directory());
        Ok(())
    }

    fn ids(&mut self, names: &[String]) -> Vec<TargetId> {
        names.iter().map(|name| self.graph.get_or_create(name)).collect()
    }
}

impl ListFileListener for DeclarationListener<'_> {
    fn exit_add_target(&mut self, file: &ListFile, command: &CommandInvocation) -> Result<()> {
        let args = command_args(file, command, true)?;
        let name = &args[0];
        if is_variable_reference(name) {
            warn!(
                "Skipping target with variable name {name} at {}:{}",
                file.path().display(),
                command.line
            );
            return Ok(());
        }

        let target = self.graph.get_or_create(name);
        if args[1..].iter().any(|arg| arg == "IMPORTED") {
            debug!("'{name}' is an imported target");
            return Ok(());
        }

        let directory = file.directory();
        let mut rest = clean_target_args(&args[1..]);

        if rest.len() == 2 && rest[0] == "ALIAS" {
            let aliased = self.graph.get_or_create(&rest[1]);
            self.graph.define_alias(target, aliased, directory);
            return Ok(());
        }

        let kind = match rest.first().map(String::as_str) {
            Some("OBJECT") => TargetKind::ObjectLibrary,
            Some("INTERFACE") => TargetKind::InterfaceOnly,
            _ => TargetKind::Normal,
        };
        if kind != TargetKind::Normal {
            rest.remove(0);
        }

        self.graph.define(target, kind, directory.clone());
        self.attribute_files(target, &rest, &directory);
        Ok(())
    }

    fn exit_modify_target(&mut self, file: &ListFile, command: &CommandInvocation) -> Result<()> {
        if command.is(SOURCES_COMMAND) {
            self.declare_sources(file, command)
        } else {
            self.declare_links(file, command)
        }
    }
}
