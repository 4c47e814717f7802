//! Command dispatch over a parsed list file.

use anyhow::Result;

use super::parser::{CommandInvocation, ListFile};
use crate::constants::{ADD_TARGET_COMMANDS, LINK_COMMAND, SOURCES_COMMAND};

/// Which hook a command is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `add_library` / `add_executable`
    AddTarget,
    /// `target_link_libraries` / `target_sources`
    ModifyTarget,
    /// Anything else; not delivered
    Other,
}

impl CommandKind {
    /// Classify a command name, ignoring ASCII case.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if ADD_TARGET_COMMANDS.iter().any(|command| name.eq_ignore_ascii_case(command)) {
            Self::AddTarget
        } else if name.eq_ignore_ascii_case(LINK_COMMAND) || name.eq_ignore_ascii_case(SOURCES_COMMAND) {
            Self::ModifyTarget
        } else {
            Self::Other
        }
    }
}

/// Receives target-related commands of a list file in file order.
///
/// Both hooks default to doing nothing so a listener only implements the
/// events it cares about.
pub trait ListFileListener {
    /// Called for every `add_library` / `add_executable` invocation.
    fn exit_add_target(&mut self, _file: &ListFile, _command: &CommandInvocation) -> Result<()> {
        Ok(())
    }

    /// Called for every `target_link_libraries` / `target_sources` invocation.
    fn exit_modify_target(&mut self, _file: &ListFile, _command: &CommandInvocation) -> Result<()> {
        Ok(())
    }
}

/// Deliver every target command in `file` to `listener`, stopping at the first error.
pub fn walk<L: ListFileListener + ?Sized>(file: &ListFile, listener: &mut L) -> Result<()> {
    for command in file.commands() {
        match CommandKind::of(&command.name) {
            CommandKind::AddTarget => listener.exit_add_target(file, command)?,
            CommandKind::ModifyTarget => listener.exit_modify_target(file, command)?,
            CommandKind::Other => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ListFileListener for Recorder {
        fn exit_add_target(&mut self, _file: &ListFile, command: &CommandInvocation) -> Result<()> {
            self.events.push(format!("add:{}", command.name));
            Ok(())
        }

        fn exit_modify_target(&mut self, _file: &ListFile, command: &CommandInvocation) -> Result<()> {
            self.events.push(format!("modify:{}", command.name));
            Ok(())
        }
    }

    #[test]
    fn test_command_kind_is_case_insensitive() {
        assert_eq!(CommandKind::of("ADD_LIBRARY"), CommandKind::AddTarget);
        assert_eq!(CommandKind::of("add_executable"), CommandKind::AddTarget);
        assert_eq!(CommandKind::of("Target_Link_Libraries"), CommandKind::ModifyTarget);
        assert_eq!(CommandKind::of("target_sources"), CommandKind::ModifyTarget);
        assert_eq!(CommandKind::of("set"), CommandKind::Other);
    }

    #[test]
    fn test_walk_dispatches_in_order() {
        let file = ListFile::parse(
            "CMakeLists.txt",
            "set(x 1)\nadd_library(a a.cpp)\nTARGET_LINK_LIBRARIES(a b)\nadd_executable(c c.cpp)\n",
        )
        .unwrap();

        let mut recorder = Recorder::default();
        walk(&file, &mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec!["add:add_library", "modify:TARGET_LINK_LIBRARIES", "add:add_executable"]
        );
    }

    #[test]
    fn test_walk_stops_on_error() {
        struct Failing(usize);
        impl ListFileListener for Failing {
            fn exit_add_target(&mut self, _file: &ListFile, _command: &CommandInvocation) -> Result<()> {
                self.0 += 1;
                anyhow::bail!("boom")
            }
        }

        let file = ListFile::parse("CMakeLists.txt", "add_library(a)\nadd_library(b)\n").unwrap();
        let mut listener = Failing(0);
        assert!(walk(&file, &mut listener).is_err());
        assert_eq!(listener.0, 1);
    }
}
