use std::collections::BTreeMap;
use std::io;

use thiserror::Error;
use tracing::debug;

mod alias;
mod cd;
mod env;
mod exit;
mod help;
mod history;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use env::{EnvCommand, SetenvCommand, UnsetenvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::env::EnvError;
use crate::core::state::ShellState;
use crate::path::{PathResolver, ResolveError};
use crate::process::{ProcessError, ProcessExecutor};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Illegal number: {0}")]
    IllegalNumber(String),
    #[error("can't cd to {0}")]
    CantCd(String),
    #[error("{0} not set")]
    NotSet(&'static str),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("write error: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    pub fn status(&self) -> i32 {
        match self {
            CommandError::IllegalNumber(_) | CommandError::CantCd(_) => 2,
            CommandError::Resolve(e) => e.status(),
            CommandError::Process(e) => e.status(),
            CommandError::NotSet(_)
            | CommandError::Usage(_)
            | CommandError::Env(_)
            | CommandError::Io(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue(i32),
    Exit(i32),
}

pub trait Command {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Cd(CdCommand),
    Help(HelpCommand),
    History(HistoryCommand),
    Alias(AliasCommand),
    Env(EnvCommand),
    Setenv(SetenvCommand),
    Unsetenv(UnsetenvCommand),
}

impl Command for CommandType {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(state, args),
            CommandType::Cd(cmd) => cmd.execute(state, args),
            CommandType::Help(cmd) => cmd.execute(state, args),
            CommandType::History(cmd) => cmd.execute(state, args),
            CommandType::Alias(cmd) => cmd.execute(state, args),
            CommandType::Env(cmd) => cmd.execute(state, args),
            CommandType::Setenv(cmd) => cmd.execute(state, args),
            CommandType::Unsetenv(cmd) => cmd.execute(state, args),
        }
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    resolver: PathResolver,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand));
        commands.insert("cd", CommandType::Cd(CdCommand));
        commands.insert("help", CommandType::Help(HelpCommand));
        commands.insert("history", CommandType::History(HistoryCommand));
        commands.insert("alias", CommandType::Alias(AliasCommand));
        commands.insert("env", CommandType::Env(EnvCommand));
        commands.insert("setenv", CommandType::Setenv(SetenvCommand));
        commands.insert("unsetenv", CommandType::Unsetenv(UnsetenvCommand));

        Self {
            commands,
            resolver: PathResolver::new(),
            process_executor: ProcessExecutor::new(),
        }
    }

    pub fn execute(&self, state: &mut ShellState, argv: &[String]) -> Result<Flow, CommandError> {
        let Some((name, args)) = argv.split_first() else {
            return Ok(Flow::Continue(state.last_status()));
        };

        if let Some(cmd) = self.commands.get(name.as_str()) {
            debug!(builtin = %name, "dispatch");
            return cmd.execute(state, args);
        }

        let path = self.resolver.resolve(name, state.env.get("PATH"))?;
        let status = self
            .process_executor
            .run(&path, argv, state.env.materialize())?;
        Ok(Flow::Continue(status))
    }

    pub fn builtin_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::env::EnvStore;
    use crate::input::History;

    pub(crate) fn state_with(pairs: &[(&str, &str)]) -> ShellState {
        ShellState::new(
            "chainsh",
            EnvStore::from_pairs(pairs.iter().copied()),
            History::in_memory(16),
        )
    }

    pub(crate) fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_builtin_names() {
        let executor = CommandExecutor::new();
        let names: Vec<&str> = executor.builtin_names().collect();
        assert_eq!(
            names,
            vec!["alias", "cd", "env", "exit", "help", "history", "setenv", "unsetenv"]
        );
    }

    #[test]
    fn test_empty_argv_keeps_status() {
        let executor = CommandExecutor::new();
        let mut state = state_with(&[]);
        state.record_status(5);
        assert_eq!(executor.execute(&mut state, &[]).unwrap(), Flow::Continue(5));
    }

    #[test]
    fn test_external_command_status() {
        let executor = CommandExecutor::new();
        let mut state = state_with(&[("PATH", "/usr/bin:/bin")]);
        let flow = executor
            .execute(&mut state, &args(&["sh", "-c", "exit 4"]))
            .unwrap();
        assert_eq!(flow, Flow::Continue(4));
    }

    #[test]
    fn test_unknown_command() {
        let executor = CommandExecutor::new();
        let mut state = state_with(&[("PATH", "/usr/bin:/bin")]);
        let err = executor
            .execute(&mut state, &args(&["nonexistent_cmd_xyz"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::Resolve(ResolveError::NotFound(_))));
        assert_eq!(err.status(), 127);
        assert_eq!(err.to_string(), "command not found");
    }

    #[test]
    fn test_setenv_reaches_children() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("seen");
        let executor = CommandExecutor::new();
        let mut state = state_with(&[("PATH", "/usr/bin:/bin")]);

        executor
            .execute(&mut state, &args(&["setenv", "GREETING", "hi"]))
            .unwrap();
        let script = format!("printf %s \"$GREETING\" > {}", out.display());
        executor
            .execute(&mut state, &args(&["sh", "-c", &script]))
            .unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "hi");
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::IllegalNumber("abc".to_string()),
            CommandError::CantCd("/nope".to_string()),
            CommandError::NotSet("HOME"),
            CommandError::Usage("setenv VARIABLE VALUE"),
        ];
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Illegal number: abc",
                "can't cd to /nope",
                "HOME not set",
                "usage: setenv VARIABLE VALUE"
            ]
        );
        let statuses: Vec<i32> = errors.iter().map(CommandError::status).collect();
        assert_eq!(statuses, vec![2, 2, 1, 1]);
    }
}
