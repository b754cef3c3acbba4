use std::env;
use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::path::PathExpander;

#[derive(Clone, Debug, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        let (target, announce) = match args.first().map(String::as_str) {
            None => (lookup(state, "HOME")?, false),
            Some("-") => (lookup(state, "OLDPWD")?, true),
            Some(path) => (path.to_string(), false),
        };

        let destination = PathExpander::new(state.env.get("HOME")).expand(&target);
        let previous = env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .ok()
            .or_else(|| state.env.get("PWD").map(str::to_string));

        env::set_current_dir(&destination).map_err(|_| CommandError::CantCd(target.clone()))?;

        let current = env::current_dir()
            .unwrap_or(destination)
            .to_string_lossy()
            .into_owned();
        if let Some(previous) = previous {
            state.env.set("OLDPWD", &previous)?;
        }
        state.env.set("PWD", &current)?;

        if announce {
            writeln!(io::stdout(), "{}", current)?;
        }
        Ok(Flow::Continue(0))
    }
}

fn lookup(state: &ShellState, name: &'static str) -> Result<String, CommandError> {
    state
        .env
        .get(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(CommandError::NotSet(name))
}
