use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, state: &mut ShellState, _args: &[String]) -> Result<Flow, CommandError> {
        let mut out = io::stdout().lock();
        for entry in state.history.iter() {
            writeln!(out, "{}: {}", entry.index, entry.text)?;
        }
        Ok(Flow::Continue(0))
    }
}
