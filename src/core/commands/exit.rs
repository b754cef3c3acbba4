use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        match args.first() {
            None => Ok(Flow::Exit(state.last_status())),
            Some(arg) => parse_status(arg)
                .map(Flow::Exit)
                .ok_or_else(|| CommandError::IllegalNumber(arg.clone())),
        }
    }
}

fn parse_status(arg: &str) -> Option<i32> {
    let digits = arg.strip_prefix('+').unwrap_or(arg);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
