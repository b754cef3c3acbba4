use crate::core::{alias::AliasTable, env::EnvStore};
use crate::input::History;

pub struct ShellState {
    pub(crate) program: String,
    pub(crate) line_count: usize,
    pub(crate) last_status: i32,
    pub(crate) interactive: bool,
    pub(crate) env: EnvStore,
    pub(crate) aliases: AliasTable,
    pub(crate) history: History,
}

impl ShellState {
    pub fn new(program: impl Into<String>, env: EnvStore, history: History) -> Self {
        Self {
            program: program.into(),
            line_count: 0,
            last_status: 0,
            interactive: false,
            env,
            aliases: AliasTable::new(),
            history,
        }
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    pub(crate) fn record_status(&mut self, status: i32) {
        self.last_status = status;
    }

    pub(crate) fn report(&self, command: &str, message: impl std::fmt::Display) {
        eprintln!(
            "{}: {}: {}: {}",
            self.program, self.line_count, command, message
        );
    }
}
