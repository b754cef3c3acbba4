pub mod chain;
pub mod substitute;
pub mod tokenizer;

use std::process;

use tracing::{debug, warn};

use crate::{
    config::{ShellConfig, PROMPT},
    core::{
        commands::{CommandExecutor, Flow},
        env::EnvStore,
        state::ShellState,
    },
    error::ShellError,
    input::{History, LineReader, ReadOutcome},
    process::signal,
};

use chain::{should_run, strip_comment, ChainOp, ChainSplitter};
use substitute::Substitution;
use tokenizer::{tokenize, DEFAULT_DELIMITERS};

pub struct Shell {
    state: ShellState,
    reader: LineReader,
    executor: CommandExecutor,
}

impl Shell {
    pub fn new(config: &ShellConfig, reader: LineReader) -> Self {
        let history = match &config.history_file {
            Some(path) => History::with_file(path.clone(), config.history_limit)
                .unwrap_or_else(|e| {
                    warn!(path = %path.display(), error = %e, "history not loaded");
                    History::in_memory(config.history_limit)
                }),
            None => History::in_memory(config.history_limit),
        };

        let state = ShellState::new(config.program.clone(), EnvStore::from_process(), history);
        Self::with_state(state, reader)
    }

    pub fn with_state(mut state: ShellState, mut reader: LineReader) -> Self {
        state.interactive = reader.is_interactive();

        for node in state.history.iter() {
            reader.remember(&node.text);
        }

        Self {
            state,
            reader,
            executor: CommandExecutor::new(),
        }
    }

    pub fn run(&mut self) -> Result<i32, ShellError> {
        if self.state.interactive {
            signal::setup_signal_handlers()?;
        }

        let result = self.read_loop();
        self.persist_history();
        result
    }

    fn read_loop(&mut self) -> Result<i32, ShellError> {
        loop {
            if let Some(helper) = self.reader.helper_mut() {
                helper.sync(
                    self.executor.builtin_names(),
                    self.state.aliases.iter().map(|(name, _)| name),
                    self.state.env.get("PATH"),
                );
            }

            let line = match self.reader.read_line(PROMPT)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => {
                    if self.state.interactive {
                        println!();
                    }
                    return Ok(self.state.last_status);
                }
            };

            self.state.line_count += 1;
            if !line.trim().is_empty() {
                self.state.history.add(&line);
                self.reader.remember(&line);
            }

            let exit = self.execute_line(&line);
            if signal::take_interrupt() {
                debug!("child interrupted");
            }
            if let Some(code) = exit {
                return Ok(code);
            }
        }
    }

    pub fn execute_line(&mut self, line: &str) -> Option<i32> {
        let mut pending = ChainOp::Sequence;

        for sub in ChainSplitter::new(strip_comment(line)) {
            let op = std::mem::replace(&mut pending, sub.terminator);
            if sub.is_blank() {
                continue;
            }
            if !should_run(op, self.state.last_status) {
                debug!(command = %sub.text, status = self.state.last_status, "skipped");
                continue;
            }
            if let Some(code) = self.execute_subcommand(&sub.text) {
                return Some(code);
            }
        }
        None
    }

    fn execute_subcommand(&mut self, text: &str) -> Option<i32> {
        let expanded = Substitution {
            aliases: &self.state.aliases,
            env: &self.state.env,
            last_status: self.state.last_status,
            pid: process::id(),
        }
        .apply(text, DEFAULT_DELIMITERS);

        let argv = tokenize(&expanded, DEFAULT_DELIMITERS);
        let name = argv.first()?.clone();

        match self.executor.execute(&mut self.state, &argv) {
            Ok(Flow::Continue(status)) => {
                debug!(command = %name, status, "finished");
                self.state.record_status(status);
                None
            }
            Ok(Flow::Exit(code)) => {
                self.state.record_status(code);
                Some(code)
            }
            Err(e) => {
                self.state.report(&name, &e);
                self.state.record_status(e.status());
                None
            }
        }
    }

    fn persist_history(&self) {
        if let Err(e) = self.state.history.save() {
            warn!(error = %e, "history not saved");
        }
    }
}
