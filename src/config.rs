use std::path::PathBuf;

use crate::flags::Flags;
use crate::input::history::{HISTORY_FILE, MAX_HISTORY_ENTRIES};

pub const PROMPT: &str = "$ ";

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub program: String,
    pub script: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_limit: usize,
    pub quiet: bool,
    pub debug: bool,
}

impl ShellConfig {
    pub fn from_flags(program: impl Into<String>, flags: &Flags) -> Self {
        let history_file = if flags.is_set("no-history") {
            None
        } else {
            dirs::home_dir().map(|home| home.join(HISTORY_FILE))
        };

        ShellConfig {
            program: program.into(),
            script: flags.script().map(PathBuf::from),
            history_file,
            history_limit: MAX_HISTORY_ENTRIES,
            quiet: flags.is_set("quiet"),
            debug: flags.is_set("debug"),
        }
    }
}
