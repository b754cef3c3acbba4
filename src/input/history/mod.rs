mod file_ops;

use std::path::PathBuf;

use thiserror::Error;

use self::file_ops::FileOps;
use crate::core::list::{Node, StringList};

pub const HISTORY_FILE: &str = ".chainsh_history";
pub const MAX_HISTORY_ENTRIES: usize = 4096;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command lines of this and previous sessions, oldest first.
///
/// Sequence numbers run densely from 1. The backing file is read once on
/// construction and rewritten in full by [`History::save`].
pub struct History {
    entries: StringList,
    file_ops: Option<FileOps>,
    max_entries: usize,
}

impl History {
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            entries: StringList::new(),
            file_ops: None,
            max_entries: max_entries.max(1),
        }
    }

    pub fn with_file(history_file: PathBuf, max_entries: usize) -> Result<Self, HistoryError> {
        let file_ops = FileOps::new(history_file);
        let loaded = file_ops.load_entries()?;

        let mut history = Self {
            entries: StringList::new(),
            file_ops: Some(file_ops),
            max_entries: max_entries.max(1),
        };
        for line in loaded {
            history.entries.push_back(line, 0);
        }
        history.trim_entries();
        Ok(history)
    }

    pub fn add(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let next = self.entries.len() + 1;
        self.entries.push_back(line, next);
        self.trim_entries();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self) -> Result<(), HistoryError> {
        match &self.file_ops {
            Some(file_ops) => file_ops.write_entries(self.entries.texts()),
            None => Ok(()),
        }
    }

    fn trim_entries(&mut self) {
        let excess = self.entries.len().saturating_sub(self.max_entries);
        for _ in 0..excess {
            self.entries.remove_at(0);
        }
        self.entries.renumber(1);
    }
}
