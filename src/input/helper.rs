use std::{
    borrow::Cow,
    collections::BTreeSet,
    fs,
    path::Path,
};

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::highlight::SyntaxHighlighter;

#[derive(Clone)]
pub struct LineHelper {
    highlighter: SyntaxHighlighter,
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
    scanned_path: Option<Option<String>>,
}

impl Default for LineHelper {
    fn default() -> Self {
        Self::new(SyntaxHighlighter::new())
    }
}

impl LineHelper {
    pub fn new(highlighter: SyntaxHighlighter) -> Self {
        Self {
            highlighter,
            commands: BTreeSet::new(),
            aliases: BTreeSet::new(),
            scanned_path: None,
        }
    }

    /// Brings the candidate sets up to date before a prompt. `PATH` is only
    /// rescanned when its value differs from the previous scan.
    pub fn sync<'a, 'b>(
        &mut self,
        builtins: impl IntoIterator<Item = &'a str>,
        aliases: impl IntoIterator<Item = &'b str>,
        search_path: Option<&str>,
    ) {
        if self.scanned_path.as_ref().map(|path| path.as_deref()) != Some(search_path) {
            self.refresh_commands(builtins, search_path);
            self.scanned_path = Some(search_path.map(str::to_string));
        }
        self.aliases = aliases.into_iter().map(str::to_string).collect();
    }

    fn refresh_commands<'a>(
        &mut self,
        builtins: impl IntoIterator<Item = &'a str>,
        search_path: Option<&str>,
    ) {
        self.commands = builtins.into_iter().map(str::to_string).collect();

        for dir in search_path.unwrap_or_default().split(':').filter(|d| !d.is_empty()) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_file = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();

        matches.extend(
            self.aliases
                .iter()
                .filter(|alias| alias.starts_with(prefix))
                .map(|alias| Pair {
                    display: format!("{} (alias)", alias),
                    replacement: alias.clone(),
                }),
        );
        matches
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_part, file_prefix) = match incomplete.rfind('/') {
            Some(pos) => incomplete.split_at(pos + 1),
            None => ("", incomplete),
        };
        let search_dir = if dir_part.is_empty() { "." } else { dir_part };

        let Ok(entries) = fs::read_dir(Path::new(search_dir)) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) || (name.starts_with('.') && !file_prefix.starts_with('.')) {
                    return None;
                }
                let suffix = if entry.path().is_dir() { "/" } else { "" };
                Some(Pair {
                    display: format!("{}{}", name, suffix),
                    replacement: format!("{}{}{}", dir_part, name, suffix),
                })
            })
            .collect();
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

impl Helper for LineHelper {}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.highlight_prompt(prompt))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_enabled()
    }
}

impl Hinter for LineHelper {
    type Hint = String;
}

impl Validator for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before
            .rfind([' ', '\t', ';', '&', '|'])
            .map_or(0, |idx| idx + 1);
        let word = &before[start..];

        let preceding = before[..start].trim_end_matches([' ', '\t']);
        let command_position =
            preceding.is_empty() || preceding.ends_with([';', '&', '|']);

        let matches = if command_position && !word.contains('/') {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, matches))
    }
}
