use std::borrow::Cow;

use crate::core::list::{split_key, StringList};

const SEP: char = '=';

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: StringList,
}

impl AliasTable {
    pub fn new() -> Self {
        Self {
            aliases: StringList::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.aliases
            .upsert_key(name, SEP, format!("{}={}", name, value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases
            .find_key(name, SEP)
            .and_then(|node| split_key(&node.text, SEP).1)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.aliases.remove_key(name, SEP)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|node| {
            let (name, value) = split_key(&node.text, SEP);
            (name, value.unwrap_or_default())
        })
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Replaces the leading word of `command` with its alias value.
    ///
    /// Expansion happens once; the substituted value is not looked up again,
    /// so `alias ls=ls -F` cannot loop.
    pub fn expand_command<'a>(&self, command: &'a str, delimiters: &[char]) -> Cow<'a, str> {
        let Some(start) = command.find(|c: char| !delimiters.contains(&c)) else {
            return Cow::Borrowed(command);
        };
        let end = command[start..]
            .find(|c: char| delimiters.contains(&c))
            .map_or(command.len(), |pos| start + pos);

        match self.get(&command[start..end]) {
            Some(value) => {
                let mut expanded = String::with_capacity(command.len() + value.len());
                expanded.push_str(&command[..start]);
                expanded.push_str(value);
                expanded.push_str(&command[end..]);
                Cow::Owned(expanded)
            }
            None => Cow::Borrowed(command),
        }
    }
}
