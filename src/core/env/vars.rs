use super::EnvError;
use crate::core::list::{split_key, StringList};
use std::env;

const SEP: char = '=';

/// The shell's copy of the environment.
///
/// Children never see the process environment directly: before each spawn the
/// store is materialized into a flat `NAME=VALUE` array, rebuilt only after a
/// `set`/`unset` since the previous materialization.
#[derive(Clone, Debug)]
pub struct EnvStore {
    vars: StringList,
    changed: bool,
    materialized: Vec<(String, String)>,
}

impl EnvStore {
    pub fn from_process() -> Self {
        Self::from_pairs(env::vars_os().map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        }))
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut vars = StringList::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            if valid_name(key) {
                vars.upsert_key(key, SEP, format!("{}={}", key, value.as_ref()));
            }
        }

        Self {
            vars,
            changed: true,
            materialized: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .find_key(name, SEP)
            .and_then(|node| split_key(&node.text, SEP).1)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if !valid_name(name) {
            return Err(EnvError::InvalidName(name.to_string()));
        }

        self.vars.upsert_key(name, SEP, format!("{}={}", name, value));
        self.changed = true;
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> bool {
        let removed = self.vars.remove_key(name, SEP);
        if removed {
            self.changed = true;
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|node| {
            let (key, value) = split_key(&node.text, SEP);
            (key, value.unwrap_or_default())
        })
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn materialize(&mut self) -> &[(String, String)] {
        if self.changed {
            self.materialized = self
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            self.changed = false;
        }
        &self.materialized
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEP) && !name.contains('\0')
}
