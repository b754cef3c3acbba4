use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct AliasCommand;

#[derive(Debug, PartialEq, Eq)]
enum AliasArg {
    Show(String),
    Define(String, String),
}

impl Command for AliasCommand {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        let mut out = io::stdout().lock();

        if args.is_empty() {
            for (name, value) in state.aliases.iter() {
                writeln!(out, "{}='{}'", name, value)?;
            }
            return Ok(Flow::Continue(0));
        }

        let parsed = parse_args(args);
        if parsed
            .iter()
            .any(|arg| matches!(arg, AliasArg::Define(name, _) if name.is_empty()))
        {
            return Err(CommandError::Usage("alias [name[=value] ...]"));
        }

        let mut status = 0;
        for arg in parsed {
            match arg {
                AliasArg::Define(name, value) if value.is_empty() => {
                    state.aliases.remove(&name);
                }
                AliasArg::Define(name, value) => state.aliases.set(&name, &value),
                AliasArg::Show(name) => match state.aliases.get(&name) {
                    Some(value) => writeln!(out, "{}='{}'", name, value)?,
                    None => {
                        state.report("alias", format_args!("{} not found", name));
                        status = 1;
                    }
                },
            }
        }
        Ok(Flow::Continue(status))
    }
}

/// Groups words into definitions and lookups.
///
/// Words without `=` that follow a definition extend its value, which is how
/// `alias ll=ls -l` survives tokenization. One layer of matching quotes
/// around a value is removed.
fn parse_args(args: &[String]) -> Vec<AliasArg> {
    let mut parsed: Vec<AliasArg> = Vec::new();
    for arg in args {
        if let Some((name, value)) = arg.split_once('=') {
            parsed.push(AliasArg::Define(name.to_string(), value.to_string()));
            continue;
        }
        match parsed.last_mut() {
            Some(AliasArg::Define(_, value)) if !value.is_empty() => {
                value.push(' ');
                value.push_str(arg);
            }
            _ => parsed.push(AliasArg::Show(arg.clone())),
        }
    }

    for arg in parsed.iter_mut() {
        if let AliasArg::Define(_, value) = arg {
            *value = strip_quotes(value).to_string();
        }
    }
    parsed
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::{args, state_with};

    #[test]
    fn test_parse_joins_unquoted_words() {
        assert_eq!(
            parse_args(&args(&["ll=ls", "-l", "gs=git", "status"])),
            vec![
                AliasArg::Define("ll".to_string(), "ls -l".to_string()),
                AliasArg::Define("gs".to_string(), "git status".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_strips_quotes() {
        assert_eq!(
            parse_args(&args(&["ll='ls", "-la'"])),
            vec![AliasArg::Define("ll".to_string(), "ls -la".to_string())]
        );
        assert_eq!(
            parse_args(&args(&["q=\"x\""])),
            vec![AliasArg::Define("q".to_string(), "x".to_string())]
        );
    }

    #[test]
    fn test_parse_lookups() {
        assert_eq!(
            parse_args(&args(&["ll", "gs"])),
            vec![
                AliasArg::Show("ll".to_string()),
                AliasArg::Show("gs".to_string())
            ]
        );
        assert_eq!(
            parse_args(&args(&["rm=", "ll"])),
            vec![
                AliasArg::Define("rm".to_string(), String::new()),
                AliasArg::Show("ll".to_string())
            ]
        );
    }

    #[test]
    fn test_alias_add_and_overwrite() {
        let mut state = state_with(&[]);
        AliasCommand
            .execute(&mut state, &args(&["ll=ls", "-l"]))
            .unwrap();
        assert_eq!(state.aliases.get("ll"), Some("ls -l"));

        AliasCommand
            .execute(&mut state, &args(&["ll='ls -la'"]))
            .unwrap();
        assert_eq!(state.aliases.get("ll"), Some("ls -la"));
        assert_eq!(state.aliases.len(), 1);
    }

    #[test]
    fn test_alias_empty_value_removes() {
        let mut state = state_with(&[]);
        state.aliases.set("ll", "ls -l");
        AliasCommand.execute(&mut state, &args(&["ll="])).unwrap();
        assert!(state.aliases.is_empty());
    }

    #[test]
    fn test_alias_lookup_status() {
        let mut state = state_with(&[]);
        state.aliases.set("ll", "ls -l");
        assert_eq!(
            AliasCommand.execute(&mut state, &args(&["ll"])).unwrap(),
            Flow::Continue(0)
        );
        assert_eq!(
            AliasCommand.execute(&mut state, &args(&["nope"])).unwrap(),
            Flow::Continue(1)
        );
        assert_eq!(
            AliasCommand.execute(&mut state, &[]).unwrap(),
            Flow::Continue(0)
        );
    }

    #[test]
    fn test_alias_invalid() {
        let mut state = state_with(&[]);
        let err = AliasCommand
            .execute(&mut state, &args(&["=value"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
        assert!(state.aliases.is_empty());
    }
}
