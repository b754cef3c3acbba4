use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(&self, state: &mut ShellState, _args: &[String]) -> Result<Flow, CommandError> {
        let mut out = io::stdout().lock();
        for (name, value) in state.env.iter() {
            writeln!(out, "{}={}", name, value)?;
        }
        Ok(Flow::Continue(0))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SetenvCommand;

impl Command for SetenvCommand {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::Usage("setenv VARIABLE VALUE"));
        };
        state.env.set(name, value)?;
        Ok(Flow::Continue(0))
    }
}

#[derive(Clone, Debug, Default)]
pub struct UnsetenvCommand;

impl Command for UnsetenvCommand {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage("unsetenv VARIABLE..."));
        }
        for name in args {
            state.env.unset(name);
        }
        Ok(Flow::Continue(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::{args, state_with};

    #[test]
    fn test_setenv() {
        let mut state = state_with(&[("KEEP", "1")]);
        let flow = SetenvCommand
            .execute(&mut state, &args(&["NEW_VAR", "value"]))
            .unwrap();
        assert_eq!(flow, Flow::Continue(0));
        assert_eq!(state.env.get("NEW_VAR"), Some("value"));

        SetenvCommand
            .execute(&mut state, &args(&["NEW_VAR", "other"]))
            .unwrap();
        assert_eq!(state.env.get("NEW_VAR"), Some("other"));
        assert_eq!(state.env.len(), 2);
    }

    #[test]
    fn test_setenv_wrong_count_leaves_store() {
        let mut state = state_with(&[("KEEP", "1")]);
        for bad in [&[][..], &["ONLY"][..], &["A", "B", "C"][..]] {
            let err = SetenvCommand.execute(&mut state, &args(bad)).unwrap_err();
            assert!(matches!(err, CommandError::Usage(_)));
            assert_eq!(err.status(), 1);
        }
        assert_eq!(state.env.len(), 1);
    }

    #[test]
    fn test_setenv_rejects_bad_name() {
        let mut state = state_with(&[]);
        let err = SetenvCommand
            .execute(&mut state, &args(&["A=B", "x"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::Env(_)));
        assert!(state.env.is_empty());
    }

    #[test]
    fn test_unsetenv() {
        let mut state = state_with(&[("A", "1"), ("B", "2"), ("C", "3")]);
        UnsetenvCommand
            .execute(&mut state, &args(&["A", "C", "MISSING"]))
            .unwrap();
        let names: Vec<&str> = state.env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["B"]);

        let err = UnsetenvCommand.execute(&mut state, &[]).unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
        assert_eq!(state.env.len(), 1);
    }

    #[test]
    fn test_env_prints() {
        let mut state = state_with(&[("A", "1")]);
        assert_eq!(
            EnvCommand.execute(&mut state, &[]).unwrap(),
            Flow::Continue(0)
        );
    }
}
