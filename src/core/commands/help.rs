use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

const TOPICS: &[(&str, &str, &str)] = &[
    ("alias", "alias [name[=value] ...]", "Define or print aliases."),
    ("cd", "cd [DIR | -]", "Change the working directory (HOME by default, - for OLDPWD)."),
    ("env", "env", "Print the environment."),
    ("exit", "exit [n]", "Leave the shell with status n, or the last status."),
    ("help", "help [builtin]", "Show help for builtins."),
    ("history", "history", "List previous commands with their numbers."),
    ("setenv", "setenv VARIABLE VALUE", "Create or overwrite an environment variable."),
    ("unsetenv", "unsetenv VARIABLE...", "Remove environment variables."),
];

#[derive(Clone, Debug, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _state: &mut ShellState, args: &[String]) -> Result<Flow, CommandError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", render(args.first().map(String::as_str)))?;
        Ok(Flow::Continue(0))
    }
}

fn render(topic: Option<&str>) -> String {
    let entry = topic.and_then(|name| TOPICS.iter().find(|(n, _, _)| *n == name));
    match (topic, entry) {
        (_, Some((_, usage, summary))) => format!("{}\n    {}", usage, summary),
        (Some(name), None) => format!("help: no help topics match '{}'", name),
        (None, None) => {
            let mut text = String::from(
                "Builtins (commands are chained with ';', '&&' and '||'):\n",
            );
            for (_, usage, summary) in TOPICS {
                text.push_str(&format!("  {:<26}{}\n", usage, summary));
            }
            text.trim_end().to_string()
        }
    }
}
