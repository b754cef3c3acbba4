use std::borrow::Cow;

use crate::core::{alias::AliasTable, env::EnvStore};

pub struct Substitution<'a> {
    pub aliases: &'a AliasTable,
    pub env: &'a EnvStore,
    pub last_status: i32,
    pub pid: u32,
}

impl Substitution<'_> {
    pub fn apply(&self, command: &str, delimiters: &[char]) -> String {
        let aliased = self.aliases.expand_command(command, delimiters);
        self.expand_variables(&aliased).into_owned()
    }

    pub fn expand_variables<'s>(&self, input: &'s str) -> Cow<'s, str> {
        if !input.contains('$') {
            return Cow::Borrowed(input);
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(dollar_pos) = rest.find('$') {
            result.push_str(&rest[..dollar_pos]);
            let after = &rest[dollar_pos + 1..];

            match after.chars().next() {
                Some('?') => {
                    result.push_str(&self.last_status.to_string());
                    rest = &after[1..];
                }
                Some('$') => {
                    result.push_str(&self.pid.to_string());
                    rest = &after[1..];
                }
                Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                    let var_end = after
                        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                        .unwrap_or(after.len());
                    result.push_str(self.env.get(&after[..var_end]).unwrap_or_default());
                    rest = &after[var_end..];
                }
                _ => {
                    result.push('$');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        Cow::Owned(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::tokenizer::{tokenize, DEFAULT_DELIMITERS};

    fn fixture() -> (AliasTable, EnvStore) {
        let mut aliases = AliasTable::new();
        aliases.set("ll", "ls -l");
        aliases.set("greet", "echo $USER");
        let env = EnvStore::from_pairs([("USER", "alice"), ("HOME", "/home/alice")]);
        (aliases, env)
    }

    fn expand(line: &str, last_status: i32) -> String {
        let (aliases, env) = fixture();
        let subst = Substitution {
            aliases: &aliases,
            env: &env,
            last_status,
            pid: 4242,
        };
        subst.apply(line, DEFAULT_DELIMITERS)
    }

    #[test]
    fn test_alias_then_tokenize() {
        let expanded = expand("ll /tmp", 0);
        assert_eq!(
            tokenize(&expanded, DEFAULT_DELIMITERS),
            vec!["ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn test_alias_value_sees_variables() {
        assert_eq!(expand("greet", 0), "echo alice");
    }

    #[test]
    fn test_status_and_pid() {
        assert_eq!(expand("echo $?", 2), "echo 2");
        assert_eq!(expand("echo $$", 0), "echo 4242");
        assert_eq!(expand("echo $?$?", 1), "echo 11");
    }

    #[test]
    fn test_named_variables() {
        assert_eq!(expand("cd $HOME/src", 0), "cd /home/alice/src");
        assert_eq!(expand("echo [$UNSET_VAR]", 0), "echo []");
        assert_eq!(expand("echo $USER_x", 0), "echo ");
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        assert_eq!(expand("echo $", 0), "echo $");
        assert_eq!(expand("echo $ 5 $1 $-", 0), "echo $ 5 $1 $-");
    }

    #[test]
    fn test_borrowed_without_dollar() {
        let (aliases, env) = fixture();
        let subst = Substitution {
            aliases: &aliases,
            env: &env,
            last_status: 0,
            pid: 1,
        };
        assert!(matches!(
            subst.expand_variables("plain text"),
            Cow::Borrowed(_)
        ));
    }
}
