use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    None,
    And,
    Or,
    Sequence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCommand<'a> {
    pub text: Cow<'a, str>,
    pub terminator: ChainOp,
}

impl SubCommand<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Walks a line one sub-command at a time.
///
/// A cursor into the line marks the unconsumed rest; each step borrows the
/// next slice unless a backslash escape forces a copy.
pub struct ChainSplitter<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> ChainSplitter<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, cursor: 0 }
    }
}

impl<'a> Iterator for ChainSplitter<'a> {
    type Item = SubCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.line.len() {
            return None;
        }

        let start = self.cursor;
        let bytes = self.line.as_bytes();
        let mut owned: Option<String> = None;
        let mut segment_start = start;
        let mut i = start;

        while i < bytes.len() {
            let (op, width) = match bytes[i] {
                b'\\' if matches!(bytes.get(i + 1), Some(b';' | b'&' | b'|')) => {
                    let buf = owned.get_or_insert_with(String::new);
                    buf.push_str(&self.line[segment_start..i]);
                    buf.push(bytes[i + 1] as char);
                    i += 2;
                    segment_start = i;
                    continue;
                }
                b';' => (ChainOp::Sequence, 1),
                b'&' if bytes.get(i + 1) == Some(&b'&') => (ChainOp::And, 2),
                b'|' if bytes.get(i + 1) == Some(&b'|') => (ChainOp::Or, 2),
                _ => {
                    i += 1;
                    continue;
                }
            };

            self.cursor = i + width;
            return Some(SubCommand {
                text: finish(owned, &self.line[segment_start..i], &self.line[start..i]),
                terminator: op,
            });
        }

        self.cursor = self.line.len();
        Some(SubCommand {
            text: finish(owned, &self.line[segment_start..], &self.line[start..]),
            terminator: ChainOp::None,
        })
    }
}

fn finish<'a>(owned: Option<String>, tail: &str, whole: &'a str) -> Cow<'a, str> {
    match owned {
        Some(mut buf) => {
            buf.push_str(tail);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(whole),
    }
}

pub fn should_run(previous: ChainOp, last_status: i32) -> bool {
    match previous {
        ChainOp::And => last_status == 0,
        ChainOp::Or => last_status != 0,
        ChainOp::Sequence | ChainOp::None => true,
    }
}

/// Cuts the line at a `#` that starts it or follows a blank.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || matches!(bytes[i - 1], b' ' | b'\t')) {
            return &line[..i];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<(String, ChainOp)> {
        ChainSplitter::new(line)
            .map(|sub| (sub.text.into_owned(), sub.terminator))
            .collect()
    }

    #[test]
    fn test_single_command() {
        assert_eq!(split("ls -l"), vec![("ls -l".to_string(), ChainOp::None)]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            split("a; b && c || d"),
            vec![
                ("a".to_string(), ChainOp::Sequence),
                (" b ".to_string(), ChainOp::And),
                (" c ".to_string(), ChainOp::Or),
                (" d".to_string(), ChainOp::None),
            ]
        );
    }

    #[test]
    fn test_empty_subcommands() {
        let parts = split(";;a;");
        assert_eq!(
            parts,
            vec![
                (String::new(), ChainOp::Sequence),
                (String::new(), ChainOp::Sequence),
                ("a".to_string(), ChainOp::Sequence),
            ]
        );
        assert!(split("").is_empty());
    }

    #[test]
    fn test_dangling_operator_dropped() {
        assert_eq!(
            split("echo a &&"),
            vec![("echo a ".to_string(), ChainOp::And)]
        );
    }

    #[test]
    fn test_single_ampersand_and_pipe_are_literal() {
        assert_eq!(
            split("echo a & b | c"),
            vec![("echo a & b | c".to_string(), ChainOp::None)]
        );
    }

    #[test]
    fn test_escaped_operators() {
        let parts = split(r"echo a\;b \&\& c; d");
        assert_eq!(
            parts,
            vec![
                ("echo a;b && c".to_string(), ChainOp::Sequence),
                (" d".to_string(), ChainOp::None),
            ]
        );
    }

    #[test]
    fn test_unescaped_slice_is_borrowed() {
        let mut splitter = ChainSplitter::new("a;b");
        let first = splitter.next().unwrap();
        assert!(matches!(first.text, Cow::Borrowed("a")));
        let second = splitter.next().unwrap();
        assert!(matches!(second.text, Cow::Borrowed("b")));
        assert_eq!(second.terminator, ChainOp::None);
        assert!(splitter.next().is_none());
    }

    #[test]
    fn test_should_run() {
        assert!(should_run(ChainOp::Sequence, 1));
        assert!(should_run(ChainOp::None, 1));
        assert!(should_run(ChainOp::And, 0));
        assert!(!should_run(ChainOp::And, 2));
        assert!(should_run(ChainOp::Or, 127));
        assert!(!should_run(ChainOp::Or, 0));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("# all comment"), "");
        assert_eq!(strip_comment("echo a # trailing"), "echo a ");
        assert_eq!(strip_comment("echo a#b"), "echo a#b");
        assert_eq!(strip_comment("echo\t#x"), "echo\t");
    }
}
