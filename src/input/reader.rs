use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};
use thiserror::Error;
use tracing::{debug, warn};

use super::helper::LineHelper;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("0: Can't open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("read error: {0}")]
    Read(#[from] io::Error),
    #[error("line editor: {0}")]
    Editor(#[from] ReadlineError),
}

impl InputError {
    pub fn exit_code(&self) -> i32 {
        match self {
            InputError::Open { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            InputError::Read(_) | InputError::Editor(_) => 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

pub enum LineReader {
    Interactive(Box<Editor<LineHelper, FileHistory>>),
    Script(Box<dyn BufRead>),
}

impl LineReader {
    pub fn interactive(helper: LineHelper) -> Result<Self, InputError> {
        let mut editor = Editor::<LineHelper, FileHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(false);
        Ok(LineReader::Interactive(Box::new(editor)))
    }

    pub fn script(reader: impl BufRead + 'static) -> Self {
        LineReader::Script(Box::new(reader))
    }

    pub fn open_script(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "reading script");
        Ok(Self::script(BufReader::new(file)))
    }

    pub fn stdin() -> Self {
        Self::script(BufReader::new(io::stdin()))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, LineReader::Interactive(_))
    }

    pub fn helper_mut(&mut self) -> Option<&mut LineHelper> {
        match self {
            LineReader::Interactive(editor) => editor.helper_mut(),
            LineReader::Script(_) => None,
        }
    }

    pub fn remember<S: AsRef<str>>(&mut self, line: S) {
        if let LineReader::Interactive(editor) = self {
            if let Err(e) = editor.add_history_entry(line.as_ref()) {
                warn!(error = %e, "could not add line to editor history");
            }
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, InputError> {
        match self {
            LineReader::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            LineReader::Script(reader) => read_raw_line(reader.as_mut()),
        }
    }
}

fn read_raw_line(reader: &mut dyn BufRead) -> Result<ReadOutcome, InputError> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(ReadOutcome::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_script_lines() {
        let mut reader = LineReader::script(Cursor::new(b"echo a\r\n\nlast".to_vec()));
        assert!(!reader.is_interactive());
        assert_eq!(
            reader.read_line("$ ").unwrap(),
            ReadOutcome::Line("echo a".to_string())
        );
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Line(String::new()));
        assert_eq!(
            reader.read_line("$ ").unwrap(),
            ReadOutcome::Line("last".to_string())
        );
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_script_invalid_utf8_is_lossy() {
        let mut reader = LineReader::script(Cursor::new(vec![b'a', 0xff, b'b', b'\n']));
        assert_eq!(
            reader.read_line("").unwrap(),
            ReadOutcome::Line("a\u{fffd}b".to_string())
        );
    }

    #[test]
    fn test_open_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.sh");
        let err = match LineReader::open_script(&missing) {
            Err(e) => e,
            Ok(_) => panic!("missing script opened"),
        };
        assert_eq!(err.exit_code(), 127);
        assert_eq!(
            err.to_string(),
            format!("0: Can't open {}", missing.display())
        );
    }
}
