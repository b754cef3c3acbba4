use std::io::{self, Write};
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use super::ProcessError;

#[derive(Clone, Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn run(
        &self,
        path: &Path,
        argv: &[String],
        env: &[(String, String)],
    ) -> Result<i32, ProcessError> {
        let mut command = Command::new(path);
        if let Some((name, args)) = argv.split_first() {
            command.arg0(name).args(args);
        }
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(env.iter().map(|(key, value)| (key, value)));

        // builtin output written so far must land before the child's
        flush_pending(&mut io::stdout());

        let mut child = command.spawn().map_err(spawn_error)?;
        debug!(pid = child.id(), path = %path.display(), "spawned");

        let status = child.wait().map_err(ProcessError::Wait)?;
        let code = exit_code(status);
        debug!(code, "child exited");
        Ok(code)
    }
}

pub fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

fn flush_pending(out: &mut impl Write) {
    if let Err(e) = out.flush() {
        warn!(error = %e, "stdout flush failed before spawn");
    }
}

fn spawn_error(err: io::Error) -> ProcessError {
    match err.kind() {
        io::ErrorKind::NotFound => ProcessError::Exec {
            status: 127,
            source: err,
        },
        io::ErrorKind::PermissionDenied => ProcessError::Exec {
            status: 126,
            source: err,
        },
        _ if err.raw_os_error() == Some(libc::ENOEXEC) => ProcessError::Exec {
            status: 126,
            source: err,
        },
        _ => ProcessError::Spawn(err),
    }
}
