pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{}", exec_message(.status))]
    Exec {
        status: i32,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot fork: {0}")]
    Spawn(std::io::Error),
    #[error("wait failed: {0}")]
    Wait(std::io::Error),
    #[error("signal handler error: {0}")]
    Signal(String),
}

fn exec_message(status: &i32) -> &'static str {
    match status {
        127 => "command not found",
        _ => "Permission denied",
    }
}

impl ProcessError {
    pub fn status(&self) -> i32 {
        match self {
            ProcessError::Exec { status, .. } => *status,
            ProcessError::Spawn(_) | ProcessError::Wait(_) | ProcessError::Signal(_) => 1,
        }
    }
}
