use thiserror::Error;

use crate::flags::FlagError;
use crate::input::InputError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Flag(#[from] FlagError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl ShellError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::Input(e) => e.exit_code(),
            ShellError::Flag(_) => 1,
            ShellError::Process(e) => e.status(),
        }
    }
}
