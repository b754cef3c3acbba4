use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::process::ProcessError;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER: OnceLock<Result<(), String>> = OnceLock::new();

/// Keeps SIGINT from killing the shell itself.
///
/// A foreground child still receives the signal with its default action,
/// since handlers do not survive exec. Installing twice is a no-op.
pub fn setup_signal_handlers() -> Result<(), ProcessError> {
    HANDLER
        .get_or_init(|| {
            ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
                .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(ProcessError::Signal)
}

pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_interrupt_clears_flag() {
        INTERRUPTED.store(true, Ordering::SeqCst);
        assert!(take_interrupt());
        assert!(!take_interrupt());
    }
}
