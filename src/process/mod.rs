use std::fmt;

pub mod executor;
pub mod relay;
pub mod signal;

pub use executor::ProcessExecutor;
pub use relay::PipeRelay;

/// Errors from the fork/exec layer. Both variants mean resource exhaustion
/// and are fatal to the interpreter; everything recoverable (exec failure,
/// redirection open failure) is reported and handled inside the forked
/// child instead.
#[derive(Debug)]
pub enum ProcessError {
    ForkFailed(nix::errno::Errno),
    PipeFailed(nix::errno::Errno),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::ForkFailed(errno) => write!(f, "fork failed: {}", errno),
            ProcessError::PipeFailed(errno) => write!(f, "pipe creation failed: {}", errno),
        }
    }
}

impl std::error::Error for ProcessError {}
