use std::os::fd::OwnedFd;

use nix::unistd;

use super::ProcessError;

/// Single-slot carrier for one pipeline stage's output.
///
/// Lifecycle: idle -> armed (read end stored after the writer has been
/// waited on and the write end closed) -> consumed (the next frame takes
/// the read end for its stdin) -> idle. At most one armed pipe exists at a
/// time, which is why a pipeline does not propagate past two stages.
///
/// The read end is held as an `OwnedFd`, so resetting or dropping the relay
/// closes it exactly once.
pub struct PipeRelay {
    read_end: Option<OwnedFd>,
    armed: bool,
}

impl Default for PipeRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeRelay {
    pub fn new() -> Self {
        PipeRelay {
            read_end: None,
            armed: false,
        }
    }

    /// Opens a fresh anonymous pipe for the next stage. Any stale slot is
    /// released first so the old read end cannot leak.
    pub fn arm(&mut self) -> Result<(OwnedFd, OwnedFd), ProcessError> {
        self.reset();
        unistd::pipe().map_err(ProcessError::PipeFailed)
    }

    /// Stores the read end once the writer stage has completed.
    pub fn mark_armed(&mut self, read_end: OwnedFd) {
        self.read_end = Some(read_end);
        self.armed = true;
    }

    /// Hands the stored read end to the caller and goes idle. The caller
    /// owns the descriptor from here and is expected to dup2 it onto stdin
    /// and drop it.
    pub fn consume_if_armed(&mut self) -> Option<OwnedFd> {
        if self.armed {
            self.armed = false;
            self.read_end.take()
        } else {
            None
        }
    }

    /// Idempotent; closes any held end and clears the armed flag.
    pub fn reset(&mut self) {
        self.armed = false;
        self.read_end = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
