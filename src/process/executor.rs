use std::fs::OpenOptions;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;

use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult};

use super::{PipeRelay, ProcessError};
use crate::parser::Frame;

/// Permissions for files created by output redirection.
const REDIRECT_FILE_MODE: u32 = 0o644;

/// Forks and execs one command frame.
///
/// All recoverable failures (redirection open, exec) happen on the child
/// side of the fork and terminate only the child; the parent's exit status
/// bookkeeping is deliberately discarded. Fork and pipe failures are
/// resource exhaustion and propagate as fatal errors.
pub struct ProcessExecutor;

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor
    }

    /// Synchronous path: fork, wire descriptors in the child, exec, and
    /// wait in the parent. The relay is reset after the wait, so no armed
    /// pipe survives past this frame.
    pub fn run(&self, frame: &Frame, relay: &mut PipeRelay) -> Result<(), ProcessError> {
        if frame.command.is_empty() {
            return Ok(());
        }

        match unsafe { unistd::fork() } {
            Err(errno) => Err(ProcessError::ForkFailed(errno)),
            Ok(ForkResult::Parent { child }) => {
                let _ = waitpid(child, None);
                relay.reset();
                Ok(())
            }
            Ok(ForkResult::Child) => self.exec_child(frame, relay),
        }
    }

    /// Pipeline writer path: arms the relay before forking and points the
    /// child's stdout at the write end. The child does not consume a
    /// previously armed pipe for its own stdin, which is why only the frame
    /// immediately after a `|` can chain; a third stage reads the second
    /// stage's output, not the first's.
    pub fn run_piped(&self, frame: &Frame, relay: &mut PipeRelay) -> Result<(), ProcessError> {
        let (read_end, write_end) = relay.arm()?;

        match unsafe { unistd::fork() } {
            Err(errno) => Err(ProcessError::ForkFailed(errno)),
            Ok(ForkResult::Parent { child }) => {
                drop(write_end);
                let _ = waitpid(child, None);
                relay.mark_armed(read_end);
                Ok(())
            }
            Ok(ForkResult::Child) => {
                let argv = match frame.argv(false) {
                    Ok(argv) => argv,
                    Err(_) => unsafe { libc::_exit(1) },
                };
                if unistd::dup2(write_end.as_raw_fd(), libc::STDOUT_FILENO).is_err() {
                    unsafe { libc::_exit(1) }
                }
                drop(write_end);
                let _ = unistd::execvp(&argv[0], &argv);
                unsafe { libc::_exit(1) }
            }
        }
    }

    /// Child side of the synchronous path; never returns.
    fn exec_child(&self, frame: &Frame, relay: &mut PipeRelay) -> ! {
        if let Some(target) = &frame.redirection_target {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(REDIRECT_FILE_MODE)
                .open(target);
            match file {
                Ok(file) => {
                    if unistd::dup2(file.as_raw_fd(), libc::STDOUT_FILENO).is_err() {
                        unsafe { libc::_exit(1) }
                    }
                    drop(file);
                }
                Err(_) => unsafe { libc::_exit(1) },
            }
        }

        let argv = match frame.argv(true) {
            Ok(argv) => argv,
            Err(_) => unsafe { libc::_exit(1) },
        };

        // This child's copy of the relay was inherited over the fork; the
        // parent resets its own copy after the wait.
        if let Some(read_end) = relay.consume_if_armed() {
            if unistd::dup2(read_end.as_raw_fd(), libc::STDIN_FILENO).is_err() {
                unsafe { libc::_exit(1) }
            }
            drop(read_end);
        }

        let _ = unistd::execvp(&argv[0], &argv);
        println!("Shell: Incorrect command");
        unsafe { libc::_exit(1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Frame, LineCursor};
    use std::fs;

    fn parse_frame(line: &str) -> Frame {
        let (frame, _) = Frame::parse(&mut LineCursor::new(line)).unwrap();
        frame
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("framesh_{}_{}", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_run_with_redirection() {
        let out = temp_path("redirect");
        let executor = ProcessExecutor::new();
        let mut relay = PipeRelay::new();

        let frame = parse_frame(&format!("echo hello > {}", out));
        executor.run(&frame, &mut relay).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn test_two_stage_pipeline() {
        let out = temp_path("pipe2");
        let executor = ProcessExecutor::new();
        let mut relay = PipeRelay::new();

        executor
            .run_piped(&parse_frame("echo over-the-relay"), &mut relay)
            .unwrap();
        assert!(relay.is_armed());

        let consumer = parse_frame(&format!("cat > {}", out));
        executor.run(&consumer, &mut relay).unwrap();

        // The consumer's stdin received exactly the writer's stdout, and
        // the relay is idle again afterwards.
        assert_eq!(fs::read_to_string(&out).unwrap(), "over-the-relay\n");
        assert!(!relay.is_armed());
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn test_three_stage_pipeline_stops_at_two() {
        let out = temp_path("pipe3");
        let executor = ProcessExecutor::new();
        let mut relay = PipeRelay::new();

        // a | b | c: the second writer never reads the first pipe, so the
        // third stage sees only the second stage's output. This is the
        // documented single-slot limitation, not an accident.
        executor
            .run_piped(&parse_frame("echo alpha"), &mut relay)
            .unwrap();
        executor
            .run_piped(&parse_frame("echo beta"), &mut relay)
            .unwrap();

        let tail = parse_frame(&format!("cat > {}", out));
        executor.run(&tail, &mut relay).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content, "beta\n");
        assert!(!content.contains("alpha"));
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn test_empty_command_is_a_no_op() {
        let executor = ProcessExecutor::new();
        let mut relay = PipeRelay::new();
        let frame = Frame::default();
        executor.run(&frame, &mut relay).unwrap();
    }
}
