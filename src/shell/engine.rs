use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult, Pid};

use super::builtins::{self, CMD_CD, CMD_EXIT};
use crate::parser::{Directive, Frame, LineCursor};
use crate::process::{PipeRelay, ProcessError, ProcessExecutor};

/// What the caller should do after one line has been processed.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// Drives one input line: parses frames off the cursor one at a time and
/// dispatches each according to its directive until the line is exhausted
/// or a parse failure abandons it.
pub struct DirectiveEngine {
    executor: ProcessExecutor,
    relay: PipeRelay,
}

impl Default for DirectiveEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveEngine {
    pub fn new() -> Self {
        DirectiveEngine {
            executor: ProcessExecutor::new(),
            relay: PipeRelay::new(),
        }
    }

    pub fn run_line(&mut self, line: &str) -> Result<LineOutcome, ProcessError> {
        let mut cursor = LineCursor::new(line);
        let mut pending: Vec<Pid> = Vec::new();
        let mut directive = Directive::Init;

        while directive != Directive::Terminated && directive != Directive::Exception {
            match Frame::parse(&mut cursor) {
                Err(e) => {
                    eprintln!("framesh: {}", e);
                    directive = Directive::Exception;
                }
                Ok((frame, parsed)) => {
                    directive = parsed;
                    if frame.command == CMD_CD {
                        builtins::change_directory(&frame);
                    } else if frame.command == CMD_EXIT {
                        println!("Exiting shell...");
                        Self::reap(&mut pending);
                        return Ok(LineOutcome::Exit);
                    } else {
                        self.dispatch(&frame, directive, &mut pending)?;
                    }
                }
            }
        }

        // Parallel frames were started without waiting; drain them all
        // before the next line is read.
        Self::reap(&mut pending);
        Ok(LineOutcome::Continue)
    }

    fn dispatch(
        &mut self,
        frame: &Frame,
        directive: Directive,
        pending: &mut Vec<Pid>,
    ) -> Result<(), ProcessError> {
        match directive {
            Directive::Parallel => match unsafe { unistd::fork() } {
                Ok(ForkResult::Child) => {
                    let _ = self.executor.run(frame, &mut self.relay);
                    unsafe { libc::_exit(0) }
                }
                Ok(ForkResult::Parent { child }) => {
                    pending.push(child);
                    Ok(())
                }
                Err(errno) => Err(ProcessError::ForkFailed(errno)),
            },
            Directive::Pipeline => self.executor.run_piped(frame, &mut self.relay),
            _ => self.executor.run(frame, &mut self.relay),
        }
    }

    fn reap(pending: &mut Vec<Pid>) {
        for pid in pending.drain(..) {
            let _ = waitpid(pid, None);
        }
    }
}
