use crate::process::ProcessError;

use libc::{signal, sighandler_t, SIGTSTP};

pub extern "C" fn handle_sigtstp(_: i32) {
    // Keep the interpreter running; the child owns the terminal during a
    // synchronous wait and handles the signal itself.
}

pub fn setup_signal_handlers() -> Result<(), ProcessError> {
    unsafe {
        signal(SIGTSTP, handle_sigtstp as sighandler_t);
    }
    Ok(())
}
