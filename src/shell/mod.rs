use std::env;

use rustyline::{config::Configurer, DefaultEditor};

mod builtins;
mod engine;

pub use engine::{DirectiveEngine, LineOutcome};

use crate::{error::ShellError, flags::Flags, highlight::MessageHighlighter, process::signal};

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) engine: DirectiveEngine,
    pub(crate) highlighter: MessageHighlighter,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;
        editor.set_auto_add_history(true);

        // Interrupt and stop signals never take the interpreter down; a
        // synchronously running child still receives them.
        signal::setup_signal_handlers()?;
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            engine: DirectiveEngine::new(),
            highlighter: MessageHighlighter::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        loop {
            let prompt = self.prompt()?;
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    match self.engine.run_line(line) {
                        Ok(LineOutcome::Continue) => {}
                        Ok(LineOutcome::Exit) => break,
                        // Fork or pipe creation failed: resource
                        // exhaustion, no recovery path.
                        Err(e) => {
                            eprintln!("{}", self.highlighter.highlight_error(&e.to_string()));
                            return Err(e.into());
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("{}", self.highlighter.highlight_error(&e.to_string()));
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    fn prompt(&self) -> Result<String, ShellError> {
        let cwd = env::current_dir()?.to_string_lossy().into_owned();
        Ok(format!("{}$ ", cwd))
    }

    fn print_banner(&self) {
        let art = [
            r"   __                               _     ",
            r"  / _|_ __ __ _ _ __ ___   ___  ___| |__  ",
            r" | |_| '__/ _` | '_ ` _ \ / _ \/ __| '_ \ ",
            r" |  _| | | (_| | | | | | |  __/\__ \ | | |",
            r" |_| |_|  \__,_|_| |_| |_|\___||___/_| |_|",
        ];
        println!();
        for line in art {
            println!("{}", self.highlighter.highlight_banner(line));
        }
        println!("\n framesh {}\n", env!("CARGO_PKG_VERSION"));
    }
}
