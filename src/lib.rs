pub mod error;
pub mod flags;
pub mod shell;

pub mod highlight;
pub mod parser;
pub mod process;
