mod cursor;
mod frame;

pub use cursor::LineCursor;
pub use frame::Frame;

/// Operators recognized as distinct tokens between command frames.
pub const OP_PARALLEL: &str = "&&";
pub const OP_SEQUENTIAL: &str = "##";
pub const OP_PIPELINE: &str = "|";
pub const OP_REDIRECTION: &str = ">";

/// How the frame that was just parsed relates to the next one on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Pre-parse sentinel; never observed after a parse.
    Init,
    /// Run the frame without waiting and parse the next one immediately.
    Parallel,
    /// Run the frame, wait for it, then parse the next one.
    Sequential,
    /// Last frame on the line.
    Terminated,
    /// Run the frame with its stdout feeding the next frame's stdin.
    Pipeline,
    /// Parse failure; the rest of the line is abandoned.
    Exception,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    NoToken,
    EmptyFrame,
    NulByte,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::NoToken => write!(f, "no tokens left on the line"),
            ParseError::EmptyFrame => write!(f, "empty command frame"),
            ParseError::NulByte => write!(f, "NUL byte in token"),
        }
    }
}

impl std::error::Error for ParseError {}
