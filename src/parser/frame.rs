use std::ffi::CString;

use super::{
    Directive, LineCursor, ParseError, OP_PARALLEL, OP_PIPELINE, OP_REDIRECTION, OP_SEQUENTIAL,
};

/// One parsed unit of work: a command, its tokens, and an optional output
/// redirection target.
///
/// Options (tokens starting with `-`) are kept in a separate bucket from
/// positional arguments and re-merged, options first, when argv is built.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub command: String,
    pub options: Vec<String>,
    pub arguments: Vec<String>,
    pub redirection_target: Option<String>,
}

impl Frame {
    /// Consumes tokens from the cursor until a control operator or the end
    /// of the line, returning the completed frame and the directive that
    /// terminated it. Tokens past a control operator stay in the cursor for
    /// the next call.
    pub fn parse(cursor: &mut LineCursor) -> Result<(Frame, Directive), ParseError> {
        let command = match cursor.next_token() {
            Ok(token) => token.to_string(),
            Err(ParseError::NoToken) => return Err(ParseError::EmptyFrame),
            Err(e) => return Err(e),
        };
        if command.is_empty() {
            return Err(ParseError::EmptyFrame);
        }

        let mut frame = Frame {
            command,
            ..Frame::default()
        };

        loop {
            let token = match cursor.next_token() {
                Ok(token) => token.to_string(),
                Err(ParseError::NoToken) => break,
                Err(e) => return Err(e),
            };

            match token.as_str() {
                OP_PARALLEL => return Ok((frame, Directive::Parallel)),
                OP_SEQUENTIAL => return Ok((frame, Directive::Sequential)),
                OP_PIPELINE => return Ok((frame, Directive::Pipeline)),
                OP_REDIRECTION => {
                    // The marker itself is stored; argv building stops at it.
                    frame.arguments.push(token);
                    if let Ok(target) = cursor.next_token() {
                        frame.redirection_target = Some(target.to_string());
                    }
                }
                _ if token.starts_with('-') => frame.options.push(token),
                _ => frame.arguments.push(token),
            }
        }

        frame.split_embedded_redirection();
        Ok((frame, Directive::Terminated))
    }

    /// Handles `cmd>file` written without spaces: the command token is split
    /// at the first `>` and the suffix, if non-empty, becomes the
    /// redirection target. Only reached when the line ends without a control
    /// operator.
    fn split_embedded_redirection(&mut self) {
        if let Some(pos) = self.command.find('>') {
            let target = self.command[pos + 1..].to_string();
            self.command.truncate(pos);
            if !target.is_empty() {
                self.redirection_target = Some(target);
            }
        }
    }

    /// Builds argv as command, options in order, then positional arguments
    /// in order. With `stop_at_redirection` the argument list ends at the
    /// stored `>` marker, which is how the synchronous executor runs; the
    /// pipeline writer passes everything through.
    pub fn argv(&self, stop_at_redirection: bool) -> Result<Vec<CString>, ParseError> {
        let mut argv = Vec::with_capacity(1 + self.options.len() + self.arguments.len());
        argv.push(CString::new(self.command.as_str()).map_err(|_| ParseError::NulByte)?);
        for option in &self.options {
            argv.push(CString::new(option.as_str()).map_err(|_| ParseError::NulByte)?);
        }
        for argument in &self.arguments {
            if stop_at_redirection && argument == OP_REDIRECTION {
                break;
            }
            argv.push(CString::new(argument.as_str()).map_err(|_| ParseError::NulByte)?);
        }
        Ok(argv)
    }
}
