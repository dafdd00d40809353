use super::ParseError;

/// Forward-only cursor over one input line.
///
/// The safe rendition of tokenizing with `strsep`: the line is owned by the
/// cursor and tokens are slices bounded by a start offset that only ever
/// advances. Each token is produced exactly once and the cursor never
/// rewinds. Callers copy a token to an owned string before asking for the
/// next one; the borrow checker enforces that.
pub struct LineCursor {
    buf: String,
    pos: usize,
}

impl LineCursor {
    /// The line is expected to be pre-trimmed by the caller; delimiter
    /// collapsing is not done here.
    pub fn new(line: &str) -> Self {
        LineCursor {
            buf: line.to_string(),
            pos: 0,
        }
    }

    /// Returns the next space-delimited token and advances past it.
    pub fn next_token(&mut self) -> Result<&str, ParseError> {
        if self.pos >= self.buf.len() {
            return Err(ParseError::NoToken);
        }
        let rest = &self.buf[self.pos..];
        match rest.find(' ') {
            Some(sep) => {
                let token = &rest[..sep];
                self.pos += sep + 1;
                Ok(token)
            }
            None => {
                let token = rest;
                self.pos = self.buf.len();
                Ok(token)
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn remainder(&self) -> &str {
        &self.buf[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_in_order() {
        let mut cursor = LineCursor::new("echo hi there");
        assert_eq!(cursor.next_token().unwrap(), "echo");
        assert_eq!(cursor.next_token().unwrap(), "hi");
        assert_eq!(cursor.next_token().unwrap(), "there");
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next_token(), Err(ParseError::NoToken));
    }

    #[test]
    fn test_empty_line() {
        let mut cursor = LineCursor::new("");
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next_token(), Err(ParseError::NoToken));
    }

    #[test]
    fn test_remainder_tracks_consumption() {
        let mut cursor = LineCursor::new("ls -l ## pwd");
        assert_eq!(cursor.next_token().unwrap(), "ls");
        assert_eq!(cursor.remainder(), "-l ## pwd");
        assert_eq!(cursor.next_token().unwrap(), "-l");
        assert_eq!(cursor.next_token().unwrap(), "##");
        assert_eq!(cursor.remainder(), "pwd");
    }

    #[test]
    fn test_single_token_line() {
        let mut cursor = LineCursor::new("pwd");
        assert_eq!(cursor.next_token().unwrap(), "pwd");
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_consecutive_delimiters_yield_empty_token() {
        // Collapsing is the trimming collaborator's job; the cursor itself
        // surfaces what is there, like strsep does.
        let mut cursor = LineCursor::new("a  b");
        assert_eq!(cursor.next_token().unwrap(), "a");
        assert_eq!(cursor.next_token().unwrap(), "");
        assert_eq!(cursor.next_token().unwrap(), "b");
    }
}
