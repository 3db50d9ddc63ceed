use std::io::{self, BufRead, ErrorKind};

/// Line and token reads over one shared buffered cursor.
///
/// Headers are read line by line, movetext token by token; both primitives
/// advance the same underlying reader so a game can be picked up exactly
/// where the previous one stopped.
pub struct PgnStream<R> {
    inner: R,
}

impl<R: BufRead> PgnStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads the rest of the current line, without its `\n` or `\r\n`
    /// terminator. Returns `None` at end of stream.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Skips whitespace, then reads up to (not including) the next whitespace
    /// byte. Returns `None` when only whitespace remains.
    pub fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            let buf = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(None);
            }

            let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let found = skip < buf.len();
            self.inner.consume(skip);
            if found {
                break;
            }
        }

        let mut token = Vec::new();
        loop {
            let buf = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                break;
            }

            let len = buf.iter().take_while(|b| !b.is_ascii_whitespace()).count();
            token.extend_from_slice(&buf[..len]);
            let complete = len < buf.len();
            self.inner.consume(len);
            if complete {
                break;
            }
        }

        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }

    /// Consumes the next line only if it is blank.
    pub fn skip_blank_line(&mut self) -> io::Result<bool> {
        let blank = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break matches!(buf.first(), Some(b'\n' | b'\r')),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if blank {
            self.read_line()?;
        }
        Ok(blank)
    }
}
