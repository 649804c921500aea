//! Serial console helpers.

use embedded_io::{ErrorType, Read, Write};

/// Terminal-style echo: every byte read is written straight back so the
/// operator sees the key they pressed.
pub struct Echo<T> {
    inner: T,
}

impl<T> Echo<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: ErrorType> ErrorType for Echo<T> {
    type Error = T::Error;
}

impl<T: Read + Write> Read for Echo<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.inner.write_all(&buf[..n])?;
        }
        Ok(n)
    }
}

impl<T: Write> Write for Echo<T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedConsole;

    #[test]
    fn received_bytes_are_echoed() {
        let mut console = Echo::new(ScriptedConsole::new("42"));
        let mut byte = [0u8; 1];
        console.read_exact(&mut byte).unwrap();
        assert_eq!(byte, *b"4");
        console.write_all(b"ok").unwrap();
        assert_eq!(console.into_inner().output(), "4ok");
    }

    #[test]
    fn nothing_is_echoed_at_end_of_input() {
        let mut console = Echo::new(ScriptedConsole::new(""));
        let mut byte = [0u8; 1];
        assert_eq!(console.read(&mut byte), Ok(0));
        assert_eq!(console.into_inner().output(), "");
    }
}
