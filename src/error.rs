//! Error type shared by the menu engine, the handlers and the hardware layer.
//!
//! Nothing in the library recovers from these. They bubble up to the entry
//! point, which logs them and parks the core.

use core::fmt::Display;

use embedded_io::{ErrorKind, ReadExactError, WriteFmtError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A backup register index at or past the end of the register file.
    RegisterIndex { index: usize, capacity: usize },
    /// More items appended to a menu than it was built to hold.
    MenuFull { capacity: usize },
    /// The serial transport reported a failure.
    Transport(ErrorKind),
    /// The serial transport has no more input.
    EndOfInput,
    /// A formatted write could not be rendered.
    Format,
    /// An oscillator or the system clock switch did not become ready.
    ClockConfig,
    /// The RTC wake-up timer never became writable.
    WakeupTimer,
}

impl Error {
    pub(crate) fn transport<E: embedded_io::Error>(error: E) -> Self {
        Self::Transport(error.kind())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RegisterIndex { index, capacity } => {
                write!(f, "backup register {index} out of range (capacity {capacity})")
            }
            Self::MenuFull { capacity } => write!(f, "menu full ({capacity} items)"),
            Self::Transport(kind) => write!(f, "serial transport error: {kind:?}"),
            Self::EndOfInput => write!(f, "serial transport closed"),
            Self::Format => write!(f, "formatting error"),
            Self::ClockConfig => write!(f, "clock configuration failed"),
            Self::WakeupTimer => write!(f, "rtc wake-up timer not writable"),
        }
    }
}

impl core::error::Error for Error {}

impl<E: embedded_io::Error> From<WriteFmtError<E>> for Error {
    fn from(error: WriteFmtError<E>) -> Self {
        match error {
            WriteFmtError::FmtError => Self::Format,
            WriteFmtError::Other(e) => Self::transport(e),
        }
    }
}

impl<E: embedded_io::Error> From<ReadExactError<E>> for Error {
    fn from(error: ReadExactError<E>) -> Self {
        match error {
            ReadExactError::UnexpectedEof => Self::EndOfInput,
            ReadExactError::Other(e) => Self::transport(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_exact_eof_is_end_of_input() {
        let error: Error = ReadExactError::<ErrorKind>::UnexpectedEof.into();
        assert_eq!(error, Error::EndOfInput);
    }

    #[test]
    fn transport_errors_keep_their_kind() {
        let error: Error = WriteFmtError::Other(ErrorKind::TimedOut).into();
        assert_eq!(error, Error::Transport(ErrorKind::TimedOut));
    }
}
