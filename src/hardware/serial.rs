//! Blocking USART2 console.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Uart};
use embedded_io::{ErrorKind, ErrorType, Read, Write};

pub struct SerialPort {
    uart: Uart<'static, Blocking>,
}

impl SerialPort {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self { uart }
    }
}

impl ErrorType for SerialPort {
    type Error = ErrorKind;
}

impl Read for SerialPort {
    /// Blocks for exactly one byte.
    ///
    /// An overrun only means keystrokes were lost while the menu was
    /// printing, so the read is retried.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let Some(byte) = buf.first_mut() else {
            return Ok(0);
        };
        loop {
            match self.uart.blocking_read(core::slice::from_mut(byte)) {
                Ok(()) => return Ok(1),
                Err(usart::Error::Overrun) => warn!("usart overrun"),
                Err(e) => {
                    error!("usart read failed: {}", e);
                    return Err(ErrorKind::Other);
                }
            }
        }
    }
}

impl Write for SerialPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.uart.blocking_write(buf).map_err(|e| {
            error!("usart write failed: {}", e);
            ErrorKind::Other
        })?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.uart.blocking_flush().map_err(|_| ErrorKind::Other)
    }
}
