//! Status UART
//!
//! Blocking transmit-only serial link for status lines. A line is short
//! enough at 9600 baud that the thread-mode reporter can afford to wait for
//! it.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, UartTx};

use crate::config::STATUS_BAUD_RATE;

/// Serial configuration for the status link: 8N1 at the status baud rate
#[must_use]
pub fn status_config() -> usart::Config {
    let mut config = usart::Config::default();
    config.baudrate = STATUS_BAUD_RATE;
    config
}

/// Transmit half of the status link
pub struct StatusUart<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> StatusUart<'d> {
    /// Wrap a blocking transmitter
    #[must_use]
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl embedded_io::ErrorType for StatusUart<'_> {
    type Error = usart::Error;
}

impl embedded_io::Write for StatusUart<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.blocking_write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}
