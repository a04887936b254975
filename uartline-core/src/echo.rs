//! Echo consumer helpers
//!
//! The consumer loop itself belongs to the application; these helpers
//! format what it writes back to the console.

use uartline_hal::UartTx;

use crate::message::Message;

/// Greeting printed once the receive path is up
pub const BANNER: &[&[u8]] = &[
    b"Hello! I'm your echo bot.\r\n",
    b"Tell me something and press enter:\r\n",
];

/// Prefix of every echoed line
pub const ECHO_PREFIX: &[u8] = b"Echo: ";

/// Line ending appended to every echoed line
pub const LINE_END: &[u8] = b"\r\n";

/// Write the greeting
pub fn write_banner<T: UartTx>(tx: &mut T) -> Result<(), T::Error> {
    for line in BANNER {
        tx.write_blocking(line)?;
    }
    tx.flush()
}

/// Write `Echo: <message>\r\n`
pub fn write_echo<T: UartTx, const N: usize>(
    tx: &mut T,
    msg: &Message<N>,
) -> Result<(), T::Error> {
    tx.write_blocking(ECHO_PREFIX)?;
    tx.write_blocking(msg.as_bytes())?;
    tx.write_blocking(LINE_END)?;
    tx.flush()
}
