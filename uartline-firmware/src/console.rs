//! Console UART glue
//!
//! Maps the HAL line settings onto embassy-rp and adapts the buffered
//! transmitter to [`UartTx`] for the echo helpers.

use embassy_rp::uart::{self, BufferedUartTx};
use embedded_io::Write;
use uartline_hal::{DataBits, Parity, StopBits, UartConfig, UartTx};

/// Translate HAL line settings into an embassy-rp UART config
pub fn rp_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

/// Buffered console transmitter with blocking writes
pub struct ConsoleTx {
    tx: BufferedUartTx,
}

impl ConsoleTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for ConsoleTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.tx)
    }
}
