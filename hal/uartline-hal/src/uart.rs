//! UART serial communication abstractions
//!
//! The receive side is modelled on an interrupt-driven FIFO: the caller
//! drains whatever the hardware has buffered and never waits for more.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Copy bytes already sitting in the receive FIFO into `buf`
    ///
    /// Never waits for the line. Returns `Ok(0)` once the FIFO is empty.
    fn read_fifo(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the FIFO, if one is available
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.read_fifo(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// UART line settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(115_200)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// FIFO stub that hands out a fixed byte string in small bursts
    struct BurstFifo {
        data: &'static [u8],
        pos: usize,
        burst: usize,
    }

    impl UartRx for BurstFifo {
        type Error = ();

        fn read_fifo(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let remaining = &self.data[self.pos..];
            let n = remaining.len().min(buf.len()).min(self.burst);
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_try_read_byte_drains_fifo() {
        let mut fifo = BurstFifo {
            data: b"ok",
            pos: 0,
            burst: 4,
        };

        assert_eq!(fifo.try_read_byte(), Ok(Some(b'o')));
        assert_eq!(fifo.try_read_byte(), Ok(Some(b'k')));
        assert_eq!(fifo.try_read_byte(), Ok(None));
    }

    #[test]
    fn test_default_config_is_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
