//! Framer configuration
//!
//! Message size and queue depth are const generics on [`crate::Framer`];
//! everything else lives in [`FramerConfig`], which is `const` so a firmware
//! image can bake it into a `static`.

use core::fmt;

/// Default idle period before a partial line is flushed
pub const DEFAULT_IDLE_PERIOD_MS: u32 = 1000;

/// Default terminator set
pub const DEFAULT_TERMINATORS: &[u8] = b"\n\r";

/// Maximum number of distinct terminator bytes
pub const MAX_TERMINATORS: usize = 4;

/// Reference message size (payload is one byte less)
pub const DEFAULT_MSG_SIZE: usize = 32;

/// Smallest usable message size: one payload byte plus the terminator slot
pub const MIN_MSG_SIZE: usize = 2;

/// Reference queue depth
pub const DEFAULT_QUEUE_DEPTH: usize = 10;

/// Errors reported when validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Idle period of zero would flush after every byte
    ZeroIdlePeriod,
    /// At least one terminator byte is required
    NoTerminators,
    /// More than [`MAX_TERMINATORS`] terminator bytes
    TooManyTerminators,
    /// The same terminator byte is listed twice
    DuplicateTerminator,
    /// Message size must leave room for at least one payload byte
    MessageSizeTooSmall,
    /// Queue must hold at least one message
    ZeroQueueDepth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIdlePeriod => f.write_str("idle period must be at least 1 ms"),
            Self::NoTerminators => f.write_str("at least one terminator byte is required"),
            Self::TooManyTerminators => {
                write!(f, "at most {} terminator bytes are allowed", MAX_TERMINATORS)
            }
            Self::DuplicateTerminator => f.write_str("terminator bytes must be distinct"),
            Self::MessageSizeTooSmall => {
                write!(f, "message size must be at least {} bytes", MIN_MSG_SIZE)
            }
            Self::ZeroQueueDepth => f.write_str("queue depth must be at least 1"),
        }
    }
}

/// Runtime parameters of the framer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerConfig {
    /// Quiet time after the last byte before a partial line is flushed
    pub idle_period_ms: u32,
    /// Bytes that end a message unconditionally
    pub terminators: &'static [u8],
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FramerConfig {
    /// 1000 ms idle period, `\n` and `\r` terminators
    pub const DEFAULT: Self = Self::new(DEFAULT_IDLE_PERIOD_MS, DEFAULT_TERMINATORS);

    pub const fn new(idle_period_ms: u32, terminators: &'static [u8]) -> Self {
        Self {
            idle_period_ms,
            terminators,
        }
    }

    /// Check whether `byte` ends a message
    pub const fn is_terminator(&self, byte: u8) -> bool {
        let mut i = 0;
        while i < self.terminators.len() {
            if self.terminators[i] == byte {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Validate the runtime parameters
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_period_ms == 0 {
            return Err(ConfigError::ZeroIdlePeriod);
        }
        if self.terminators.is_empty() {
            return Err(ConfigError::NoTerminators);
        }
        if self.terminators.len() > MAX_TERMINATORS {
            return Err(ConfigError::TooManyTerminators);
        }
        let mut i = 0;
        while i < self.terminators.len() {
            let mut j = i + 1;
            while j < self.terminators.len() {
                if self.terminators[i] == self.terminators[j] {
                    return Err(ConfigError::DuplicateTerminator);
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }
}

/// Validate the build-time sizes (message size `N`, queue depth `K`)
pub const fn validate_sizes(msg_size: usize, queue_depth: usize) -> Result<(), ConfigError> {
    if msg_size < MIN_MSG_SIZE {
        return Err(ConfigError::MessageSizeTooSmall);
    }
    if queue_depth == 0 {
        return Err(ConfigError::ZeroQueueDepth);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FramerConfig::default();
        assert_eq!(config.idle_period_ms, 1000);
        assert!(config.is_terminator(b'\n'));
        assert!(config.is_terminator(b'\r'));
        assert!(!config.is_terminator(b'a'));
        assert!(!config.is_terminator(0));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_custom_terminator() {
        let config = FramerConfig::new(250, b";");
        assert!(config.is_terminator(b';'));
        assert!(!config.is_terminator(b'\n'));
    }

    #[test]
    fn test_invalid_configs() {
        assert_eq!(
            FramerConfig::new(0, b"\n").validate(),
            Err(ConfigError::ZeroIdlePeriod)
        );
        assert_eq!(
            FramerConfig::new(100, b"").validate(),
            Err(ConfigError::NoTerminators)
        );
        assert_eq!(
            FramerConfig::new(100, b"\n\r;:!").validate(),
            Err(ConfigError::TooManyTerminators)
        );
        assert_eq!(
            FramerConfig::new(100, b"\n;\n").validate(),
            Err(ConfigError::DuplicateTerminator)
        );
    }

    fn render(err: ConfigError) -> heapless::String<64> {
        use core::fmt::Write;

        let mut out = heapless::String::new();
        write!(out, "{}", err).unwrap();
        out
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            render(ConfigError::TooManyTerminators).as_str(),
            "at most 4 terminator bytes are allowed"
        );
        assert_eq!(
            render(ConfigError::MessageSizeTooSmall).as_str(),
            "message size must be at least 2 bytes"
        );
        assert_eq!(
            render(ConfigError::DuplicateTerminator).as_str(),
            "terminator bytes must be distinct"
        );
    }

    #[test]
    fn test_validate_sizes() {
        assert_eq!(validate_sizes(DEFAULT_MSG_SIZE, DEFAULT_QUEUE_DEPTH), Ok(()));
        assert_eq!(validate_sizes(2, 1), Ok(()));
        assert_eq!(validate_sizes(1, 10), Err(ConfigError::MessageSizeTooSmall));
        assert_eq!(validate_sizes(32, 0), Err(ConfigError::ZeroQueueDepth));
    }
}
