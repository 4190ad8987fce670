//! Command and result codes carried in the status word

/// Operation requested by the host (status bits 0-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandCode {
    /// Erase every flash block on the device
    Erase = 0,
    /// Program `length` buffer words starting at `address`
    Program = 1,
}

impl CommandCode {
    /// Get the code as written into the status word
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw `cmd` field
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CommandCode::Erase),
            1 => Some(CommandCode::Program),
            _ => None,
        }
    }
}

/// Outcome of the last command (status bits 4-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResultCode {
    /// Command completed without the controller flagging an error
    Ok = 0,
    /// The flash controller reported an error; see `hw_flags`
    FlashError = 1,
    /// Request fields out of range (oversized length, unreachable address)
    InvalidArgument = 2,
    /// Command code unknown or not supported by this build
    NotImplemented = 15,
}

impl ResultCode {
    /// Get the code as written into the status word
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw `result` field
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ResultCode::Ok),
            1 => Some(ResultCode::FlashError),
            2 => Some(ResultCode::InvalidArgument),
            15 => Some(ResultCode::NotImplemented),
            _ => None,
        }
    }

    /// Check if this code reports a failure
    pub const fn is_error(self) -> bool {
        !matches!(self, ResultCode::Ok)
    }
}
