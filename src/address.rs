use crate::ConfigError;
use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// 7-bit I2C device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(transparent)]
pub struct Address(u8);

impl Address {
    /// Highest 7-bit address
    pub const MAX: u8 = 0x7f;

    /// Factory address of the sensor
    pub const DEFAULT: Address = Address(0x20);

    pub const fn new(raw: u8) -> Result<Self, ConfigError> {
        if raw > Self::MAX {
            Err(ConfigError::AddressOutOfRange(raw))
        } else {
            Ok(Address(raw))
        }
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Address {
    type Error = ConfigError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> u8 {
        addr.0
    }
}

/// Accepts decimal (`32`) or hex with a `0x` prefix (`0x20`)
impl FromStr for Address {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => s.parse::<u8>(),
        }
        .map_err(|_| ConfigError::Invalid)?;
        Self::new(raw)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "0x{:02x}", self.0)
    }
}
