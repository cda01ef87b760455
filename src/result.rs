use core::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// Error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: Sized + Debug> {
    /// Transient bus error on the transaction that produced this reading
    Bus(E),
    /// Dry and wet calibration values are equal, moisture is undefined
    DegenerateCalibration,
    /// Moisture could not be derived because the capacitance read failed
    CapacitanceUnavailable,
    /// Light register read before any measurement was triggered
    LightNotMeasured,
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Bus(e)
    }
}

impl<E: Sized + Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::DegenerateCalibration => f.write_str("dry and wet calibration values are equal"),
            Error::CapacitanceUnavailable => f.write_str("no capacitance reading this cycle"),
            Error::LightNotMeasured => f.write_str("no light measurement was triggered"),
        }
    }
}

/// Configuration rejected before a driver is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bus address does not fit in 7 bits
    AddressOutOfRange(u8),
    /// Address string is not a decimal or `0x`-prefixed hex number
    Invalid,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            ConfigError::AddressOutOfRange(raw) => {
                write!(f, "bus address 0x{:02x} is not a 7-bit address", raw)
            }
            ConfigError::Invalid => f.write_str("bus address is not a number"),
        }
    }
}
