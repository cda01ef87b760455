pub trait RegisterId {
    fn register_id(&self) -> u8;
}

/// Register map of the sensor firmware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    GetCapacitance = 0x00,
    SetAddress = 0x01,
    GetAddress = 0x02,
    MeasureLight = 0x03,
    GetLight = 0x04,
    GetTemperature = 0x05,
    Reset = 0x06,
    GetVersion = 0x07,
    Sleep = 0x08,
    GetBusy = 0x09,
}

impl Register {
    /// Number of bytes the sensor returns for a read of this register
    pub fn width(&self) -> usize {
        match self {
            Register::GetCapacitance | Register::GetLight | Register::GetTemperature => 2,
            Register::GetAddress | Register::GetVersion | Register::GetBusy => 1,
            Register::SetAddress
            | Register::MeasureLight
            | Register::Reset
            | Register::Sleep => 0,
        }
    }
}

impl RegisterId for Register {
    fn register_id(&self) -> u8 {
        *self as _
    }
}

impl RegisterId for u8 {
    fn register_id(&self) -> u8 {
        *self
    }
}
