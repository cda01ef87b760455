use byteorder::{BigEndian, ByteOrder};

/// Two-point moisture calibration in raw capacitance units
///
/// The mapping is linear through `(dry, 0 %)` and `(wet, 100 %)`,
/// extrapolated and then clamped to `[0, 100]`. `dry > wet` is accepted
/// and inverts the slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    dry: u16,
    wet: u16,
}

impl Calibration {
    pub const fn new(dry: u16, wet: u16) -> Self {
        Calibration { dry, wet }
    }

    pub fn dry(&self) -> u16 {
        self.dry
    }

    pub fn wet(&self) -> u16 {
        self.wet
    }

    /// `wet == dry` leaves the slope undefined
    pub fn is_degenerate(&self) -> bool {
        self.dry == self.wet
    }

    /// Moisture percentage for a raw capacitance reading
    ///
    /// Returns `None` for a degenerate calibration instead of dividing by
    /// zero.
    pub fn moisture_percent(&self, raw: u16) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        let span = i32::from(self.wet) - i32::from(self.dry);
        let offset = i32::from(raw) - i32::from(self.dry);
        let percent = 100.0 * offset as f32 / span as f32;
        Some(percent.clamp(0.0, 100.0))
    }
}

/// Capacitance register: unsigned, used as is
pub fn decode_capacitance(raw: &[u8; 2]) -> u16 {
    BigEndian::read_u16(raw)
}

/// Temperature register: signed tenths of a degree Celsius
pub fn decode_temperature(raw: &[u8; 2]) -> f32 {
    f32::from(BigEndian::read_i16(raw)) / 10.0
}

/// Light register: unsigned relative intensity
pub fn decode_light(raw: &[u8; 2]) -> u16 {
    BigEndian::read_u16(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Calibration = Calibration::new(290, 600);

    #[test]
    fn calibration_bounds() {
        assert_eq!(DEFAULT.moisture_percent(290), Some(0.0));
        assert_eq!(DEFAULT.moisture_percent(600), Some(100.0));
        assert_eq!(DEFAULT.moisture_percent(445), Some(50.0));
    }

    #[test]
    fn clamp_outside_calibration() {
        assert_eq!(DEFAULT.moisture_percent(700), Some(100.0));
        assert_eq!(DEFAULT.moisture_percent(u16::MAX), Some(100.0));
        assert_eq!(DEFAULT.moisture_percent(100), Some(0.0));
        assert_eq!(DEFAULT.moisture_percent(0), Some(0.0));
    }

    #[test]
    fn monotonic_between_bounds() {
        let mut last = 0.0;
        for raw in 0..=1000 {
            let value = DEFAULT.moisture_percent(raw).unwrap();
            assert!(value >= last, "{} dropped below {} at {}", value, last, raw);
            assert!((0.0..=100.0).contains(&value));
            last = value;
        }
    }

    #[test]
    fn degenerate_calibration() {
        let calibration = Calibration::new(400, 400);
        assert!(calibration.is_degenerate());
        for raw in [0, 399, 400, 401, u16::MAX] {
            assert_eq!(calibration.moisture_percent(raw), None);
        }
    }

    #[test]
    fn inverted_calibration() {
        let calibration = Calibration::new(600, 290);
        assert_eq!(calibration.moisture_percent(600), Some(0.0));
        assert_eq!(calibration.moisture_percent(290), Some(100.0));
        assert_eq!(calibration.moisture_percent(445), Some(50.0));
        assert_eq!(calibration.moisture_percent(100), Some(100.0));
    }

    #[test]
    fn temperature_conversion() {
        assert_eq!(decode_temperature(&[0xff, 0x85]), -12.3);
        assert_eq!(decode_temperature(&[0x00, 0xfa]), 25.0);
        assert_eq!(decode_temperature(&[0x00, 0x00]), 0.0);
    }

    #[test]
    fn unsigned_registers() {
        assert_eq!(decode_capacitance(&[0x01, 0xbd]), 445);
        assert_eq!(decode_light(&[0xff, 0xff]), u16::MAX);
    }
}
