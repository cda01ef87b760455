use core::time::Duration;

use crate::{Address, Calibration, Quantities, Quantity};

/// Startup configuration of one sensor instance
///
/// Range checks happen where the values are parsed ([`Address`] rejects
/// anything above 7 bits, the calibration bounds are plain `u16`). The
/// driver takes the config by value and never changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    pub address: Address,
    pub update_interval: Duration,
    /// Raw capacitance in dry soil or open air, maps to 0 %
    pub dry_value: u16,
    /// Raw capacitance in water, maps to 100 %
    pub wet_value: u16,
    pub outputs: Quantities,
}

impl SensorConfig {
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);
    pub const DEFAULT_DRY_VALUE: u16 = 290;
    pub const DEFAULT_WET_VALUE: u16 = 600;

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn with_calibration(mut self, dry_value: u16, wet_value: u16) -> Self {
        self.dry_value = dry_value;
        self.wet_value = wet_value;
        self
    }

    pub fn with_outputs(mut self, outputs: Quantities) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.dry_value, self.wet_value)
    }

    pub fn is_enabled(&self, quantity: Quantity) -> bool {
        self.outputs.contains(quantity)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            address: Address::DEFAULT,
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            dry_value: Self::DEFAULT_DRY_VALUE,
            wet_value: Self::DEFAULT_WET_VALUE,
            outputs: Quantities::all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SensorConfig;
    use crate::{Address, Quantities, Quantity};
    use core::time::Duration;

    #[test]
    fn defaults_match_factory_sensor() {
        let config = SensorConfig::default();
        assert_eq!(config.address.raw(), 0x20);
        assert_eq!(config.update_interval, Duration::from_secs(60));
        assert_eq!((config.dry_value, config.wet_value), (290, 600));
        assert!(Quantity::ALL.iter().all(|q| config.is_enabled(*q)));
    }

    #[test]
    fn builder_overrides() {
        let config = SensorConfig::default()
            .with_address(Address::new(0x21).unwrap())
            .with_update_interval(Duration::from_secs(5))
            .with_calibration(250, 700)
            .with_outputs(Quantities::none().with(Quantity::Moisture));

        assert_eq!(config.address.raw(), 0x21);
        assert_eq!(config.calibration().dry(), 250);
        assert_eq!(config.calibration().wet(), 700);
        assert!(!config.is_enabled(Quantity::Light));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_config() {
        let config: SensorConfig = serde_json::from_str(
            r#"{
                "address": 33,
                "wet_value": 650,
                "outputs": { "light": false }
            }"#,
        )
        .unwrap();

        assert_eq!(config.address.raw(), 0x21);
        assert_eq!(config.dry_value, 290);
        assert_eq!(config.wet_value, 650);
        assert_eq!(config.update_interval, Duration::from_secs(60));
        assert!(config.outputs.moisture);
        assert!(!config.outputs.light);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reject_eight_bit_address_in_config() {
        let result = serde_json::from_str::<SensorConfig>(r#"{ "address": 200 }"#);
        assert!(result.is_err());
    }
}
