/// A physical measurement the sensor can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quantity {
    /// Calibrated soil moisture in percent, derived from capacitance
    Moisture,
    /// Raw capacitance units
    Capacitance,
    /// Soil temperature in degrees Celsius
    Temperature,
    /// Relative ambient light
    Light,
}

/// How a sink should present a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceClass {
    Moisture,
    Temperature,
    Illuminance,
    /// No well-known class, plain measurement
    Measurement,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::Moisture,
        Quantity::Capacitance,
        Quantity::Temperature,
        Quantity::Light,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Moisture => "moisture",
            Quantity::Capacitance => "capacitance",
            Quantity::Temperature => "temperature",
            Quantity::Light => "light",
        }
    }

    /// Unit of measurement, `None` for dimensionless raw units
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Quantity::Moisture => Some("%"),
            Quantity::Capacitance => None,
            Quantity::Temperature => Some("°C"),
            Quantity::Light => Some("lx"),
        }
    }

    /// Meaningful decimal places of a published value
    pub fn accuracy_decimals(&self) -> u8 {
        match self {
            Quantity::Temperature => 1,
            _ => 0,
        }
    }

    pub fn device_class(&self) -> DeviceClass {
        match self {
            Quantity::Moisture => DeviceClass::Moisture,
            Quantity::Capacitance => DeviceClass::Measurement,
            Quantity::Temperature => DeviceClass::Temperature,
            Quantity::Light => DeviceClass::Illuminance,
        }
    }
}

/// Set of enabled outputs, decided once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Quantities {
    pub moisture: bool,
    pub capacitance: bool,
    pub temperature: bool,
    pub light: bool,
}

impl Default for Quantities {
    fn default() -> Self {
        Self::all()
    }
}

impl Quantities {
    pub const fn none() -> Self {
        Quantities {
            moisture: false,
            capacitance: false,
            temperature: false,
            light: false,
        }
    }

    pub const fn all() -> Self {
        Quantities {
            moisture: true,
            capacitance: true,
            temperature: true,
            light: true,
        }
    }

    pub fn contains(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::Moisture => self.moisture,
            Quantity::Capacitance => self.capacitance,
            Quantity::Temperature => self.temperature,
            Quantity::Light => self.light,
        }
    }

    pub fn set(&mut self, quantity: Quantity, enabled: bool) {
        match quantity {
            Quantity::Moisture => self.moisture = enabled,
            Quantity::Capacitance => self.capacitance = enabled,
            Quantity::Temperature => self.temperature = enabled,
            Quantity::Light => self.light = enabled,
        }
    }

    pub fn with(mut self, quantity: Quantity) -> Self {
        self.set(quantity, true);
        self
    }

    pub fn without(mut self, quantity: Quantity) -> Self {
        self.set(quantity, false);
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.moisture || self.capacitance || self.temperature || self.light)
    }

    /// Capacitance register is read for both capacitance and moisture
    pub fn needs_capacitance(&self) -> bool {
        self.capacitance || self.moisture
    }

    pub fn iter(&self) -> impl Iterator<Item = Quantity> + '_ {
        Quantity::ALL.into_iter().filter(|q| self.contains(*q))
    }
}

impl FromIterator<Quantity> for Quantities {
    fn from_iter<T: IntoIterator<Item = Quantity>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Quantities::none(), |set, quantity| set.with(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::{Quantities, Quantity};

    #[test]
    fn moisture_alone_needs_capacitance() {
        let set = Quantities::none().with(Quantity::Moisture);
        assert!(set.needs_capacitance());
        assert!(!set.contains(Quantity::Capacitance));
        assert!(!Quantities::none().with(Quantity::Light).needs_capacitance());
    }

    #[test]
    fn collect_and_iterate() {
        let set: Quantities = [Quantity::Light, Quantity::Capacitance].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Quantity::Capacitance, Quantity::Light]
        );
        assert!(Quantities::none().is_empty());
        assert!(Quantities::all().without(Quantity::Light).contains(Quantity::Moisture));
    }

    #[test]
    fn display_metadata() {
        assert_eq!(Quantity::Temperature.unit(), Some("°C"));
        assert_eq!(Quantity::Temperature.accuracy_decimals(), 1);
        assert_eq!(Quantity::Capacitance.unit(), None);
        assert_eq!(Quantity::Moisture.accuracy_decimals(), 0);
    }
}
