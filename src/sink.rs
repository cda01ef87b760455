use crate::Quantity;

/// Destination for the converted values of one quantity
pub trait OutputSink {
    /// Called once per successful decode
    fn publish(&mut self, value: f32);
}

impl<F: FnMut(f32)> OutputSink for F {
    fn publish(&mut self, value: f32) {
        self(value)
    }
}

/// Optional sink binding per quantity
///
/// Sinks are borrowed from the application wiring and outlive the driver.
#[derive(Default)]
pub struct Sinks<'a> {
    moisture: Option<&'a mut dyn OutputSink>,
    capacitance: Option<&'a mut dyn OutputSink>,
    temperature: Option<&'a mut dyn OutputSink>,
    light: Option<&'a mut dyn OutputSink>,
}

impl<'a> Sinks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, quantity: Quantity) -> &mut Option<&'a mut dyn OutputSink> {
        match quantity {
            Quantity::Moisture => &mut self.moisture,
            Quantity::Capacitance => &mut self.capacitance,
            Quantity::Temperature => &mut self.temperature,
            Quantity::Light => &mut self.light,
        }
    }

    /// Binds `sink` to `quantity`, returning the sink it replaces
    pub fn bind(
        &mut self,
        quantity: Quantity,
        sink: &'a mut dyn OutputSink,
    ) -> Option<&'a mut dyn OutputSink> {
        self.slot(quantity).replace(sink)
    }

    pub fn unbind(&mut self, quantity: Quantity) -> Option<&'a mut dyn OutputSink> {
        self.slot(quantity).take()
    }

    pub fn is_bound(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::Moisture => self.moisture.is_some(),
            Quantity::Capacitance => self.capacitance.is_some(),
            Quantity::Temperature => self.temperature.is_some(),
            Quantity::Light => self.light.is_some(),
        }
    }

    /// Forwards `value` to the bound sink, returns whether one was bound
    pub fn publish(&mut self, quantity: Quantity, value: f32) -> bool {
        match self.slot(quantity) {
            Some(sink) => {
                sink.publish(value);
                true
            }
            None => false,
        }
    }
}
