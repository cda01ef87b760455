use core::fmt::Debug;
use core::time::Duration;

use embedded_hal::i2c::Error as _;

use crate::calibration::{decode_capacitance, decode_light, decode_temperature};
use crate::{
    BusTransport, Calibration, Error, OutputSink, Quantity, Register, SensorConfig, Sinks,
};

/// Conversion time the sensor needs after a light measurement is triggered
pub const LIGHT_MEASUREMENT_TIME: Duration = Duration::from_millis(1500);

/// Light conversion started by the previous cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    #[default]
    Idle,
    Requested,
}

/// Summary of one poll cycle, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleStatus {
    /// No quantity enabled, nothing was read
    Idle,
    /// Every enabled quantity produced a value
    Complete,
    /// Some quantities failed, the rest were published
    Partial,
    /// No enabled quantity produced a value
    Failed,
}

/// Outcome of one poll cycle per quantity
///
/// `None` means the quantity is disabled and was never read.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult<E: Debug> {
    pub moisture: Option<Result<f32, Error<E>>>,
    pub capacitance: Option<Result<f32, Error<E>>>,
    pub temperature: Option<Result<f32, Error<E>>>,
    pub light: Option<Result<f32, Error<E>>>,
}

impl<E: Debug> Default for PollResult<E> {
    fn default() -> Self {
        PollResult {
            moisture: None,
            capacitance: None,
            temperature: None,
            light: None,
        }
    }
}

impl<E: Debug> PollResult<E> {
    pub fn get(&self, quantity: Quantity) -> Option<&Result<f32, Error<E>>> {
        match quantity {
            Quantity::Moisture => self.moisture.as_ref(),
            Quantity::Capacitance => self.capacitance.as_ref(),
            Quantity::Temperature => self.temperature.as_ref(),
            Quantity::Light => self.light.as_ref(),
        }
    }

    /// Converted value, if the quantity is enabled and was read successfully
    pub fn value(&self, quantity: Quantity) -> Option<f32> {
        self.get(quantity).and_then(|r| r.as_ref().ok().copied())
    }

    pub fn status(&self) -> CycleStatus {
        let (ok, failed) = Quantity::ALL
            .iter()
            .filter_map(|q| self.get(*q))
            .fold((0, 0), |(ok, failed), outcome| match outcome {
                Ok(_) => (ok + 1, failed),
                Err(_) => (ok, failed + 1),
            });
        match (ok, failed) {
            (0, 0) => CycleStatus::Idle,
            (_, 0) => CycleStatus::Complete,
            (0, _) => CycleStatus::Failed,
            _ => CycleStatus::Partial,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == CycleStatus::Complete
    }
}

/// Capacitive soil moisture sensor on a shared I2C bus
///
/// The driver owns a bus handle and is polled by an external scheduler
/// every [`SensorConfig::update_interval`]. Each [`poll`](Self::poll) reads
/// every enabled register exactly once, in the order capacitance,
/// temperature, light. Moisture is derived from the capacitance reading.
/// A failing read only affects its own quantity.
///
/// `poll` borrows the driver mutably, so two cycles on one instance can
/// never overlap.
pub struct SoilSensor<'a, B: BusTransport> {
    bus: B,
    config: SensorConfig,
    sinks: Sinks<'a>,
    light: LightState,
}

impl<'a, B: BusTransport> SoilSensor<'a, B> {
    /// A bare `I2c` bus selects and reads a register in one repeated-start
    /// `write_read`. Sensors that need time between the two must be wrapped
    /// in [`Settled`](crate::Settled).
    pub fn new(bus: B, config: SensorConfig) -> Self {
        Self::with_sinks(bus, config, Sinks::new())
    }

    pub fn with_sinks(bus: B, config: SensorConfig, sinks: Sinks<'a>) -> Self {
        if config.outputs.light && config.update_interval < LIGHT_MEASUREMENT_TIME {
            warn!(
                "update interval of {} ms is shorter than the light conversion time",
                config.update_interval.as_millis() as u64
            );
        }
        if config.outputs.moisture && config.calibration().is_degenerate() {
            warn!(
                "dry and wet value are both {}, moisture will be unavailable",
                config.dry_value
            );
        }
        SoilSensor {
            bus,
            config,
            sinks,
            light: LightState::Idle,
        }
    }

    /// Binds an output sink, returning the one previously bound
    pub fn bind(
        &mut self,
        quantity: Quantity,
        sink: &'a mut dyn OutputSink,
    ) -> Option<&'a mut dyn OutputSink> {
        if !self.config.is_enabled(quantity) {
            debug!("{} output is disabled, its sink will not be used", quantity.name());
        }
        self.sinks.bind(quantity, sink)
    }

    pub fn unbind(&mut self, quantity: Quantity) -> Option<&'a mut dyn OutputSink> {
        self.sinks.unbind(quantity)
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn calibration(&self) -> Calibration {
        self.config.calibration()
    }

    pub fn light_state(&self) -> LightState {
        self.light
    }

    pub fn release(self) -> B {
        self.bus
    }

    /// Runs one read-decode-publish cycle
    pub fn poll(&mut self) -> PollResult<B::Error> {
        let outputs = self.config.outputs;
        let mut result = PollResult::default();

        if outputs.needs_capacitance() {
            match self.read_word(Register::GetCapacitance) {
                Ok(raw) => {
                    let raw = decode_capacitance(&raw);
                    debug!("got capacitance: {}", raw);
                    if outputs.capacitance {
                        result.capacitance = Some(Ok(f32::from(raw)));
                    }
                    if outputs.moisture {
                        result.moisture = Some(self.moisture(raw));
                    }
                }
                Err(e) => {
                    self.report_failure(Quantity::Capacitance, &e);
                    if outputs.capacitance {
                        result.capacitance = Some(Err(e));
                        if outputs.moisture {
                            result.moisture = Some(Err(Error::CapacitanceUnavailable));
                        }
                    } else {
                        result.moisture = Some(Err(e));
                    }
                }
            }
        }

        if outputs.temperature {
            let temperature = self
                .read_word(Register::GetTemperature)
                .map(|raw| decode_temperature(&raw));
            match &temperature {
                Ok(celsius) => debug!("got temperature: {} C", *celsius),
                Err(e) => self.report_failure(Quantity::Temperature, e),
            }
            result.temperature = Some(temperature);
        }

        if outputs.light {
            let pending = self.light == LightState::Requested;
            let light = self
                .read_word(Register::GetLight)
                .map(|raw| f32::from(decode_light(&raw)))
                .and_then(|light| {
                    if pending {
                        Ok(light)
                    } else {
                        // register holds no conversion yet (power-up or reset)
                        Err(Error::LightNotMeasured)
                    }
                });
            match &light {
                Ok(light) => debug!("got light: {}", *light),
                Err(e) => self.report_failure(Quantity::Light, e),
            }
            result.light = Some(light);
        }

        self.publish(&result);

        if outputs.light {
            // the next cycle reads the conversion started here
            match self.trigger_light() {
                Ok(()) => debug!("light measurement triggered"),
                Err(_) => warn!("failed to trigger light measurement"),
            }
        }

        debug!("poll cycle finished: {:?}", result.status());
        result
    }

    fn moisture(&self, raw: u16) -> Result<f32, Error<B::Error>> {
        match self.config.calibration().moisture_percent(raw) {
            Some(percent) => {
                debug!("moisture: {} %", percent);
                Ok(percent)
            }
            None => {
                warn!("moisture unavailable: dry and wet value are equal");
                Err(Error::DegenerateCalibration)
            }
        }
    }

    fn publish(&mut self, result: &PollResult<B::Error>) {
        for quantity in Quantity::ALL {
            if let Some(value) = result.value(quantity) {
                self.sinks.publish(quantity, value);
            }
        }
    }

    fn report_failure(&self, quantity: Quantity, error: &Error<B::Error>) {
        match error {
            Error::Bus(e) => warn!(
                "failed to read {} from {}: {:?}",
                quantity.name(),
                self.config.address.raw(),
                e.kind()
            ),
            _ => warn!("{} unavailable", quantity.name()),
        }
    }

    /// Reads the firmware version to verify communication at setup
    ///
    /// With light enabled this also starts the first light conversion, so
    /// the first poll reads a measured value.
    pub fn probe(&mut self) -> Result<u8, Error<B::Error>> {
        match self.version() {
            Ok(version) => {
                debug!("sensor version: {}", version);
                if self.config.outputs.light {
                    self.trigger_light()?;
                }
                Ok(version)
            }
            Err(e) => {
                error!(
                    "communication with soil moisture sensor at {} failed",
                    self.config.address.raw()
                );
                Err(e)
            }
        }
    }

    pub fn version(&mut self) -> Result<u8, Error<B::Error>> {
        self.read_byte(Register::GetVersion)
    }

    pub fn is_busy(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_byte(Register::GetBusy)? != 0)
    }

    /// Address the sensor firmware reports for itself
    pub fn read_address(&mut self) -> Result<u8, Error<B::Error>> {
        self.read_byte(Register::GetAddress)
    }

    /// Starts a light conversion, readable after [`LIGHT_MEASUREMENT_TIME`]
    pub fn trigger_light(&mut self) -> Result<(), Error<B::Error>> {
        self.light = LightState::Idle;
        self.command(Register::MeasureLight)?;
        self.light = LightState::Requested;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.light = LightState::Idle;
        self.command(Register::Reset)
    }

    /// Puts the sensor to sleep, the next bus access wakes it up
    pub fn sleep(&mut self) -> Result<(), Error<B::Error>> {
        self.command(Register::Sleep)
    }

    /// Logs the active configuration
    pub fn log_config(&self) {
        info!("I2C soil moisture sensor:");
        info!("  address: {}", self.config.address.raw());
        info!(
            "  update interval: {} ms",
            self.config.update_interval.as_millis() as u64
        );
        info!(
            "  dry value: {}, wet value: {}",
            self.config.dry_value,
            self.config.wet_value
        );
        for quantity in Quantity::ALL {
            if self.config.is_enabled(quantity) {
                info!(
                    "  {}: enabled, sink bound: {}",
                    quantity.name(),
                    self.sinks.is_bound(quantity)
                );
            }
        }
    }

    fn read_word(&mut self, register: Register) -> Result<[u8; 2], Error<B::Error>> {
        debug_assert_eq!(register.width(), 2);
        let mut buf = [0u8; 2];
        self.bus
            .read_register(self.config.address.raw(), register, &mut buf)?;
        Ok(buf)
    }

    fn read_byte(&mut self, register: Register) -> Result<u8, Error<B::Error>> {
        debug_assert_eq!(register.width(), 1);
        let mut buf = [0u8; 1];
        self.bus
            .read_register(self.config.address.raw(), register, &mut buf)?;
        Ok(buf[0])
    }

    fn command(&mut self, register: Register) -> Result<(), Error<B::Error>> {
        debug_assert_eq!(register.width(), 0);
        self.bus
            .write_register(self.config.address.raw(), register, &[])?;
        Ok(())
    }
}
