use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, I2c, Operation};

use crate::RegisterId;

/// Longest write payload sent as a single `write` frame
const FRAME_PAYLOAD: usize = 2;

/// Addressed register access on a shared two-wire bus
///
/// Mutual exclusion between devices on the same bus is the implementor's
/// concern; the sensor driver assumes each call is atomic.
pub trait BusTransport {
    type Error: Error;

    /// Selects `register` on the device at `address` and fills `buf`
    fn read_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Writes `register` followed by `bytes` to the device at `address`
    ///
    /// An empty `bytes` sends a bare command.
    fn write_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}

fn write_frame<I: I2c>(
    i2c: &mut I,
    address: u8,
    register: u8,
    bytes: &[u8],
) -> Result<(), I::Error> {
    if bytes.len() <= FRAME_PAYLOAD {
        let mut frame = [0u8; FRAME_PAYLOAD + 1];
        frame[0] = register;
        frame[1..=bytes.len()].copy_from_slice(bytes);
        i2c.write(address, &frame[..=bytes.len()])
    } else {
        i2c.transaction(
            address,
            &mut [Operation::Write(&[register]), Operation::Write(bytes)],
        )
    }
}

/// Plain I2C bus, register select and read in one repeated-start transaction
impl<I: I2c> BusTransport for I {
    type Error = I::Error;

    fn read_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register.register_id()], buf)
    }

    fn write_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        write_frame(self, address, register.register_id(), bytes)
    }
}

/// Bus wrapper that gives the sensor time to prepare its answer
///
/// The register select is sent as its own transaction, followed by a delay
/// and a separate read. The sensor firmware needs this time on most hosts;
/// the plain `I2c` impl above reads with a repeated start and gives none.
pub struct Settled<I, D> {
    i2c: I,
    delay: D,
    settle_ms: u32,
}

impl<I, D> Settled<I, D> {
    /// Delay between register select and read
    pub const DEFAULT_SETTLE_MS: u32 = 20;

    pub fn new(i2c: I, delay: D) -> Self {
        Settled {
            i2c,
            delay,
            settle_ms: Self::DEFAULT_SETTLE_MS,
        }
    }

    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }

    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}

impl<I, D> BusTransport for Settled<I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = I::Error;

    fn read_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write(address, &[register.register_id()])?;
        self.delay.delay_ms(self.settle_ms);
        self.i2c.read(address, buf)
    }

    fn write_register(
        &mut self,
        address: u8,
        register: impl RegisterId,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        write_frame(&mut self.i2c, address, register.register_id(), bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{BusTransport, Settled};
    use crate::Register;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn plain_bus_reads_with_repeated_start() {
        let expectations = [
            Transaction::write_read(0x20, vec![0x05], vec![0x00, 0xfa]),
            Transaction::write_read(0x21, vec![0x09], vec![0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut buf = [0u8; 2];
        i2c.read_register(0x20, Register::GetTemperature, &mut buf)
            .unwrap();
        assert_eq!(buf, [0x00, 0xfa]);

        let mut busy = [0xffu8; 1];
        i2c.read_register(0x21, 0x09u8, &mut busy).unwrap();
        assert_eq!(busy, [0x00]);

        i2c.done();
    }

    #[test]
    fn plain_bus_writes_register_and_payload() {
        let expectations = [
            Transaction::write(0x20, vec![0x03]),
            Transaction::write(0x20, vec![0x01, 0x21]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        i2c.write_register(0x20, Register::MeasureLight, &[]).unwrap();
        i2c.write_register(0x20, Register::SetAddress, &[0x21])
            .unwrap();

        i2c.done();
    }

    #[test]
    fn settled_bus_splits_select_and_read() {
        let expectations = [
            Transaction::write(0x20, vec![0x00]),
            Transaction::read(0x20, vec![0x01, 0xbd]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut bus = Settled::new(i2c, NoopDelay::new());
        assert_eq!(bus.settle_ms(), 20);

        let mut buf = [0u8; 2];
        bus.read_register(0x20, Register::GetCapacitance, &mut buf)
            .unwrap();
        assert_eq!(buf, [0x01, 0xbd]);

        let (mut i2c, _) = bus.release();
        i2c.done();
    }

    #[test]
    fn settled_bus_skips_read_after_failed_select() {
        let expectations = [Transaction::write(0x20, vec![0x07]).with_error(ErrorKind::Other)];
        let i2c = I2cMock::new(&expectations);
        let mut bus = Settled::new(i2c, NoopDelay::new()).with_settle_ms(5);

        let mut buf = [0u8; 1];
        assert_eq!(
            bus.read_register(0x20, Register::GetVersion, &mut buf),
            Err(ErrorKind::Other)
        );

        let (mut i2c, _) = bus.release();
        i2c.done();
    }
}
