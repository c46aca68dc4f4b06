//! I2C-polled encoder source
//!
//! Reads a rotary encoder peripheral (M5Stack Faces encoder layout) on a
//! fixed cadence. Every poll returns the motion since the previous poll,
//! which is folded into a local accumulator until the GUI drains it.
//!
//! # Register frame
//!
//! ```text
//! ┌──────────────┬────────────────┬──────────┐
//! │ DELTA (i8)   │ NOT_PRESSED    │ RESERVED │
//! │ 1B           │ 1B (bit 0)     │ 1B       │
//! └──────────────┴────────────────┴──────────┘
//! ```
//!
//! LED commands are a separate 4-byte write: `[index, r, g, b]`.
//!
//! The source does not schedule itself. Call [`I2cEncoder::update`] from a
//! timer or cooperative task at roughly `update_period_ms`.

use core::fmt;

use detent_hal::I2cBus;

use super::EncoderSource;

/// Default 7-bit address of the encoder peripheral
pub const DEFAULT_ADDRESS: u8 = 0x5E;

/// Default poll cadence
pub const DEFAULT_UPDATE_PERIOD_MS: u32 = 20;

/// Size of the status frame read on every poll
pub const FRAME_LEN: usize = 3;

/// Size of an LED command
pub const LED_COMMAND_LEN: usize = 4;

/// Bit of the second frame byte that reads 1 while the button is up
const NOT_PRESSED_BIT: u8 = 0x01;

/// Errors that can occur when talking to the encoder peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError<E> {
    /// Underlying I2C transaction failed
    Bus(E),
}

impl<E> From<E> for EncoderError<E> {
    fn from(error: E) -> Self {
        EncoderError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Bus(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Bus(e) => defmt::write!(f, "I2C error: {}", e),
        }
    }
}

/// LED colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Snapshot of the polled state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cEncoderState {
    /// Motion accumulated since the last drain
    pub accumulated_delta: i32,
    /// Button level from the last successful poll
    pub pressed: bool,
    /// Time of the last successful poll
    pub last_poll_ms: Option<u64>,
}

/// Encoder source polled over I2C
///
/// Poll and drain both take `&mut self`. When they run in different
/// execution contexts, wrap the encoder in a mutex (see
/// `detent_drivers::SharedSource`) so a drain never observes half a poll.
pub struct I2cEncoder<B> {
    bus: B,
    address: u8,
    update_period_ms: u32,
    state: I2cEncoderState,
}

impl<B: I2cBus> I2cEncoder<B> {
    /// Create a source at the default address and cadence
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS, DEFAULT_UPDATE_PERIOD_MS)
    }

    /// Create a source with explicit address and cadence
    ///
    /// # Arguments
    /// * `bus` - I2C bus (owned, so LED writes and polls are serialized)
    /// * `address` - 7-bit device address
    /// * `update_period_ms` - intended poll cadence
    pub fn with_address(bus: B, address: u8, update_period_ms: u32) -> Self {
        Self {
            bus,
            address,
            update_period_ms,
            state: I2cEncoderState::default(),
        }
    }

    /// Poll the device once
    ///
    /// Returns the signed delta reported by this poll. On failure the
    /// accumulator, the pressed flag and the poll timestamp keep their
    /// previous values; no retry is attempted.
    pub fn update(&mut self, now_ms: u64) -> Result<i8, EncoderError<B::Error>> {
        let mut frame = [0u8; FRAME_LEN];
        self.bus.read(self.address, &mut frame)?;

        let delta = frame[0] as i8;
        self.state.accumulated_delta = self
            .state
            .accumulated_delta
            .saturating_add(i32::from(delta));
        self.state.pressed = frame[1] & NOT_PRESSED_BIT == 0;
        self.state.last_poll_ms = Some(now_ms);

        Ok(delta)
    }

    /// Check whether a poll is due at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.state.last_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(self.update_period_ms),
        }
    }

    /// Set one of the device LEDs
    ///
    /// Independent of the read path; ordering relative to `update` is only
    /// the bus-level serialization given by `&mut self`.
    pub fn set_led(&mut self, id: u8, colour: Rgb) -> Result<(), EncoderError<B::Error>> {
        let command: [u8; LED_COMMAND_LEN] = [id, colour.r, colour.g, colour.b];
        self.bus.write(self.address, &command)?;
        Ok(())
    }

    /// Drain the accumulator, returning the pre-drain value
    pub fn diff(&mut self) -> i32 {
        core::mem::take(&mut self.state.accumulated_delta)
    }

    /// Accumulated motion without resetting
    pub fn diff_peek(&self) -> i32 {
        self.state.accumulated_delta
    }

    /// Button level from the last successful poll
    pub fn pressed(&self) -> bool {
        self.state.pressed
    }

    /// Full state snapshot
    pub fn state(&self) -> I2cEncoderState {
        self.state
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Intended poll cadence
    pub fn update_period_ms(&self) -> u32 {
        self.update_period_ms
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> EncoderSource for I2cEncoder<B> {
    fn diff(&mut self) -> i32 {
        I2cEncoder::diff(self)
    }

    fn diff_peek(&self) -> i32 {
        I2cEncoder::diff_peek(self)
    }

    fn pressed(&self) -> bool {
        I2cEncoder::pressed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{Deque, Vec};
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockBusError;

    /// Mock I2C device with scripted poll replies
    ///
    /// `None` in the script makes that transaction fail.
    struct MockDevice {
        replies: Deque<Option<[u8; FRAME_LEN]>, 32>,
        writes: Vec<(u8, Vec<u8, 8>), 8>,
        reads: Vec<u8, 32>,
        fail_writes: bool,
    }

    impl MockDevice {
        fn new() -> Self {
            Self {
                replies: Deque::new(),
                writes: Vec::new(),
                reads: Vec::new(),
                fail_writes: false,
            }
        }

        fn reply(mut self, delta: i8, not_pressed: u8) -> Self {
            self.replies
                .push_back(Some([delta as u8, not_pressed, 0]))
                .unwrap();
            self
        }

        fn fail(mut self) -> Self {
            self.replies.push_back(None).unwrap();
            self
        }

        /// Last LED register contents written to `address`
        fn led_register(&self, address: u8) -> Option<&[u8]> {
            self.writes
                .iter()
                .rev()
                .find(|(a, _)| *a == address)
                .map(|(_, data)| data.as_slice())
        }
    }

    impl I2cBus for MockDevice {
        type Error = MockBusError;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(MockBusError);
            }
            self.writes
                .push((address, Vec::from_slice(data).unwrap()))
                .unwrap();
            Ok(())
        }

        fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
            self.reads.push(address).unwrap();
            match self.replies.pop_front() {
                Some(Some(frame)) => {
                    buf.copy_from_slice(&frame[..buf.len()]);
                    Ok(())
                }
                _ => Err(MockBusError),
            }
        }

        fn write_read(
            &mut self,
            _address: u8,
            _write_data: &[u8],
            _read_buf: &mut [u8],
        ) -> Result<(), Self::Error> {
            Err(MockBusError)
        }
    }

    #[test]
    fn test_defaults() {
        let encoder = I2cEncoder::new(MockDevice::new());
        assert_eq!(encoder.address(), DEFAULT_ADDRESS);
        assert_eq!(encoder.update_period_ms(), DEFAULT_UPDATE_PERIOD_MS);
        assert_eq!(encoder.state(), I2cEncoderState::default());
    }

    #[test]
    fn test_accumulates_scripted_deltas() {
        let bus = MockDevice::new().reply(3, 1).reply(-1, 1).reply(2, 1);
        let mut encoder = I2cEncoder::new(bus);

        assert_eq!(encoder.update(0), Ok(3));
        assert_eq!(encoder.update(20), Ok(-1));
        assert_eq!(encoder.update(40), Ok(2));

        assert_eq!(encoder.diff_peek(), 4);
        assert_eq!(encoder.diff(), 4);
        assert_eq!(encoder.diff(), 0);
    }

    #[test]
    fn test_failed_poll_leaves_state_unchanged() {
        let bus = MockDevice::new().reply(3, 0).fail().reply(2, 1);
        let mut encoder = I2cEncoder::new(bus);

        encoder.update(0).unwrap();
        let before = encoder.state();

        assert_eq!(encoder.update(20), Err(EncoderError::Bus(MockBusError)));
        assert_eq!(encoder.state(), before);
        assert!(encoder.pressed());

        encoder.update(40).unwrap();
        assert_eq!(encoder.diff(), 5);
        assert!(!encoder.pressed());
    }

    #[test]
    fn test_pressed_from_inverted_bit() {
        let bus = MockDevice::new().reply(0, 0x00).reply(0, 0x01).reply(0, 0xFE);
        let mut encoder = I2cEncoder::new(bus);

        encoder.update(0).unwrap();
        assert!(encoder.pressed());
        encoder.update(1).unwrap();
        assert!(!encoder.pressed());
        // Only bit 0 matters
        encoder.update(2).unwrap();
        assert!(encoder.pressed());
    }

    #[test]
    fn test_reads_target_address() {
        let bus = MockDevice::new().reply(1, 1);
        let mut encoder = I2cEncoder::with_address(bus, 0x41, 10);
        encoder.update(0).unwrap();

        let bus = encoder.release();
        assert_eq!(bus.reads.as_slice(), &[0x41]);
    }

    #[test]
    fn test_is_due() {
        let bus = MockDevice::new().reply(0, 1);
        let mut encoder = I2cEncoder::with_address(bus, DEFAULT_ADDRESS, 20);

        assert!(encoder.is_due(0));
        encoder.update(100).unwrap();
        assert!(!encoder.is_due(100));
        assert!(!encoder.is_due(119));
        assert!(encoder.is_due(120));
    }

    #[test]
    fn test_failed_poll_does_not_reset_cadence() {
        let bus = MockDevice::new().reply(0, 1).fail();
        let mut encoder = I2cEncoder::with_address(bus, DEFAULT_ADDRESS, 20);
        encoder.update(0).unwrap();
        assert!(encoder.update(20).is_err());
        assert_eq!(encoder.state().last_poll_ms, Some(0));
        assert!(encoder.is_due(25));
    }

    #[test]
    fn test_set_led_writes_four_byte_frame() {
        let mut encoder = I2cEncoder::new(MockDevice::new());
        encoder.set_led(1, Rgb::new(0x10, 0x20, 0x30)).unwrap();

        let bus = encoder.release();
        assert_eq!(
            bus.led_register(DEFAULT_ADDRESS),
            Some(&[1u8, 0x10, 0x20, 0x30][..])
        );
    }

    #[test]
    fn test_set_led_error_surfaces() {
        let mut bus = MockDevice::new();
        bus.fail_writes = true;
        let mut encoder = I2cEncoder::new(bus);
        assert_eq!(
            encoder.set_led(0, Rgb::OFF),
            Err(EncoderError::Bus(MockBusError))
        );
    }

    #[test]
    fn test_accumulator_saturates() {
        let mut encoder = I2cEncoder::new(MockDevice::new().reply(127, 1));
        encoder.state.accumulated_delta = i32::MAX - 1;
        encoder.update(0).unwrap();
        assert_eq!(encoder.diff_peek(), i32::MAX);
    }

    #[test]
    fn test_error_display() {
        let err: EncoderError<MockBusError> = MockBusError.into();
        assert_eq!(std::format!("{}", err), "I2C error: MockBusError");
    }

    proptest! {
        #[test]
        fn prop_drain_equals_sum_of_successful_polls(
            polls in proptest::collection::vec(proptest::option::of(any::<i8>()), 0..32)
        ) {
            let mut bus = MockDevice::new();
            for poll in &polls {
                bus = match poll {
                    Some(delta) => bus.reply(*delta, 1),
                    None => bus.fail(),
                };
            }
            let mut encoder = I2cEncoder::new(bus);

            let mut expected = 0i32;
            for (t, poll) in polls.iter().enumerate() {
                let result = encoder.update(t as u64);
                match poll {
                    Some(delta) => {
                        prop_assert_eq!(result, Ok(*delta));
                        expected += i32::from(*delta);
                    }
                    None => prop_assert!(result.is_err()),
                }
                prop_assert_eq!(encoder.diff_peek(), expected);
            }
            prop_assert_eq!(encoder.diff(), expected);
            prop_assert_eq!(encoder.diff_peek(), 0);
        }
    }
}
