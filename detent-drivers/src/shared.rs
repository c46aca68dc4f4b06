//! Mutex-shared encoder source
//!
//! `I2cEncoder::update` and the GUI drain both need `&mut`. When the poll
//! runs in its own task, the encoder lives in a blocking mutex and both
//! sides go through it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use detent_core::EncoderSource;

/// Source handle over a shared mutex
pub struct SharedSource<'a, M: RawMutex, S> {
    mutex: &'a Mutex<M, RefCell<S>>,
}

impl<M: RawMutex, S> Clone for SharedSource<'_, M, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, S> Copy for SharedSource<'_, M, S> {}

impl<'a, M: RawMutex, S> SharedSource<'a, M, S> {
    pub fn new(mutex: &'a Mutex<M, RefCell<S>>) -> Self {
        Self { mutex }
    }

    /// Run `f` with exclusive access to the source (producer side)
    pub fn update_with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        self.mutex.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<M: RawMutex, S: EncoderSource> EncoderSource for SharedSource<'_, M, S> {
    fn diff(&mut self) -> i32 {
        self.mutex.lock(|cell| cell.borrow_mut().diff())
    }

    fn diff_peek(&self) -> i32 {
        self.mutex.lock(|cell| cell.borrow().diff_peek())
    }

    fn pressed(&self) -> bool {
        self.mutex.lock(|cell| cell.borrow().pressed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detent_core::{EncoderInputDriver, GroupId, I2cEncoder, IndevState};
    use detent_hal::I2cBus;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    /// Encoder board that always reports one step and a held button
    struct StepBus;

    impl I2cBus for StepBus {
        type Error = ();

        fn write(&mut self, _addr: u8, _bytes: &[u8]) -> Result<(), ()> {
            Ok(())
        }

        fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<(), ()> {
            buffer.copy_from_slice(&[1, 0, 0][..buffer.len()]);
            Ok(())
        }

        fn write_read(&mut self, addr: u8, _bytes: &[u8], buffer: &mut [u8]) -> Result<(), ()> {
            self.read(addr, buffer)
        }
    }

    #[test]
    fn test_poll_and_drain_through_mutex() {
        let mutex: Mutex<NoopRawMutex, _> = Mutex::new(RefCell::new(I2cEncoder::new(StepBus)));
        let poller = SharedSource::new(&mutex);
        let mut driver = EncoderInputDriver::with_group(SharedSource::new(&mutex), GroupId(0));

        for t in 0..4 {
            poller.update_with(|enc| enc.update(t * 20)).unwrap();
        }
        assert_eq!(driver.source().diff_peek(), 4);

        let reading = driver.read();
        assert_eq!(reading.diff, 4);
        assert_eq!(reading.state, IndevState::Pressed);
        assert_eq!(poller.diff_peek(), 0);
    }

    #[test]
    fn test_handles_are_copy() {
        let mutex: Mutex<NoopRawMutex, _> = Mutex::new(RefCell::new(I2cEncoder::new(StepBus)));
        let a = SharedSource::new(&mutex);
        let b = a;
        a.update_with(|enc| enc.update(0)).unwrap();
        assert_eq!(b.update_with(|enc| enc.state().accumulated_delta), 1);
    }
}
