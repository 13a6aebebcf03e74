//! Test doubles for the I2C bus and the delay provider.
//!
//! `MockI2c` behaves like the sensor's register file: the first written byte
//! of a transaction sets the register pointer, following bytes are stored
//! with auto-increment, and reads return bytes from the pointer onwards.
//! Bus traffic and delays go to one shared event log so tests can check
//! both counts and ordering.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::registers::{DEFAULT_ADDRESS, EXPECTED_PART_ID, PART_ID};

pub const REGISTER_COUNT: usize = 0x30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Register pointer set (write of the address byte alone)
    Select(u8),
    /// Register written with a value
    Write(u8, u8),
    /// Bytes read starting at a register
    Read(u8, usize),
    /// Delay in nanoseconds
    Delay(u64),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct MockI2c {
    pub address: u8,
    pub registers: [u8; REGISTER_COUNT],
    pub fail: bool,
    pointer: usize,
    log: EventLog,
}

impl MockI2c {
    pub fn new() -> Self {
        let mut registers = [0u8; REGISTER_COUNT];
        registers[PART_ID as usize] = EXPECTED_PART_ID;
        Self {
            address: DEFAULT_ADDRESS,
            registers,
            fail: false,
            pointer: 0,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_part_id(part_id: u8) -> Self {
        let mut mock = Self::new();
        mock.registers[PART_ID as usize] = part_id;
        mock
    }

    pub fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    /// Number of register writes, not counting pointer selection
    pub fn write_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Write(..)))
            .count()
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: self.log.clone(),
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Bus);
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let (register, data) = bytes.split_first().ok_or(ErrorKind::Other)?;
                    self.pointer = *register as usize;
                    if data.is_empty() {
                        self.log.borrow_mut().push(Event::Select(*register));
                    }
                    for byte in data.iter() {
                        let slot = self.registers.get_mut(self.pointer).ok_or(ErrorKind::Other)?;
                        *slot = *byte;
                        self.log
                            .borrow_mut()
                            .push(Event::Write(self.pointer as u8, *byte));
                        self.pointer += 1;
                    }
                }
                Operation::Read(buffer) => {
                    let start = self.pointer;
                    let end = start + buffer.len();
                    let source = self.registers.get(start..end).ok_or(ErrorKind::Other)?;
                    buffer.copy_from_slice(source);
                    self.log
                        .borrow_mut()
                        .push(Event::Read(start as u8, buffer.len()));
                    self.pointer = end;
                }
            }
        }
        Ok(())
    }
}

pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    pub fn total_ns(&self) -> u64 {
        self.log
            .borrow()
            .iter()
            .map(|event| match event {
                Event::Delay(ns) => *ns,
                _ => 0,
            })
            .sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut log = self.log.borrow_mut();
        // Merge consecutive chunks so one logical delay shows up as one event
        if let Some(Event::Delay(total)) = log.last_mut() {
            *total += ns as u64;
        } else {
            log.push(Event::Delay(ns as u64));
        }
    }
}
