//! Mock interface implementation for testing the LSM303DLHC drivers
//!
//! One [`MockInterface`] simulates the register space of one of the two
//! devices on the package. Reads and writes behave like the silicon where the
//! drivers depend on it: the accelerometer only auto-increments when the
//! sub-address has bit 7 set, `BOOT` clears itself, reading the output
//! registers clears `STATUS_REG_A`, and the FIFO is a queue drained by
//! sample reads.

use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

const WHO_AM_I_A: u8 = 0x0F;
const CTRL_REG1_A: u8 = 0x20;
const CTRL_REG5_A: u8 = 0x24;
const STATUS_REG_A: u8 = 0x27;
const OUT_X_L_A: u8 = 0x28;
const FIFO_CTRL_REG_A: u8 = 0x2E;
const FIFO_SRC_REG_A: u8 = 0x2F;

const CRA_REG_M: u8 = 0x00;
const CRB_REG_M: u8 = 0x01;
const MR_REG_M: u8 = 0x02;
const OUT_X_H_M: u8 = 0x03;
const IRA_REG_M: u8 = 0x0A;
const IRB_REG_M: u8 = 0x0B;
const IRC_REG_M: u8 = 0x0C;
const TEMP_OUT_H_M: u8 = 0x31;

const FIFO_DEPTH: usize = 32;

/// Which device the mock simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// Accelerometer (0x19)
    Accelerometer,
    /// Magnetometer (0x1E)
    Magnetometer,
}

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Single register read
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Single register write
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
    /// Multi-byte read
    BurstRead {
        /// Sub-address as sent on the bus (including the auto-increment flag)
        address: u8,
        /// Number of bytes read
        length: usize,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    chip: Chip,

    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,

    /// Sample sequence, one entry consumed per output register burst
    sample_sequence: Vec<[i16; 3]>,
    sample_sequence_idx: usize,

    /// Accelerometer FIFO content, oldest first
    fifo: VecDeque<[i16; 3]>,

    /// Magnetometer continuous mode stall simulation
    simulate_stall: bool,
    stalled: bool,
}

impl MockState {
    fn new(chip: Chip) -> Self {
        let mut state = Self {
            chip,
            registers: HashMap::new(),
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            sample_sequence: Vec::new(),
            sample_sequence_idx: 0,
            fifo: VecDeque::new(),
            simulate_stall: false,
            stalled: false,
        };

        // Power-on register values
        match chip {
            Chip::Accelerometer => {
                state.registers.insert(WHO_AM_I_A, 0x33);
                state.registers.insert(CTRL_REG1_A, 0x07);
            }
            Chip::Magnetometer => {
                state.registers.insert(IRA_REG_M, 0x48);
                state.registers.insert(IRB_REG_M, 0x34);
                state.registers.insert(IRC_REG_M, 0x33);
                state.registers.insert(CRA_REG_M, 0x10);
                state.registers.insert(CRB_REG_M, 0x20);
                state.registers.insert(MR_REG_M, 0x03);
            }
        }

        state
    }

    fn register(&self, address: u8) -> u8 {
        self.registers.get(&address).copied().unwrap_or(0)
    }

    fn fifo_enabled(&self) -> bool {
        self.register(CTRL_REG5_A) & 0x40 != 0 && self.register(FIFO_CTRL_REG_A) & 0xC0 != 0
    }

    /// `FIFO_SRC_REG_A` derived from the queue and the watermark
    fn fifo_source(&self) -> u8 {
        let len = self.fifo.len();
        let threshold = usize::from(self.register(FIFO_CTRL_REG_A) & 0x1F);

        let mut value = (len.min(31) as u8) & 0x1F;
        if len == 0 {
            value |= 0x20;
        }
        if len >= FIFO_DEPTH {
            value |= 0x40;
        }
        if len > 0 && len >= threshold {
            value |= 0x80;
        }
        value
    }

    /// Set accelerometer data as 12-bit values (left-justified, little-endian)
    fn set_accel_data(&mut self, x: i16, y: i16, z: i16) {
        for (i, value) in [x, y, z].into_iter().enumerate() {
            let [low, high] = (value << 4).to_le_bytes();
            self.registers.insert(OUT_X_L_A + 2 * i as u8, low);
            self.registers.insert(OUT_X_L_A + 2 * i as u8 + 1, high);
        }
    }

    /// Set magnetometer data (X, Z, Y order, big-endian)
    fn set_mag_data(&mut self, x: i16, y: i16, z: i16) {
        for (i, value) in [x, z, y].into_iter().enumerate() {
            let [high, low] = value.to_be_bytes();
            self.registers.insert(OUT_X_H_M + 2 * i as u8, high);
            self.registers.insert(OUT_X_H_M + 2 * i as u8 + 1, low);
        }
    }

    fn set_sample(&mut self, [x, y, z]: [i16; 3]) {
        match self.chip {
            Chip::Accelerometer => self.set_accel_data(x, y, z),
            Chip::Magnetometer => self.set_mag_data(x, y, z),
        }
    }

    /// Advance the sample sequence and update the output registers
    fn advance_sample_sequence(&mut self) {
        if !self.sample_sequence.is_empty() {
            let sample = self.sample_sequence[self.sample_sequence_idx];
            self.set_sample(sample);
            self.sample_sequence_idx = (self.sample_sequence_idx + 1) % self.sample_sequence.len();
        }
    }

    /// Latch the next sample before the output registers are read
    fn before_output_read(&mut self) {
        match self.chip {
            Chip::Accelerometer => {
                if self.fifo_enabled() {
                    if let Some([x, y, z]) = self.fifo.pop_front() {
                        self.set_accel_data(x, y, z);
                    }
                } else {
                    self.advance_sample_sequence();
                }
                self.registers.insert(STATUS_REG_A, 0x00);
            }
            Chip::Magnetometer => {
                if !self.stalled {
                    self.advance_sample_sequence();
                    self.stalled = self.simulate_stall;
                }
            }
        }
    }

    fn after_write(&mut self, address: u8, value: u8) {
        match (self.chip, address) {
            (Chip::Accelerometer, CTRL_REG5_A) => {
                // BOOT clears itself once the reboot is done
                self.registers.insert(CTRL_REG5_A, value & !0x80);
            }
            (Chip::Accelerometer, FIFO_CTRL_REG_A) if value & 0xC0 == 0 => {
                // Bypass mode empties the FIFO
                self.fifo.clear();
            }
            (Chip::Magnetometer, MR_REG_M) if value & 0x03 == 0 => {
                self.stalled = false;
            }
            _ => {}
        }
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

#[allow(dead_code)]
impl MockInterface {
    /// Create a mock accelerometer with power-on register values
    pub fn accelerometer() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new(Chip::Accelerometer))),
        }
    }

    /// Create a mock magnetometer with power-on register values
    pub fn magnetometer() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new(Chip::Magnetometer))),
        }
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state.borrow().register(address)
    }

    /// Set accelerometer data as 12-bit values (will be returned on next read)
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_accel_data(x, y, z);
    }

    /// Set magnetometer data (will be returned on next read)
    pub fn set_mag_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_mag_data(x, y, z);
    }

    /// Set the temperature as a 12-bit value
    pub fn set_temperature(&self, raw: i16) {
        let [high, low] = (raw << 4).to_be_bytes();
        let mut state = self.state.borrow_mut();
        state.registers.insert(TEMP_OUT_H_M, high);
        state.registers.insert(TEMP_OUT_H_M + 1, low);
    }

    /// Set a sequence of samples, one consumed per output register read
    pub fn set_sample_sequence(&self, sequence: Vec<[i16; 3]>) {
        let mut state = self.state.borrow_mut();
        state.sample_sequence = sequence;
        state.sample_sequence_idx = 0;
    }

    /// Store a new accelerometer sample in the FIFO
    ///
    /// When the FIFO is full the oldest sample is dropped, as in stream mode.
    pub fn push_fifo_sample(&self, sample: [i16; 3]) {
        let mut state = self.state.borrow_mut();
        if state.fifo.len() == FIFO_DEPTH {
            state.fifo.pop_front();
        }
        state.fifo.push_back(sample);
        state.registers.insert(STATUS_REG_A, 0x08);
    }

    /// Number of samples stored in the FIFO
    pub fn fifo_len(&self) -> usize {
        self.state.borrow().fifo.len()
    }

    /// Simulate the magnetometer stalling after the first read in continuous mode
    pub fn simulate_continuous_mode_stall(&self, enable: bool) {
        self.state.borrow_mut().simulate_stall = enable;
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Values written to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister { address: a, value } if *a == address => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Count write operations
    pub fn write_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::WriteRegister { .. }))
            .count()
    }

    /// Count burst reads
    pub fn burst_read_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::BurstRead { .. }))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        if read_data.len() == 1 {
            let value = match (state.chip, address) {
                (Chip::Accelerometer, FIFO_SRC_REG_A) => state.fifo_source(),
                _ => state.register(address),
            };
            read_data[0] = value;
            state
                .operations
                .push(Operation::ReadRegister { address, value });
            return Ok(());
        }

        state.operations.push(Operation::BurstRead {
            address,
            length: read_data.len(),
        });

        let (start, auto_increment) = match state.chip {
            Chip::Accelerometer => (address & 0x7F, address & 0x80 != 0),
            Chip::Magnetometer => (address, true),
        };

        let output_start = match state.chip {
            Chip::Accelerometer => OUT_X_L_A,
            Chip::Magnetometer => OUT_X_H_M,
        };
        if start == output_start {
            state.before_output_read();
        }

        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = if auto_increment {
                start.wrapping_add(i as u8)
            } else {
                start
            };
            *byte = state.register(reg_addr);
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        // Write to registers
        for (i, &byte) in write_data.iter().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            state.registers.insert(reg_addr, byte);

            state.operations.push(Operation::WriteRegister {
                address: reg_addr,
                value: byte,
            });

            state.after_write(reg_addr, byte);
        }

        Ok(())
    }
}
