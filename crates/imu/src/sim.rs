//! Simulated register bus (no hardware required)

use crate::driver::RegisterBus;
use crate::frame::{RawFrame, FRAME_LEN};
use crate::register::{self, AccelRange};
use crate::ImuError;
use std::collections::VecDeque;
use tracing::info;

/// Bus that answers burst reads from a script, falling back to a rest frame
#[derive(Debug, Clone)]
pub struct SimulatedBus {
    rest: RawFrame,
    script: VecDeque<RawFrame>,
    writes: Vec<(u8, u8)>,
    failures: usize,
}

impl SimulatedBus {
    /// Stationary, level device: +1 g on Z, no rotation
    pub fn level(range: AccelRange) -> Self {
        info!("Creating simulated IMU bus");
        Self {
            rest: RawFrame {
                accel_z: range.lsb_per_g() as i16,
                ..Default::default()
            },
            script: VecDeque::new(),
            writes: Vec::new(),
            failures: 0,
        }
    }

    /// Replace the frame returned once the script is exhausted
    pub fn set_rest_frame(&mut self, frame: RawFrame) {
        self.rest = frame;
    }

    /// Queue a frame for the next burst read
    pub fn push_frame(&mut self, frame: RawFrame) {
        self.script.push_back(frame);
    }

    /// Make the next `count` reads fail
    pub fn fail_next_reads(&mut self, count: usize) {
        self.failures = count;
    }

    /// Register writes seen so far
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl RegisterBus for SimulatedBus {
    fn write_register(&mut self, _address: u8, register: u8, value: u8) -> Result<(), ImuError> {
        self.writes.push((register, value));
        Ok(())
    }

    fn read_registers(&mut self, _address: u8, reg: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ImuError::Bus("simulated NACK".to_string()));
        }
        if reg != register::ACCEL_XOUT_H || buf.len() != FRAME_LEN {
            return Err(ImuError::ShortRead {
                expected: FRAME_LEN,
                actual: buf.len(),
            });
        }

        let frame = self.script.pop_front().unwrap_or(self.rest);
        buf.copy_from_slice(&frame.encode());
        Ok(())
    }
}
