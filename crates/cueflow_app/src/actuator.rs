// SPDX-License-Identifier: MIT OR Apache-2.0
//! Actuator implementations for the physical mechanism.
//!
//! The executor only sees the [`Actuator`] trait; which implementation
//! backs it is a configuration choice, so the core never depends on a
//! concrete hardware binding.

use cueflow_timeline::{Actuator, ExecuteError};
use std::fs;
use std::path::PathBuf;

/// Hardware stand-in that only logs. The default.
pub struct NullActuator;

impl Actuator for NullActuator {
    fn open(&mut self) -> Result<(), ExecuteError> {
        tracing::info!("opening mechanism (no hardware attached)");
        Ok(())
    }

    fn close(&mut self) -> Result<(), ExecuteError> {
        tracing::info!("closing mechanism (no hardware attached)");
        Ok(())
    }
}

/// Drives a GPIO pin through the sysfs interface. Writes are best-effort
/// and fast; failures surface as [`ExecuteError::Actuator`] and are logged
/// by the executor without stalling the schedule.
pub struct GpioActuator {
    value_path: PathBuf,
}

impl GpioActuator {
    /// Target an exported GPIO pin
    pub fn new(pin: u32) -> Self {
        Self {
            value_path: PathBuf::from(format!("/sys/class/gpio/gpio{pin}/value")),
        }
    }

    fn write(&self, value: &str) -> Result<(), ExecuteError> {
        fs::write(&self.value_path, value).map_err(|err| {
            ExecuteError::Actuator(format!("{}: {err}", self.value_path.display()))
        })
    }
}

impl Actuator for GpioActuator {
    fn open(&mut self) -> Result<(), ExecuteError> {
        tracing::debug!(pin = %self.value_path.display(), "gpio high");
        self.write("1")
    }

    fn close(&mut self) -> Result<(), ExecuteError> {
        tracing::debug!(pin = %self.value_path.display(), "gpio low");
        self.write("0")
    }
}
