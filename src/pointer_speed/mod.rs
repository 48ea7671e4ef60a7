//! Access to the OS-wide mouse pointer speed
//!
//! The profile controller only talks to a [`PointerSpeedPort`], so the real
//! system setting is never touched by tests:
//! - **SystemPointerSpeed**: the live Windows setting (unsupported elsewhere)
//! - **MemoryPointerSpeed**: an in-memory stand-in for tests and `--simulate`

pub mod memory;

pub use memory::MemoryPointerSpeed;

use tracing::{debug, info};

use crate::constants::speed;
use crate::error::PointerSpeedError;

/// Read/write access to the global pointer speed
pub trait PointerSpeedPort {
    /// Current pointer speed
    fn get_speed(&self) -> Result<u32, PointerSpeedError>;

    /// Apply a new pointer speed; rejects values outside 1..=20 before touching the OS
    fn set_speed(&mut self, value: u32) -> Result<(), PointerSpeedError>;
}

impl<P: PointerSpeedPort + ?Sized> PointerSpeedPort for Box<P> {
    fn get_speed(&self) -> Result<u32, PointerSpeedError> {
        (**self).get_speed()
    }

    fn set_speed(&mut self, value: u32) -> Result<(), PointerSpeedError> {
        (**self).set_speed(value)
    }
}

/// Range check shared by every adapter
pub fn validate_speed(value: u32) -> Result<u32, PointerSpeedError> {
    if (speed::MIN..=speed::MAX).contains(&value) {
        Ok(value)
    } else {
        Err(PointerSpeedError::InvalidArgument(value))
    }
}

/// The live system pointer speed
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPointerSpeed;

impl SystemPointerSpeed {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl PointerSpeedPort for SystemPointerSpeed {
    fn get_speed(&self) -> Result<u32, PointerSpeedError> {
        let value = crate::win32_utils::get_mouse_speed()
            .map_err(|e| PointerSpeedError::PlatformQuery(e.to_string()))?;
        debug!(speed = value, "Read system pointer speed");
        Ok(value)
    }

    fn set_speed(&mut self, value: u32) -> Result<(), PointerSpeedError> {
        let value = validate_speed(value)?;
        crate::win32_utils::set_mouse_speed(value)
            .map_err(|e| PointerSpeedError::PlatformUpdate(e.to_string()))?;
        info!(speed = value, "Applied system pointer speed");
        Ok(())
    }
}

#[cfg(not(windows))]
const UNSUPPORTED: &str = "pointer speed control is only available on Windows";

#[cfg(not(windows))]
impl PointerSpeedPort for SystemPointerSpeed {
    fn get_speed(&self) -> Result<u32, PointerSpeedError> {
        debug!("System pointer speed requested on unsupported platform");
        Err(PointerSpeedError::PlatformQuery(UNSUPPORTED.to_string()))
    }

    fn set_speed(&mut self, value: u32) -> Result<(), PointerSpeedError> {
        validate_speed(value)?;
        info!(speed = value, "Ignoring pointer speed change on unsupported platform");
        Err(PointerSpeedError::PlatformUpdate(UNSUPPORTED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_speed_accepts_full_range() {
        for value in speed::MIN..=speed::MAX {
            assert_eq!(validate_speed(value).unwrap(), value);
        }
    }

    #[test]
    fn test_validate_speed_rejects_out_of_range() {
        for value in [0, 21, 100, u32::MAX] {
            assert!(matches!(
                validate_speed(value),
                Err(PointerSpeedError::InvalidArgument(v)) if v == value
            ));
        }
    }

    #[test]
    fn test_system_port_rejects_invalid_before_os_call() {
        let mut port = SystemPointerSpeed::new();
        assert!(matches!(
            port.set_speed(0),
            Err(PointerSpeedError::InvalidArgument(0))
        ));
    }

    #[test]
    fn test_boxed_port_forwards() {
        let mut port: Box<dyn PointerSpeedPort> = Box::new(MemoryPointerSpeed::new(10));
        port.set_speed(4).unwrap();
        assert_eq!(port.get_speed().unwrap(), 4);
    }
}
