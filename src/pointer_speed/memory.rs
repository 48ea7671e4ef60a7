use tracing::info;

use super::{PointerSpeedPort, validate_speed};
use crate::error::PointerSpeedError;

/// In-memory pointer speed
///
/// Records every accepted `set_speed` so tests can assert on how often the
/// OS would have been touched. Failures can be injected per direction.
#[derive(Debug, Clone)]
pub struct MemoryPointerSpeed {
    speed: u32,
    history: Vec<u32>,
    fail_query: bool,
    fail_update: bool,
}

impl MemoryPointerSpeed {
    pub fn new(speed: u32) -> Self {
        Self {
            speed,
            history: Vec::new(),
            fail_query: false,
            fail_update: false,
        }
    }

    /// Make every `get_speed` fail with `PlatformQuery`
    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Make every in-range `set_speed` fail with `PlatformUpdate`
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Values passed to successful `set_speed` calls, oldest first
    pub fn history(&self) -> &[u32] {
        &self.history
    }
}

impl PointerSpeedPort for MemoryPointerSpeed {
    fn get_speed(&self) -> Result<u32, PointerSpeedError> {
        if self.fail_query {
            return Err(PointerSpeedError::PlatformQuery("simulated failure".to_string()));
        }
        Ok(self.speed)
    }

    fn set_speed(&mut self, value: u32) -> Result<(), PointerSpeedError> {
        let value = validate_speed(value)?;
        if self.fail_update {
            return Err(PointerSpeedError::PlatformUpdate("simulated failure".to_string()));
        }
        self.speed = value;
        self.history.push(value);
        info!(speed = value, "Applied simulated pointer speed");
        Ok(())
    }
}
