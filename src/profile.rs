//! Two-profile pointer speed controller
//!
//! Tracks which profile (if any) matches the live pointer speed and routes
//! UI actions to the pointer speed port and the settings store.

use std::fmt;
use tracing::{debug, error, info, warn};

use crate::error::ControllerError;
use crate::pointer_speed::{PointerSpeedPort, validate_speed};
use crate::settings::{SettingsRecord, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    One,
    Two,
}

impl ProfileId {
    pub const ALL: [ProfileId; 2] = [ProfileId::One, ProfileId::Two];

    pub fn number(self) -> u8 {
        match self {
            ProfileId::One => 1,
            ProfileId::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(ProfileId::One),
            2 => Some(ProfileId::Two),
            _ => None,
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Profile {}", self.number())
    }
}

/// Which profile currently drives the system pointer speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileState {
    #[default]
    Inactive,
    Profile1Active,
    Profile2Active,
}

impl ProfileState {
    pub fn active(self) -> Option<ProfileId> {
        match self {
            ProfileState::Inactive => None,
            ProfileState::Profile1Active => Some(ProfileId::One),
            ProfileState::Profile2Active => Some(ProfileId::Two),
        }
    }

    fn activated(profile: ProfileId) -> Self {
        match profile {
            ProfileId::One => ProfileState::Profile1Active,
            ProfileId::Two => ProfileState::Profile2Active,
        }
    }

    /// Match a live speed against the stored profiles; profile 1 wins a tie
    pub fn derive(current_speed: u32, record: &SettingsRecord) -> Self {
        if current_speed == record.profile1_speed {
            ProfileState::Profile1Active
        } else if current_speed == record.profile2_speed {
            ProfileState::Profile2Active
        } else {
            ProfileState::Inactive
        }
    }
}

pub struct ProfileController<P: PointerSpeedPort> {
    port: P,
    store: SettingsStore,
    record: SettingsRecord,
    state: ProfileState,
    dirty: bool,
}

impl<P: PointerSpeedPort> ProfileController<P> {
    /// Startup sequence: prepare storage, load settings and detect the active profile
    ///
    /// Never fails; storage, parse and OS query errors are logged and the
    /// controller starts from defaults and/or `Inactive`.
    pub fn start(port: P, store: SettingsStore) -> Self {
        if let Err(e) = store.ensure_storage() {
            error!(error = %e, "Failed to prepare settings storage");
        }
        let record = store.load_or_default();

        let state = match port.get_speed() {
            Ok(speed) => {
                let state = ProfileState::derive(speed, &record);
                info!(speed, state = ?state, "Detected active profile");
                state
            }
            Err(e) => {
                error!(error = %e, "Failed to read pointer speed, no profile active");
                ProfileState::Inactive
            }
        };

        Self {
            port,
            store,
            record,
            state,
            dirty: false,
        }
    }

    pub fn state(&self) -> ProfileState {
        self.state
    }

    pub fn active(&self) -> Option<ProfileId> {
        self.state.active()
    }

    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn speed(&self, profile: ProfileId) -> u32 {
        match profile {
            ProfileId::One => self.record.profile1_speed,
            ProfileId::Two => self.record.profile2_speed,
        }
    }

    fn speed_mut(&mut self, profile: ProfileId) -> &mut u32 {
        match profile {
            ProfileId::One => &mut self.record.profile1_speed,
            ProfileId::Two => &mut self.record.profile2_speed,
        }
    }

    /// Whether the profile's Apply action is offered (false only for the active profile)
    pub fn can_apply(&self, profile: ProfileId) -> bool {
        self.active() != Some(profile)
    }

    pub fn notifications_disabled(&self) -> bool {
        self.record.notifications_disabled
    }

    /// In-memory edits not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current live pointer speed
    pub fn current_speed(&self) -> Result<u32, ControllerError> {
        Ok(self.port.get_speed()?)
    }

    /// Make `profile` the live pointer speed and persist
    ///
    /// On a pointer speed failure nothing changes. A save failure is returned
    /// after the profile has already become active.
    pub fn apply(&mut self, profile: ProfileId) -> Result<(), ControllerError> {
        self.apply_speed(profile, self.speed(profile))
    }

    /// Apply `profile` at `speed`, storing `speed` as its value on success
    ///
    /// Used by the GUI so an unset profile applies whatever its slider shows.
    pub fn apply_speed(&mut self, profile: ProfileId, speed: u32) -> Result<(), ControllerError> {
        if let Err(e) = self.port.set_speed(speed) {
            warn!(%profile, speed, error = %e, "Failed to apply profile");
            return Err(e.into());
        }

        if self.speed(profile) != speed {
            *self.speed_mut(profile) = speed;
            self.dirty = true;
        }
        self.state = ProfileState::activated(profile);
        info!(%profile, speed, "Applied profile");
        self.save()
    }

    /// Change a profile's stored speed
    ///
    /// Out-of-range values are rejected before anything changes. Editing the
    /// active profile forwards the value to the OS first and keeps the old
    /// value if that fails. Editing the other profile only updates memory.
    pub fn adjust(&mut self, profile: ProfileId, value: u32) -> Result<(), ControllerError> {
        let value = validate_speed(value)?;
        if self.speed(profile) == value {
            return Ok(());
        }

        if self.active() != Some(profile) {
            *self.speed_mut(profile) = value;
            self.dirty = true;
            debug!(%profile, speed = value, "Stored speed for inactive profile");
            return Ok(());
        }

        self.port.set_speed(value)?;
        *self.speed_mut(profile) = value;
        self.dirty = true;
        info!(%profile, speed = value, "Updated active profile speed");
        self.save()
    }

    pub fn set_notifications_disabled(&mut self, disabled: bool) -> Result<(), ControllerError> {
        self.record.notifications_disabled = disabled;
        self.dirty = true;
        info!(notifications_disabled = disabled, "Changed notification preference");
        self.save()
    }

    /// Persist pending in-memory edits, if any
    pub fn flush(&mut self) -> Result<(), ControllerError> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), ControllerError> {
        self.store.save(&self.record)?;
        self.dirty = false;
        Ok(())
    }
}
