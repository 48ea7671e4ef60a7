//! Command-line interface
//!
//! Without a subcommand the GUI starts. The subcommands run one controller
//! action headlessly and exit.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::constants::{speed, toast};
use crate::gui::GuiOptions;
use crate::pointer_speed::PointerSpeedPort;
use crate::profile::{ProfileController, ProfileId};
use crate::toast::ToastOptions;

#[derive(Parser, Debug)]
#[command(name = "mouse-profiles", version, about = "Switch the pointer speed between two saved profiles")]
pub struct Cli {
    /// Directory holding settings.json (default: <config dir>/MouseProfiles)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Use an in-memory pointer speed instead of the system setting
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Start hidden in the tray
    #[arg(long)]
    pub minimized: bool,

    /// How long the tray toast stays fully visible
    #[arg(long, value_name = "MS", default_value_t = toast::HOLD_MS)]
    pub toast_hold_ms: u64,

    /// How long the tray toast takes to fade out
    #[arg(long, value_name = "MS", default_value_t = toast::FADE_MS)]
    pub toast_fade_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the live pointer speed and both profiles
    Status,

    /// Apply a saved profile
    Apply {
        #[arg(value_parser = parse_profile)]
        profile: ProfileId,
    },

    /// Change a profile's saved speed (applied immediately if it is active)
    Set {
        #[arg(value_parser = parse_profile)]
        profile: ProfileId,
        #[arg(value_parser = clap::value_parser!(u32).range(speed::MIN as i64..=speed::MAX as i64))]
        speed: u32,
    },
}

fn parse_profile(value: &str) -> Result<ProfileId, String> {
    value
        .parse::<u8>()
        .ok()
        .and_then(ProfileId::from_number)
        .ok_or_else(|| format!("profile must be 1 or 2, got '{value}'"))
}

impl Cli {
    pub fn gui_options(&self) -> GuiOptions {
        GuiOptions {
            start_minimized: self.minimized,
            toast: ToastOptions {
                hold: Duration::from_millis(self.toast_hold_ms),
                fade: Duration::from_millis(self.toast_fade_ms),
                ..ToastOptions::default()
            },
        }
    }
}

pub fn run_command<P: PointerSpeedPort>(
    command: &Command,
    controller: &mut ProfileController<P>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Status => {
            match controller.current_speed() {
                Ok(current) => writeln!(out, "Pointer speed: {current}")?,
                Err(e) => writeln!(out, "Pointer speed: unavailable ({e})")?,
            }
            for profile in ProfileId::ALL {
                let marker = if controller.active() == Some(profile) { " (active)" } else { "" };
                writeln!(out, "{profile}: {}{marker}", controller.speed(profile))?;
            }
            let notifications = if controller.notifications_disabled() { "disabled" } else { "enabled" };
            writeln!(out, "Notifications: {notifications}")?;
            writeln!(out, "Settings: {}", controller.store().path().display())?;
        }
        Command::Apply { profile } => {
            controller
                .apply(*profile)
                .with_context(|| format!("Failed to apply {profile}"))?;
            writeln!(out, "{profile} applied (speed {})", controller.speed(*profile))?;
        }
        Command::Set { profile, speed } => {
            controller
                .adjust(*profile, *speed)
                .with_context(|| format!("Failed to update {profile}"))?;
            controller.flush().context("Failed to save settings")?;
            writeln!(out, "{profile} set to {speed}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer_speed::MemoryPointerSpeed;
    use crate::settings::{SettingsRecord, SettingsStore};
    use tempfile::TempDir;

    fn controller(p1: u32, p2: u32, live: u32) -> (TempDir, ProfileController<MemoryPointerSpeed>) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        store
            .save(&SettingsRecord {
                profile1_speed: p1,
                profile2_speed: p2,
                notifications_disabled: false,
            })
            .unwrap();
        (dir, ProfileController::start(MemoryPointerSpeed::new(live), store))
    }

    #[test]
    fn test_parse_defaults_to_gui() {
        let cli = Cli::try_parse_from(["mouse-profiles"]).unwrap();
        assert_eq!(cli.command, None);
        let options = cli.gui_options();
        assert!(!options.start_minimized);
        assert_eq!(options.toast, ToastOptions::default());
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["mouse-profiles", "apply", "2"]).unwrap();
        assert_eq!(cli.command, Some(Command::Apply { profile: ProfileId::Two }));

        let cli = Cli::try_parse_from(["mouse-profiles", "set", "1", "15", "--simulate"]).unwrap();
        assert!(cli.simulate);
        assert_eq!(
            cli.command,
            Some(Command::Set { profile: ProfileId::One, speed: 15 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_profile_and_speed() {
        assert!(Cli::try_parse_from(["mouse-profiles", "apply", "3"]).is_err());
        assert!(Cli::try_parse_from(["mouse-profiles", "set", "1", "0"]).is_err());
        assert!(Cli::try_parse_from(["mouse-profiles", "set", "1", "21"]).is_err());
    }

    #[test]
    fn test_toast_timing_flags() {
        let cli = Cli::try_parse_from([
            "mouse-profiles",
            "--minimized",
            "--toast-hold-ms",
            "1000",
            "--toast-fade-ms",
            "0",
        ])
        .unwrap();
        let options = cli.gui_options();
        assert!(options.start_minimized);
        assert_eq!(options.toast.hold, Duration::from_millis(1000));
        assert_eq!(options.toast.fade, Duration::ZERO);
    }

    #[test]
    fn test_status_output() {
        let (_dir, mut controller) = controller(4, 12, 12);
        let mut out = Vec::new();
        run_command(&Command::Status, &mut controller, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pointer speed: 12"));
        assert!(text.contains("Profile 1: 4\n"));
        assert!(text.contains("Profile 2: 12 (active)"));
        assert!(text.contains("Notifications: enabled"));
    }

    #[test]
    fn test_apply_command() {
        let (_dir, mut controller) = controller(4, 12, 10);
        let mut out = Vec::new();
        run_command(&Command::Apply { profile: ProfileId::One }, &mut controller, &mut out).unwrap();

        assert_eq!(controller.port().get_speed().unwrap(), 4);
        assert_eq!(String::from_utf8(out).unwrap(), "Profile 1 applied (speed 4)\n");
    }

    #[test]
    fn test_apply_command_reports_failure() {
        let (_dir, mut controller) = controller(0, 12, 10);
        let mut out = Vec::new();
        let err = run_command(&Command::Apply { profile: ProfileId::One }, &mut controller, &mut out)
            .unwrap_err();

        assert!(format!("{err:#}").contains("outside 1..=20"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_set_command_persists_inactive_profile() {
        let (_dir, mut controller) = controller(4, 12, 10);
        let mut out = Vec::new();
        let command = Command::Set { profile: ProfileId::Two, speed: 7 };
        run_command(&command, &mut controller, &mut out).unwrap();

        assert!(controller.port().history().is_empty());
        assert_eq!(controller.store().load().unwrap().profile2_speed, 7);
    }
}
