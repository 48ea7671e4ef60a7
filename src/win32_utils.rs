//! Thin wrappers over the Win32 calls used by the app

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::Win32::Foundation::RECT;
use windows::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_GETMOUSESPEED, SPI_GETWORKAREA, SPI_SETMOUSESPEED, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
};

/// Read the global pointer speed (1-20)
pub fn get_mouse_speed() -> windows::core::Result<u32> {
    let mut speed: i32 = 0;
    // SAFETY: SPI_GETMOUSESPEED writes a single INT to pvParam.
    unsafe {
        SystemParametersInfoW(
            SPI_GETMOUSESPEED,
            0,
            Some(&mut speed as *mut i32 as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )?;
    }
    Ok(speed.max(0) as u32)
}

/// Write the global pointer speed, persisting it and broadcasting the change
pub fn set_mouse_speed(speed: u32) -> windows::core::Result<()> {
    // SAFETY: SPI_SETMOUSESPEED takes the value itself in pvParam, not a pointer to it.
    unsafe {
        SystemParametersInfoW(
            SPI_SETMOUSESPEED,
            0,
            Some(speed as usize as *mut c_void),
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        )
    }
}

/// Usable desktop area of the primary monitor (excludes the taskbar)
///
/// Returned as `(left, top, right, bottom)` in physical pixels.
pub fn work_area() -> windows::core::Result<(i32, i32, i32, i32)> {
    let mut rect = RECT::default();
    // SAFETY: SPI_GETWORKAREA writes a RECT to pvParam.
    unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rect as *mut RECT as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )?;
    }
    Ok((rect.left, rect.top, rect.right, rect.bottom))
}

/// Reuse the launching terminal's console so CLI output is visible
///
/// Release builds use the GUI subsystem and start without a console.
pub fn attach_parent_console() -> bool {
    // SAFETY: AttachConsole has no pointer arguments; failure just means no parent console.
    unsafe { AttachConsole(ATTACH_PARENT_PROCESS).is_ok() }
}
