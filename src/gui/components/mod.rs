pub mod profile_panel;
pub mod toast_view;
