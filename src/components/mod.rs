pub mod app;
pub mod ar_view;
pub mod asset_picker;
pub mod session_controls;
pub mod settings_modal;
pub mod status_overlay;
