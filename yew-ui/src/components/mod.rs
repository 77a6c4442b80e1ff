pub mod call_room;
pub mod config_error;
pub mod device_settings;
pub mod meeting_setup;
pub mod setup_alert;
pub mod video_preview;
