/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Setup screen configuration.
//!
//! Deserialized from the `setup` key of the runtime config object. Every
//! field has a default so a missing or partial object is valid.

use serde::Deserialize;

pub const DEFAULT_START_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
pub const DEFAULT_SCHEDULE_REFRESH_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetupConfig {
    /// Initial value of the "join with mic and camera off" checkbox.
    pub join_muted_by_default: bool,
    /// `chrono` format pattern for the scheduled start time.
    pub start_time_format: String,
    /// How often the schedule is re-read while the screen is mounted.
    /// Zero disables polling.
    pub schedule_refresh_ms: u32,
    /// Show operation errors in a modal `window.alert` in addition to the
    /// inline banner.
    pub blocking_alerts: bool,
    /// `{start}` is replaced with the formatted start time.
    pub not_started_message: String,
    pub ended_message: String,
    pub ended_icon_url: Option<String>,
    pub no_devices_warning: String,
    pub join_failed_message: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            join_muted_by_default: false,
            start_time_format: DEFAULT_START_TIME_FORMAT.to_string(),
            schedule_refresh_ms: DEFAULT_SCHEDULE_REFRESH_MS,
            blocking_alerts: true,
            not_started_message:
                "Your Meeting has not started yet. It is scheduled for {start}".to_string(),
            ended_message: "The call has been ended by the host".to_string(),
            ended_icon_url: Some("/icons/call-ended.svg".to_string()),
            no_devices_warning: "No camera or microphone found. You can still join the call, \
                                 but your audio/video won't work."
                .to_string(),
            join_failed_message:
                "There was an error joining the call. Please check your permissions.".to_string(),
        }
    }
}

impl SetupConfig {
    pub fn not_started_title(&self, formatted_start: &str) -> String {
        self.not_started_message.replace("{start}", formatted_start)
    }
}
