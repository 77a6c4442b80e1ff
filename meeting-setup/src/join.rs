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

//! The join action.

use crate::call::CallSession;
use crate::devices::{DeviceAvailability, DeviceEnumerator};
use crate::error::SetupError;
use crate::notify::{Notice, Notifier};

/// What a successful join found on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinReport {
    pub availability: DeviceAvailability,
}

/// Join `session`, best effort with respect to missing hardware.
///
/// Missing devices never fail the join: with no devices at all a warning is
/// raised, and each absent device is explicitly disabled so the call handle
/// does not try to open it.
pub async fn join_call(
    session: &dyn CallSession,
    devices: &dyn DeviceEnumerator,
    notifier: &dyn Notifier,
    no_devices_warning: &str,
) -> Result<JoinReport, SetupError> {
    let availability = devices.availability().await?;

    if availability.is_empty() {
        log::warn!("joining call {} without camera or microphone", session.id());
        notifier.notify(Notice::warning(no_devices_warning));
    }

    if !availability.has_camera {
        session.camera().disable().await?;
    }
    if !availability.has_microphone {
        session.microphone().disable().await?;
    }

    session.join().await?;
    log::info!("joined call {}", session.id());

    Ok(JoinReport { availability })
}
