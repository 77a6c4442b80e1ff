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

//! Keeps the call's camera and microphone in line with the "join muted"
//! checkbox.
//!
//! Sync runs only when its key, `(session id, join_muted)`, differs from the
//! last key applied. Callers invoke it from the checkbox handler and once on
//! mount; there is no implicit re-run.

use crate::call::CallSession;
use crate::devices::{DeviceAvailability, DeviceEnumerator};
use crate::error::SetupError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncKey {
    pub session_id: String,
    pub join_muted: bool,
}

impl SyncKey {
    pub fn new(session: &dyn CallSession, join_muted: bool) -> Self {
        Self {
            session_id: session.id().to_string(),
            join_muted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Camera and microphone were enabled.
    Enabled,
    /// Camera and microphone were disabled.
    Disabled,
    /// A camera or microphone is missing, so nothing was touched.
    Skipped(DeviceAvailability),
    /// The key matched the last applied key.
    Unchanged,
}

/// Remembers the last applied [`SyncKey`].
#[derive(Debug, Default)]
pub struct DeviceSync {
    last_applied: Option<SyncKey>,
}

impl DeviceSync {
    /// Claim `key` for a run. Returns `false` when it was already applied.
    pub fn claim(&mut self, key: &SyncKey) -> bool {
        if self.last_applied.as_ref() == Some(key) {
            return false;
        }
        self.last_applied = Some(key.clone());
        true
    }

    /// Forget the last key so the next claim always runs.
    pub fn invalidate(&mut self) {
        self.last_applied = None;
    }

    pub fn last_applied(&self) -> Option<&SyncKey> {
        self.last_applied.as_ref()
    }
}

/// Enable or disable both capture devices to match `join_muted`.
pub async fn sync_devices(
    session: &dyn CallSession,
    devices: &dyn DeviceEnumerator,
    join_muted: bool,
) -> Result<SyncOutcome, SetupError> {
    let availability = devices.availability().await?;
    if !availability.is_complete() {
        log::warn!(
            "No camera or microphone found (camera: {}, microphone: {}), skipping device sync",
            availability.has_camera,
            availability.has_microphone
        );
        return Ok(SyncOutcome::Skipped(availability));
    }

    if join_muted {
        session.camera().disable().await?;
        session.microphone().disable().await?;
        log::debug!("camera and microphone disabled for call {}", session.id());
        Ok(SyncOutcome::Disabled)
    } else {
        session.camera().enable().await?;
        session.microphone().enable().await?;
        log::debug!("camera and microphone enabled for call {}", session.id());
        Ok(SyncOutcome::Enabled)
    }
}
