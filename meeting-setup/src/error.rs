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

//! Error types for meeting setup.

use std::fmt;

use thiserror::Error;

use crate::devices::MediaKind;
use crate::schedule::SetupView;

/// What was being asked of a device when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Enable,
    Disable,
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceAction::Enable => write!(f, "enable"),
            DeviceAction::Disable => write!(f, "disable"),
        }
    }
}

/// Errors returned by setup operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// The setup screen was mounted outside of a call-session provider.
    #[error("Meeting setup must be rendered inside a call session provider.")]
    MissingCallSession,

    /// The host environment could not list its media devices.
    #[error("Failed to enumerate media devices: {0}")]
    DeviceEnumeration(String),

    /// The call handle refused to enable or disable a device.
    #[error("Failed to {action} {kind}: {reason}")]
    DeviceControl {
        kind: MediaKind,
        action: DeviceAction,
        reason: String,
    },

    /// The user (or the browser) denied access to media hardware.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The call handle rejected the join request.
    #[error("Failed to join call: {0}")]
    Join(String),

    /// A join request is already in flight.
    #[error("A join request is already in progress.")]
    JoinInProgress,

    /// The call has already been joined from this screen.
    #[error("The call has already been joined.")]
    AlreadyJoined,

    /// The schedule does not allow joining right now.
    #[error("The call cannot be joined: {0}")]
    NotJoinable(SetupView),

    /// The call session could not reach its backing service.
    #[error("Call session unavailable: {0}")]
    Session(String),

    /// Runtime configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SetupError {
    pub fn device(kind: MediaKind, action: DeviceAction, reason: impl Into<String>) -> Self {
        SetupError::DeviceControl {
            kind,
            action,
            reason: reason.into(),
        }
    }
}
