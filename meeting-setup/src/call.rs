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

//! The call-session handle consumed by the setup screen.
//!
//! A call session is owned by whatever provides it (a context provider in
//! the UI). The setup screen only issues commands to it and reads its
//! schedule; it never creates, destroys or mirrors it.

use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;

use crate::error::SetupError;

/// Enables or disables one capture device on behalf of a call.
pub trait DeviceControl {
    fn enable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>>;
    fn disable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>>;
}

/// One joinable call.
pub trait CallSession {
    /// Stable identity of the call. Device sync re-runs when this changes.
    fn id(&self) -> &str;

    fn camera(&self) -> &dyn DeviceControl;

    fn microphone(&self) -> &dyn DeviceControl;

    /// Scheduled start, if the call was scheduled ahead of time.
    fn starts_at(&self) -> Option<DateTime<Utc>>;

    /// Set once the host has ended the call.
    fn ended_at(&self) -> Option<DateTime<Utc>>;

    fn join(&self) -> LocalBoxFuture<'_, Result<(), SetupError>>;

    /// Re-read schedule data from wherever the session lives.
    fn refresh(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Turn an optional context value into a typed precondition failure.
pub fn require_session<S>(session: Option<S>) -> Result<S, SetupError> {
    session.ok_or(SetupError::MissingCallSession)
}
