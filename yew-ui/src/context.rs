// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context providers for the application
//!
//! The call session and the device enumerator are handed down the component
//! tree through Yew's `ContextProvider` instead of props. `LocalTracks` is
//! itself a context type.

use std::rc::Rc;

use videocall_meeting_setup::{require_session, CallSession, DeviceEnumerator, SetupError};
use yew::prelude::*;

use crate::media::BrowserDeviceEnumerator;

/// The call session the setup screen operates on.
///
/// Equality is identity: two contexts are equal only when they wrap the
/// same session instance.
#[derive(Clone)]
pub struct CallSessionCtx(pub Rc<dyn CallSession>);

impl CallSessionCtx {
    pub fn new(session: Rc<dyn CallSession>) -> Self {
        Self(session)
    }
}

impl PartialEq for CallSessionCtx {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// Device enumerator override. Without one, components enumerate through
/// the browser.
#[derive(Clone)]
pub struct DevicesCtx(pub Rc<dyn DeviceEnumerator>);

impl PartialEq for DevicesCtx {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// Fetch the call session from context.
///
/// Rendering outside a `ContextProvider<CallSessionCtx>` is reported as
/// [`SetupError::MissingCallSession`] rather than a panic.
#[hook]
pub fn use_call_session() -> Result<CallSessionCtx, SetupError> {
    require_session(use_context::<CallSessionCtx>())
}

#[hook]
pub fn use_device_enumerator() -> Rc<dyn DeviceEnumerator> {
    match use_context::<DevicesCtx>() {
        Some(DevicesCtx(devices)) => devices,
        None => Rc::new(BrowserDeviceEnumerator),
    }
}
