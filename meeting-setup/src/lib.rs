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

//! Pre-join meeting setup for videocall.rs front ends.
//!
//! Everything here is independent of the UI framework and of the browser:
//! the call itself is reached through the [`CallSession`] trait, the host's
//! input hardware through [`DeviceEnumerator`], and user-visible messages
//! through [`Notifier`]. Front ends drive a [`MeetingSetupController`] from
//! their event handlers.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use videocall_meeting_setup::{
//!     CallSession, DeviceEnumerator, MeetingSetupController, Notifier, SetupConfig,
//! };
//!
//! # async fn example(
//! #     session: Rc<dyn CallSession>,
//! #     devices: Rc<dyn DeviceEnumerator>,
//! #     notifier: Rc<dyn Notifier>,
//! #     now: chrono::DateTime<chrono::Utc>,
//! # ) {
//! let controller = MeetingSetupController::new(
//!     session,
//!     devices,
//!     notifier,
//!     SetupConfig::default(),
//!     Box::new(|complete| log::info!("setup complete: {complete}")),
//! );
//! let _ = controller.set_join_muted(true).await;
//! if controller.join(now).await.is_ok() {
//!     // parent swaps in the in-call view
//! }
//! # }
//! ```

pub mod call;
pub mod config;
pub mod controller;
pub mod devices;
pub mod error;
pub mod join;
pub mod notify;
pub mod schedule;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use call::{require_session, CallSession, DeviceControl};
pub use config::SetupConfig;
pub use controller::{MeetingSetupController, SetupPhase};
pub use devices::{DeviceAvailability, DeviceEnumerator, InputDevice, MediaKind};
pub use error::{DeviceAction, SetupError};
pub use join::{join_call, JoinReport};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use schedule::{format_start_time, offset_from_minutes_west, CallSchedule, SetupView};
pub use sync::{sync_devices, DeviceSync, SyncKey, SyncOutcome};
