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

//! Setup screen controller.
//!
//! Owns the screen's local state (the "join muted" flag, the setup phase and
//! the device sync key) and drives the call session on behalf of the UI.
//! All methods take `&self` so the controller can be shared behind an `Rc`
//! with futures spawned from event handlers; no `RefCell` borrow is held
//! across an `.await`.
//!
//! Device syncs and the join flow run one at a time behind an async lock.
//! A sync reads the "join muted" flag only once it holds the lock, so a sync
//! queued behind a slow one (a pending permission prompt, say) applies the
//! latest flag rather than the one current when it was queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures::lock::Mutex;

use crate::call::CallSession;
use crate::config::SetupConfig;
use crate::devices::DeviceEnumerator;
use crate::error::SetupError;
use crate::join::{join_call, JoinReport};
use crate::notify::{Notice, Notifier};
use crate::schedule::{CallSchedule, SetupView};
use crate::sync::{sync_devices, DeviceSync, SyncKey, SyncOutcome};

/// Where the screen is in its lifecycle.
///
/// ```text
/// ScheduledFuture --(time passes)--> Ready --(join)--> Joining --(ok)--> Joined
///                                    Ready --(host ends call)--> Ended
///                                  Joining --(failure)--> Ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupPhase {
    ScheduledFuture,
    Ready,
    Joining,
    Joined,
    Ended,
}

/// Invoked with `true` once the call has been joined.
pub type CompletionCallback = Box<dyn Fn(bool)>;

pub struct MeetingSetupController {
    session: Rc<dyn CallSession>,
    devices: Rc<dyn DeviceEnumerator>,
    notifier: Rc<dyn Notifier>,
    config: SetupConfig,
    on_complete: CompletionCallback,
    join_muted: Cell<bool>,
    phase: Cell<SetupPhase>,
    sync: RefCell<DeviceSync>,
    device_lock: Mutex<()>,
}

impl MeetingSetupController {
    pub fn new(
        session: Rc<dyn CallSession>,
        devices: Rc<dyn DeviceEnumerator>,
        notifier: Rc<dyn Notifier>,
        config: SetupConfig,
        on_complete: CompletionCallback,
    ) -> Self {
        let join_muted = config.join_muted_by_default;
        Self {
            session,
            devices,
            notifier,
            config,
            on_complete,
            join_muted: Cell::new(join_muted),
            phase: Cell::new(SetupPhase::Ready),
            sync: RefCell::new(DeviceSync::default()),
            device_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Rc<dyn CallSession> {
        &self.session
    }

    pub fn devices(&self) -> &Rc<dyn DeviceEnumerator> {
        &self.devices
    }

    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    pub fn join_muted(&self) -> bool {
        self.join_muted.get()
    }

    pub fn phase(&self) -> SetupPhase {
        self.phase.get()
    }

    /// Evaluate the pre-call alerts for `now` and move the phase along.
    ///
    /// `Joining` and `Joined` are sticky: a schedule refresh never pulls a
    /// joined screen back into an alert.
    pub fn view(&self, now: DateTime<Utc>) -> SetupView {
        let view = CallSchedule::of(self.session.as_ref()).evaluate(now);
        match self.phase.get() {
            SetupPhase::Joining | SetupPhase::Joined => {}
            _ => self.phase.set(match view {
                SetupView::NotStarted { .. } => SetupPhase::ScheduledFuture,
                SetupView::Ended { .. } => SetupPhase::Ended,
                SetupView::Ready => SetupPhase::Ready,
            }),
        }
        view
    }

    /// Re-read the schedule from the session. Failures are logged only.
    pub async fn refresh(&self) {
        if let Err(err) = self.session.refresh().await {
            log::warn!("failed to refresh call {}: {err}", self.session.id());
        }
    }

    /// Record the checkbox value and bring the devices in line with it.
    pub async fn set_join_muted(&self, join_muted: bool) -> Result<SyncOutcome, SetupError> {
        self.join_muted.set(join_muted);
        self.sync_devices().await
    }

    /// Apply the current "join muted" flag if it, or the session, changed
    /// since the last sync.
    ///
    /// Errors are logged and returned; they never block the screen.
    pub async fn sync_devices(&self) -> Result<SyncOutcome, SetupError> {
        let _guard = self.device_lock.lock().await;
        let key = SyncKey::new(self.session.as_ref(), self.join_muted.get());
        if !self.sync.borrow_mut().claim(&key) {
            return Ok(SyncOutcome::Unchanged);
        }

        let result = sync_devices(
            self.session.as_ref(),
            self.devices.as_ref(),
            key.join_muted,
        )
        .await;

        if let Err(err) = &result {
            log::error!("Error enabling devices: {err}");
            self.sync.borrow_mut().invalidate();
        }
        result
    }

    /// Join the call.
    ///
    /// On success the completion callback fires with `true`, exactly once.
    /// On failure an error notice is raised and the screen stays in `Ready`
    /// so the user can try again.
    pub async fn join(&self, now: DateTime<Utc>) -> Result<JoinReport, SetupError> {
        match self.phase.get() {
            SetupPhase::Joining => return Err(SetupError::JoinInProgress),
            SetupPhase::Joined => return Err(SetupError::AlreadyJoined),
            _ => {}
        }
        let view = self.view(now);
        if view != SetupView::Ready {
            return Err(SetupError::NotJoinable(view));
        }

        self.phase.set(SetupPhase::Joining);
        let _guard = self.device_lock.lock().await;
        let result = join_call(
            self.session.as_ref(),
            self.devices.as_ref(),
            self.notifier.as_ref(),
            &self.config.no_devices_warning,
        )
        .await;

        match result {
            Ok(report) => {
                self.phase.set(SetupPhase::Joined);
                (self.on_complete)(true);
                Ok(report)
            }
            Err(err) => {
                log::error!("Failed to join call: {err}");
                self.phase.set(SetupPhase::Ready);
                self.notifier
                    .notify(Notice::error(self.config.join_failed_message.clone()));
                Err(err)
            }
        }
    }
}
