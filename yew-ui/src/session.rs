// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call session backed by the meeting API and local capture tracks.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use videocall_meeting_setup::{CallSession, DeviceControl, MediaKind, SetupError};

use crate::media::{LocalTrackControl, LocalTracks};
use crate::meeting_api::{ApiError, MeetingApiClient, MeetingInfo};

pub struct ApiCallSession {
    meeting_id: String,
    display_name: Option<String>,
    api: MeetingApiClient,
    info: RefCell<MeetingInfo>,
    camera: LocalTrackControl,
    microphone: LocalTrackControl,
}

impl ApiCallSession {
    /// Load the meeting's schedule and build a session for it.
    ///
    /// A meeting the API has never seen is treated as unscheduled; joining
    /// will create it.
    pub async fn connect(
        meeting_id: &str,
        display_name: Option<String>,
        api: MeetingApiClient,
        tracks: LocalTracks,
    ) -> Result<Self, ApiError> {
        let info = match api.get_meeting(meeting_id).await {
            Ok(info) => info,
            Err(ApiError::NotFound(_)) => {
                log::info!("meeting {meeting_id} not found, it will be created on join");
                MeetingInfo::unscheduled(meeting_id)
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            meeting_id: meeting_id.to_string(),
            display_name,
            api,
            info: RefCell::new(info),
            camera: LocalTrackControl::new(MediaKind::VideoInput, tracks.clone()),
            microphone: LocalTrackControl::new(MediaKind::AudioInput, tracks),
        })
    }

    pub fn info(&self) -> MeetingInfo {
        self.info.borrow().clone()
    }
}

impl CallSession for ApiCallSession {
    fn id(&self) -> &str {
        &self.meeting_id
    }

    fn camera(&self) -> &dyn DeviceControl {
        &self.camera
    }

    fn microphone(&self) -> &dyn DeviceControl {
        &self.microphone
    }

    fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.info.borrow().starts_at()
    }

    fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.info.borrow().ended_at()
    }

    fn join(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async move {
            let response = self
                .api
                .join_meeting(&self.meeting_id, self.display_name.as_deref())
                .await
                .map_err(|e| SetupError::Join(e.to_string()))?;
            if response.status == "rejected" {
                return Err(SetupError::Join(
                    "The host rejected the request to join.".to_string(),
                ));
            }
            Ok(())
        })
    }

    fn refresh(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async move {
            match self.api.get_meeting(&self.meeting_id).await {
                Ok(info) => {
                    *self.info.borrow_mut() = info;
                    Ok(())
                }
                Err(ApiError::NotFound(_)) => Ok(()),
                Err(e) => Err(SetupError::Session(e.to_string())),
            }
        })
    }
}
