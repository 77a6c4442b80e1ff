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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Meeting API client for reading the meeting schedule and joining.
//!
//! Every endpoint wraps its payload in `{ "success": bool, "result": T }`.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The session JWT is missing, expired, or invalid (HTTP 401).
    #[error("Not authenticated. Please log in.")]
    NotAuthenticated,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 400 with code MEETING_NOT_ACTIVE.
    #[error("Meeting is not active. The host must join first.")]
    MeetingNotActive,

    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[allow(dead_code)]
    success: bool,
    result: T,
}

/// Response payload for `GET /api/v1/meetings/{meeting_id}`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MeetingInfo {
    pub meeting_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub host_display_name: Option<String>,
    /// Unix timestamp in seconds of the scheduled start, if any.
    #[serde(default)]
    pub scheduled_start: Option<i64>,
    /// Unix timestamp in seconds when the meeting ended, or `null`.
    #[serde(default)]
    pub ended_at: Option<i64>,
}

impl MeetingInfo {
    /// Placeholder for a meeting the API does not know yet. Joining creates
    /// it with the caller as host.
    pub fn unscheduled(meeting_id: &str) -> Self {
        Self {
            meeting_id: meeting_id.to_string(),
            state: "idle".to_string(),
            host: String::new(),
            host_display_name: None,
            scheduled_start: None,
            ended_at: None,
        }
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_start
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// An `ended` state without a timestamp still counts as ended.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self.ended_at {
            Some(secs) => DateTime::from_timestamp(secs, 0),
            None if self.state == "ended" => DateTime::from_timestamp(0, 0),
            None => None,
        }
    }
}

/// Response payload for `POST /api/v1/meetings/{meeting_id}/join`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JoinMeetingResponse {
    #[serde(default)]
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub joined_at: i64,
    #[serde(default)]
    pub admitted_at: Option<i64>,
    #[serde(default)]
    pub room_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinMeetingRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MeetingApiClient {
    base_url: String,
    http: Client,
}

impl MeetingApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Calls `GET /api/v1/meetings/{meeting_id}`.
    pub async fn get_meeting(&self, meeting_id: &str) -> Result<MeetingInfo, ApiError> {
        let url = self.url(&format!(
            "/api/v1/meetings/{}",
            urlencoding::encode(meeting_id)
        ));
        let response = with_credentials(self.http.get(url)).send().await?;
        parse_api_response(response).await
    }

    /// Calls `POST /api/v1/meetings/{meeting_id}/join`.
    pub async fn join_meeting(
        &self,
        meeting_id: &str,
        display_name: Option<&str>,
    ) -> Result<JoinMeetingResponse, ApiError> {
        let url = self.url(&format!(
            "/api/v1/meetings/{}/join",
            urlencoding::encode(meeting_id)
        ));
        log::info!("Joining meeting via API: {url} (display_name: {display_name:?})");

        let body = JoinMeetingRequest {
            display_name: display_name.map(|s| s.to_string()),
        };
        let response = with_credentials(self.http.post(url))
            .json(&body)
            .send()
            .await?;
        let data: JoinMeetingResponse = parse_api_response(response).await?;
        log::info!("Join response: status={}, is_host={}", data.status, data.is_host);
        Ok(data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn with_credentials(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    #[cfg(target_arch = "wasm32")]
    {
        builder.fetch_credentials_include()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        builder
    }
}

async fn parse_api_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    match status {
        200 | 201 => {
            let envelope: ApiEnvelope<T> = response.json().await?;
            Ok(envelope.result)
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, body))
        }
    }
}

fn status_error(status: u16, body: String) -> ApiError {
    match status {
        401 => ApiError::NotAuthenticated,
        403 => ApiError::Forbidden(body),
        404 => ApiError::NotFound(body),
        400 if body.contains("MEETING_NOT_ACTIVE") => ApiError::MeetingNotActive,
        _ => ApiError::ServerError { status, body },
    }
}
