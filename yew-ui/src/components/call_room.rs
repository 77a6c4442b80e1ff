// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-call view shown once setup has completed.

use videocall_meeting_setup::{Notice, NoticeLevel};
use yew::prelude::*;

use crate::components::video_preview::VideoPreview;

#[derive(Properties, Clone, PartialEq)]
pub struct CallRoomProps {
    pub meeting_id: String,
    pub on_leave: Callback<()>,
    /// Last notice from the setup screen, still shown after joining.
    #[prop_or_default]
    pub notice: Option<Notice>,
}

#[function_component(CallRoom)]
pub fn call_room(props: &CallRoomProps) -> Html {
    let notice = props.notice.as_ref().map(|notice| {
        let class = match notice.level {
            NoticeLevel::Warning => "setup-notice setup-notice-warning",
            NoticeLevel::Error => "setup-notice setup-notice-error",
        };
        html! { <div {class} role="alert">{ notice.message.clone() }</div> }
    });

    html! {
        <div class="call-room">
            <div class="call-room-header">
                <span class="call-room-id">{ format!("Meeting: {}", props.meeting_id) }</span>
            </div>
            { for notice }
            <VideoPreview />
            <button
                class="btn-apple btn-secondary call-room-leave"
                onclick={props.on_leave.reform(|_| ())}
            >
                { "Leave" }
            </button>
        </div>
    }
}
