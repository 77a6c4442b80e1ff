// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local camera preview.

use web_sys::{HtmlVideoElement, MediaStream};
use yew::prelude::*;

use crate::media::LocalTracks;

#[function_component(VideoPreview)]
pub fn video_preview() -> Html {
    let tracks = use_context::<LocalTracks>();
    let stream = use_state(|| None::<MediaStream>);
    let video_ref = use_node_ref();

    {
        let setter = stream.setter();
        use_effect_with(tracks, move |tracks| {
            let subscription = tracks.as_ref().map(|tracks| {
                let id = tracks.subscribe_camera(Callback::from(move |s| setter.set(s)));
                (tracks.clone(), id)
            });
            move || {
                if let Some((tracks, id)) = subscription {
                    tracks.unsubscribe_camera(id);
                }
            }
        });
    }

    {
        let video_ref = video_ref.clone();
        use_effect_with((*stream).clone(), move |stream| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_src_object(stream.as_ref());
            }
        });
    }

    html! {
        <div class="video-preview">
            if stream.is_some() {
                <video ref={video_ref} class="video-preview-feed" autoplay=true muted=true playsinline=true />
            } else {
                <div class="video-preview-placeholder">{ "Camera is off" }</div>
            }
        </div>
    }
}
