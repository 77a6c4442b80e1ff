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

use videocall_setup_ui::components::config_error::ConfigError;
use videocall_setup_ui::constants::app_config;
use videocall_setup_ui::routing::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
fn app_component() -> Html {
    if let Err(e) = app_config() {
        log::error!("{e}");
        return html! { <ConfigError message={e} /> };
    }
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    let level = if cfg!(feature = "debugAssertions") {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("failed to initialise logging: {e}").into());
    }
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
