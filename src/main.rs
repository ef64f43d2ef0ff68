mod catalog;
mod components;
mod config;
mod controller;
mod error;
mod loader;
mod model;
mod preview;
mod scene;
mod session;
mod state;
mod util;

use components::app::App;

fn main() {
    // Logging and panic hooks for the browser console
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    yew::Renderer::<App>::new().render();
}
