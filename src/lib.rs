use gloo::events::EventListener;

pub mod config;
pub mod dom_surface;
mod input;
pub mod media_view;
pub mod puzzle_view;

/// Mounts both widgets once the document has loaded. Each one skips itself
/// when its elements are missing.
pub fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount_widgets()).forget();
    } else {
        mount_widgets();
    }
}

fn mount_widgets() {
    let config = config::app_config();
    gloo::console::log!(
        "tilebox: starting",
        config.rules.size.to_string(),
        config.rules.shuffle_moves
    );
    puzzle_view::run(&config);
    media_view::run(&config);
}
