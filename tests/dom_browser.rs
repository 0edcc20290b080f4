#![cfg(target_arch = "wasm32")]

use gloo::timers::future::TimeoutFuture;
use tilebox::config::AppConfig;
use tilebox::dom_surface::DomGridSurface;
use tilebox::media_view::{self, timeline_click_ratio};
use tilebox::puzzle_view::{self, PuzzleView};
use tilebox_core::{
    GridSurface, LabelPolicy, PuzzleAction, PuzzleBoard, PuzzleRules, PAUSE_GLYPH, PLAY_GLYPH,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    window, Document, Element, HtmlElement, HtmlProgressElement, HtmlVideoElement, MouseEvent,
    MouseEventInit, PointerEvent, PointerEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    window().unwrap().document().unwrap()
}

fn attach(tag: &str) -> Element {
    let document = document();
    let element = document.create_element(tag).unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn cell_labels(container: &Element) -> Vec<String> {
    let cells = container.children();
    (0..cells.length())
        .filter_map(|i| cells.item(i))
        .map(|cell| cell.get_attribute("aria-label").unwrap_or_default())
        .collect()
}

#[wasm_bindgen_test]
fn renders_one_accessible_cell_per_slot() {
    let container = attach("div");
    let mut surface = DomGridSurface::new(document(), container.clone(), None);
    let board = PuzzleBoard::new(PuzzleRules::default().size);
    surface.render_cells(&board.cells());

    assert_eq!(container.child_element_count(), 9);
    let labels = cell_labels(&container);
    assert_eq!(labels[0], "Tile 1");
    assert_eq!(labels[7], "Tile 8 (movable, draggable)");
    assert_eq!(labels[8], "Empty space (drop target)");
    let empty = container.query_selector(".tile.empty").unwrap().unwrap();
    assert_eq!(empty.get_attribute("role").as_deref(), Some("gridcell"));
    assert_eq!(empty.text_content().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn click_dispatch_moves_tile_and_updates_counter() {
    let container = attach("div");
    let counter = attach("span");
    let surface = DomGridSurface::new(document(), container.clone(), Some(counter.clone()));
    let view = puzzle_view::mount(surface, &AppConfig::default());
    assert_eq!(counter.text_content().as_deref(), Some("Moves: 0"));

    view.dispatch(PuzzleAction::Click { index: 7 });
    assert_eq!(counter.text_content().as_deref(), Some("Moves: 1"));
    assert_eq!(view.game().borrow().board().empty_index(), 7);
    let labels = cell_labels(&container);
    assert_eq!(labels[7], "Empty space (drop target)");
}

#[wasm_bindgen_test]
fn auto_shuffle_leaves_counter_at_zero() {
    let container = attach("div");
    let counter = attach("span");
    let surface = DomGridSurface::new(document(), container, Some(counter.clone()));
    let config = AppConfig {
        auto_shuffle: true,
        ..AppConfig::default()
    };
    let view = puzzle_view::mount(surface, &config);
    assert_eq!(counter.text_content().as_deref(), Some("Moves: 0"));
    assert!(view.game().borrow().board().is_solvable());
}

#[wasm_bindgen_test]
fn media_mount_hides_controls_and_keeps_label_in_sync() {
    let video = attach("video").dyn_into::<HtmlVideoElement>().unwrap();
    video.set_attribute("controls", "").unwrap();
    let button = attach("button");
    let progress = attach("progress").dyn_into::<HtmlProgressElement>().unwrap();

    let view = media_view::mount(
        video.clone(),
        Some(button.clone()),
        Some(progress.clone()),
        LabelPolicy::Resync,
    );
    assert!(!video.has_attribute("controls"));
    assert_eq!(progress.max(), 1.0);
    assert_eq!(button.text_content().as_deref(), Some(PLAY_GLYPH));

    // no source: duration is NaN, so time updates leave the timeline alone
    view.state().borrow_mut().time_update();
    assert_eq!(progress.value(), 0.0);

    view.state().borrow_mut().play_pause();
    assert_eq!(button.text_content().as_deref(), Some(PAUSE_GLYPH));
    view.state().borrow_mut().play_pause();
    assert_eq!(button.text_content().as_deref(), Some(PLAY_GLYPH));
}

const GRID_STYLE: &str = "display: grid; width: 120px; grid-auto-rows: 40px; gap: 0;";

fn mount_grid() -> (Element, Element, PuzzleView) {
    let container = attach("div");
    container.set_attribute("style", GRID_STYLE).unwrap();
    let counter = attach("span");
    let surface = DomGridSurface::new(document(), container.clone(), Some(counter.clone()));
    let view = puzzle_view::mount(surface, &AppConfig::default());
    (container, counter, view)
}

fn tile(container: &Element, index: usize) -> HtmlElement {
    container
        .query_selector(&format!("[data-index=\"{index}\"]"))
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn tile_center(container: &Element, index: usize) -> (i32, i32) {
    let rect = tile(container, index).get_bounding_client_rect();
    (
        (rect.left() + rect.width() / 2.0).round() as i32,
        (rect.top() + rect.height() / 2.0).round() as i32,
    )
}

fn send_pointer(target: &Element, kind: &str, x: i32, y: i32) {
    let init = PointerEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_pointer_id(1);
    init.set_pointer_type("mouse");
    init.set_is_primary(true);
    init.set_button(0);
    init.set_client_x(x);
    init.set_client_y(y);
    let event = PointerEvent::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

fn style_of(element: &HtmlElement, property: &str) -> String {
    element.style().get_property_value(property).unwrap()
}

#[wasm_bindgen_test]
fn pointer_drag_translates_tile_and_commits_on_release() {
    let (container, counter, view) = mount_grid();
    let (x, y) = tile_center(&container, 7);
    let source = tile(&container, 7);

    send_pointer(&source, "pointerdown", x, y);
    assert!(source.class_list().contains("dragging"));
    send_pointer(&source, "pointermove", x + 10, y + 3);
    assert_eq!(style_of(&source, "transform"), "translate(10px, 0px)");
    // travel past the empty cell stops at one cell width
    send_pointer(&source, "pointermove", x + 90, y);
    assert_eq!(style_of(&source, "transform"), "translate(40px, 0px)");

    send_pointer(&source, "pointerup", x + 90, y);
    let game = view.game().borrow();
    assert_eq!(game.board().empty_index(), 7);
    assert_eq!(game.board().tile_at(8), Some(8));
    assert!(!game.drag().is_dragging());
    drop(game);
    assert_eq!(counter.text_content().as_deref(), Some("Moves: 1"));
    let moved = tile(&container, 8);
    assert_eq!(moved.text_content().as_deref(), Some("8"));
    assert!(!moved.class_list().contains("dragging"));
    assert_eq!(style_of(&moved, "transform"), "");
}

#[wasm_bindgen_test]
async fn drag_away_from_empty_snaps_back_after_timeout() {
    let (container, counter, view) = mount_grid();
    let (x, y) = tile_center(&container, 7);
    let source = tile(&container, 7);

    send_pointer(&source, "pointerdown", x, y);
    send_pointer(&source, "pointermove", x - 5, y);
    assert_eq!(style_of(&source, "transform"), "translate(0px, 0px)");
    send_pointer(&source, "pointerup", x - 5, y);

    assert!(style_of(&source, "transition").contains("120ms"));
    assert!(!source.class_list().contains("dragging"));
    assert!(view.game().borrow().drag().pending_snap_back().is_some());

    TimeoutFuture::new(250).await;
    assert_eq!(style_of(&source, "transition"), "");
    assert_eq!(style_of(&source, "transform"), "");
    let game = view.game().borrow();
    assert_eq!(game.drag().pending_snap_back(), None);
    assert_eq!(game.board().empty_index(), 8);
    drop(game);
    assert_eq!(counter.text_content().as_deref(), Some("Moves: 0"));
}

#[wasm_bindgen_test]
fn pointer_down_on_fixed_tile_starts_nothing() {
    let (container, _counter, view) = mount_grid();
    let (x, y) = tile_center(&container, 0);
    let fixed = tile(&container, 0);
    send_pointer(&fixed, "pointerdown", x, y);
    send_pointer(&fixed, "pointermove", x + 20, y);
    assert!(!view.game().borrow().drag().is_dragging());
    assert!(!fixed.class_list().contains("dragging"));
    assert_eq!(style_of(&fixed, "transform"), "");
}

#[wasm_bindgen_test]
fn legacy_label_is_left_alone_when_starting_playback() {
    let video = attach("video").dyn_into::<HtmlVideoElement>().unwrap();
    let button = attach("button");
    button.set_text_content(Some("Play"));

    let view = media_view::mount(video, Some(button.clone()), None, LabelPolicy::Legacy);
    assert_eq!(button.text_content().as_deref(), Some("Play"));

    view.state().borrow_mut().play_pause();
    assert_eq!(button.text_content().as_deref(), Some("Play"));
    view.state().borrow_mut().play_pause();
    assert_eq!(button.text_content().as_deref(), Some(PLAY_GLYPH));
}

/// One second of 8 kHz mono silence as a WAV data URL.
fn silent_wav_url() -> String {
    const RATE: u32 = 8000;
    let mut bytes = Vec::with_capacity(44 + RATE as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + RATE).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&RATE.to_le_bytes());
    bytes.extend_from_slice(&RATE.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&RATE.to_le_bytes());
    bytes.resize(44 + RATE as usize, 128);
    let binary: String = bytes.iter().map(|&byte| char::from(byte)).collect();
    let encoded = window().unwrap().btoa(&binary).unwrap();
    format!("data:audio/wav;base64,{encoded}")
}

#[wasm_bindgen_test]
async fn timeline_click_seeks_by_horizontal_position() {
    let video = attach("video").dyn_into::<HtmlVideoElement>().unwrap();
    video.set_muted(true);
    video.set_src(&silent_wav_url());
    let progress = attach("progress").dyn_into::<HtmlProgressElement>().unwrap();
    progress
        .set_attribute(
            "style",
            "position: fixed; left: 0; top: 0; display: block; width: 200px; \
             box-sizing: border-box; border: 0; padding: 0; margin: 0; appearance: none;",
        )
        .unwrap();
    let _view = media_view::mount(video.clone(), None, Some(progress.clone()), LabelPolicy::Resync);
    assert_eq!(timeline_click_ratio(&progress, 50.0), Some(0.25));

    for _ in 0..100 {
        if video.duration().is_finite() {
            break;
        }
        TimeoutFuture::new(20).await;
    }
    let duration = video.duration();
    assert!(duration.is_finite() && duration > 0.0, "duration {duration}");

    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(50);
    init.set_client_y(1);
    let click = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    progress.dispatch_event(&click).unwrap();

    assert!((video.current_time() - 0.25 * duration).abs() < 1e-3);
    assert!((progress.value() - 0.25).abs() < 1e-9);
}
