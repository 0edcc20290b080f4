use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use tilebox_core::rules::SOLVED_NOTICE_DELAY_MS;
use tilebox_core::{Axis, CellView, GridSurface, PuzzleAction, SnapBackTicket, SurfaceHooks};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, PointerEvent};

use crate::input::{cell_element, cell_index, PointerSample, CELL_INDEX_ATTR};

const CLASS_DRAGGING: &str = "dragging";
const CLASS_MOVABLE: &str = "movable";

/// `GridSurface` over a container element whose children are rebuilt on every
/// board change. Input is delegated to listeners on the container.
pub struct DomGridSurface {
    document: Document,
    container: Element,
    move_counter: Option<Element>,
    listeners: Vec<EventListener>,
    hooks: SurfaceHooks,
    snap_back: Option<(SnapBackTicket, Timeout)>,
    solved_notice: Option<Timeout>,
}

impl DomGridSurface {
    pub fn new(document: Document, container: Element, move_counter: Option<Element>) -> Self {
        Self {
            document,
            container,
            move_counter,
            listeners: Vec::new(),
            hooks: SurfaceHooks::empty(),
            snap_back: None,
            solved_notice: None,
        }
    }

    fn tile(&self, index: usize) -> Option<HtmlElement> {
        let selector = format!("[{CELL_INDEX_ATTR}=\"{index}\"]");
        self.container
            .query_selector(&selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_style(&self, index: usize, transition: Option<&str>, transform: &str) {
        let Some(tile) = self.tile(index) else {
            return;
        };
        let style = tile.style();
        if let Some(transition) = transition {
            let _ = style.set_property("transition", transition);
        }
        let _ = style.set_property("transform", transform);
    }

    fn build_cell(&self, cell: &CellView) -> Option<Element> {
        let element = self.document.create_element("div").ok()?;
        element.set_class_name(&cell.class_name());
        element.set_text_content(Some(&cell.text()));
        let _ = element.set_attribute(CELL_INDEX_ATTR, &cell.index.to_string());
        let _ = element.set_attribute("role", "gridcell");
        let _ = element.set_attribute("aria-label", &cell.aria_label());
        Some(element)
    }
}

fn translate(axis: Axis, offset: f32) -> String {
    let (x, y) = axis.translate(offset);
    format!("translate({x}px, {y}px)")
}

impl GridSurface for DomGridSurface {
    fn subscribe(&mut self, hooks: SurfaceHooks) {
        self.listeners.clear();
        self.hooks = hooks.clone();

        let on_action = hooks.on_action.clone();
        self.listeners.push(EventListener::new(&self.container, "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let sample = PointerSample::from_event(event);
            if !sample.is_primary_press() {
                return;
            }
            let Some(element) = cell_element(event) else {
                return;
            };
            let Some(index) = cell_index(&element) else {
                return;
            };
            if element.class_list().contains(CLASS_MOVABLE) {
                let _ = element.set_pointer_capture(sample.id);
            }
            on_action(PuzzleAction::PointerDown {
                index,
                pointer_id: sample.id,
                x: sample.client_x,
                y: sample.client_y,
            });
        }));

        let on_action = hooks.on_action.clone();
        self.listeners.push(EventListener::new(&self.container, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let sample = PointerSample::from_event(event);
            on_action(PuzzleAction::PointerMove {
                pointer_id: sample.id,
                x: sample.client_x,
                y: sample.client_y,
            });
        }));

        let on_action = hooks.on_action.clone();
        self.listeners.push(EventListener::new(&self.container, "pointerup", move |event| {
            if let Some(event) = event.dyn_ref::<PointerEvent>() {
                on_action(PuzzleAction::PointerUp {
                    pointer_id: event.pointer_id(),
                });
            }
        }));

        let on_action = hooks.on_action.clone();
        self.listeners.push(EventListener::new(&self.container, "pointercancel", move |event| {
            if let Some(event) = event.dyn_ref::<PointerEvent>() {
                on_action(PuzzleAction::PointerCancel {
                    pointer_id: event.pointer_id(),
                });
            }
        }));

        let on_action = hooks.on_action;
        self.listeners.push(EventListener::new(&self.container, "click", move |event| {
            let Some(index) = cell_element(event).and_then(|element| cell_index(&element)) else {
                return;
            };
            on_action(PuzzleAction::Click { index });
        }));
    }

    fn render_cells(&mut self, cells: &[CellView]) {
        self.container.set_inner_html("");
        let side = (cells.len() as f64).sqrt().round() as usize;
        if let Some(container) = self.container.dyn_ref::<HtmlElement>() {
            let columns = format!("repeat({side}, 1fr)");
            let _ = container.style().set_property("grid-template-columns", &columns);
        }
        for cell in cells {
            let Some(element) = self.build_cell(cell) else {
                gloo::console::warn!("puzzle: failed to create cell", cell.index as u32);
                return;
            };
            let _ = self.container.append_child(&element);
        }
    }

    fn cell_origin(&self, index: usize) -> Option<(f32, f32)> {
        let rect = self.tile(index)?.get_bounding_client_rect();
        Some((rect.left() as f32, rect.top() as f32))
    }

    fn set_dragging(&mut self, index: usize, dragging: bool) {
        let Some(tile) = self.tile(index) else {
            return;
        };
        let classes = tile.class_list();
        let _ = if dragging {
            classes.add_1(CLASS_DRAGGING)
        } else {
            classes.remove_1(CLASS_DRAGGING)
        };
    }

    fn set_tile_offset(&mut self, index: usize, axis: Axis, offset: f32) {
        self.set_style(index, None, &translate(axis, offset));
    }

    fn clear_tile_offset(&mut self, index: usize) {
        self.set_style(index, None, "");
    }

    fn start_snap_back(&mut self, index: usize, duration_ms: u32, ticket: SnapBackTicket) {
        let transition = format!("transform {duration_ms}ms ease");
        self.set_style(index, Some(&transition), "translate(0px, 0px)");
        let on_action = self.hooks.on_action.clone();
        let timeout = Timeout::new(duration_ms, move || {
            on_action(PuzzleAction::SnapBackFinished { ticket });
        });
        // replacing drops the previous timeout, which cancels it
        self.snap_back = Some((ticket, timeout));
    }

    fn finish_snap_back(&mut self, index: usize) {
        self.snap_back = None;
        self.set_style(index, Some(""), "");
    }

    fn cancel_snap_back(&mut self, index: usize, ticket: SnapBackTicket) {
        if matches!(&self.snap_back, Some((pending, _)) if *pending == ticket) {
            self.snap_back = None;
        }
        self.set_style(index, Some(""), "");
    }

    fn set_move_count(&mut self, moves: u32) {
        if let Some(counter) = &self.move_counter {
            counter.set_text_content(Some(&format!("Moves: {moves}")));
        }
    }

    fn notify_solved(&mut self, moves: u32) {
        self.solved_notice = Some(Timeout::new(SOLVED_NOTICE_DELAY_MS, move || {
            gloo::dialogs::alert(&format!(
                "Congratulations! You solved the puzzle in {moves} moves!"
            ));
        }));
    }
}
