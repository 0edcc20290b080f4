use wasm_bindgen::JsCast;
use web_sys::{Element, Event, PointerEvent};

pub(crate) const CELL_INDEX_ATTR: &str = "data-index";
const CELL_SELECTOR: &str = "[data-index]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PointerSample {
    pub id: i32,
    pub kind: PointerKind,
    pub client_x: f32,
    pub client_y: f32,
    pub button: i16,
}

impl PointerSample {
    pub fn from_event(event: &PointerEvent) -> Self {
        Self {
            id: event.pointer_id(),
            kind: PointerKind::from_pointer_type(&event.pointer_type()),
            client_x: event.client_x() as f32,
            client_y: event.client_y() as f32,
            button: event.button(),
        }
    }

    /// Only the primary mouse button starts a drag; touch and pen always do.
    pub fn is_primary_press(&self) -> bool {
        self.kind != PointerKind::Mouse || self.button == 0
    }
}

/// The cell element an event landed in, if any.
pub(crate) fn cell_element(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(CELL_SELECTOR).ok().flatten()
}

pub(crate) fn cell_index(element: &Element) -> Option<usize> {
    element.get_attribute(CELL_INDEX_ATTR)?.parse().ok()
}
