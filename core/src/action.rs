use crate::gesture::SnapBackTicket;

#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleAction {
    PointerDown {
        index: usize,
        pointer_id: i32,
        x: f32,
        y: f32,
    },
    PointerMove {
        pointer_id: i32,
        x: f32,
        y: f32,
    },
    PointerUp {
        pointer_id: i32,
    },
    PointerCancel {
        pointer_id: i32,
    },
    Click {
        index: usize,
    },
    SnapBackFinished {
        ticket: SnapBackTicket,
    },
    Shuffle,
    Reset,
}
