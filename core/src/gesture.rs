use crate::board::PuzzleBoard;
use crate::rules::PuzzleRules;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Picks the dominant axis of a vector and returns its signed component.
    /// Ties go to `Y`.
    pub fn dominant(dx: f32, dy: f32) -> (Axis, f32) {
        if dx.abs() > dy.abs() {
            (Axis::X, dx)
        } else {
            (Axis::Y, dy)
        }
    }

    pub fn component(self, x: f32, y: f32) -> f32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }

    pub fn translate(self, offset: f32) -> (f32, f32) {
        match self {
            Axis::X => (offset, 0.0),
            Axis::Y => (0.0, offset),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapBackTicket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingSnapBack {
    pub index: usize,
    pub ticket: SnapBackTicket,
}

/// One pointer interaction from press to release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub index: usize,
    pub pointer_id: i32,
    pub axis: Axis,
    pub max_offset: f32,
    pub start: (f32, f32),
    pub offset: f32,
    pub moved: bool,
}

impl Gesture {
    /// Clamps into `[min(0, max), max(0, max)]` so the tile can only travel
    /// toward the empty cell and never past it.
    pub fn clamp_offset(&self, raw: f32) -> f32 {
        let lo = self.max_offset.min(0.0);
        let hi = self.max_offset.max(0.0);
        raw.clamp(lo, hi)
    }

    fn update(&mut self, x: f32, y: f32, slop: f32) {
        let raw = self.axis.component(x - self.start.0, y - self.start.1);
        self.offset = self.clamp_offset(raw);
        if raw.abs() > slop {
            self.moved = true;
        }
    }

    pub fn should_commit(&self, epsilon: f32) -> bool {
        if self.max_offset == 0.0 || !self.moved {
            return false;
        }
        let toward_empty = self.offset.signum() == self.max_offset.signum();
        toward_empty && self.offset.abs() >= epsilon
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRequest {
    pub index: usize,
    pub pointer_id: i32,
    pub x: f32,
    pub y: f32,
    /// Screen vector from the tile's origin to the empty cell's origin.
    pub to_empty: Option<(f32, f32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragIgnore {
    GestureActive,
    NotMovable,
    MissingGeometry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStart {
    Started {
        axis: Axis,
        max_offset: f32,
        cancelled: Option<PendingSnapBack>,
    },
    Ignored(DragIgnore),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragMotion {
    pub index: usize,
    pub axis: Axis,
    pub offset: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragRelease {
    Commit { index: usize },
    SnapBack { index: usize, ticket: SnapBackTicket },
    Ignored,
}

/// Turns pointer gestures on a tile into a committed move or a snap-back.
///
/// At most one gesture is live. A press while dragging is ignored, and a new
/// gesture cancels any snap-back still in flight so a stale completion can't
/// land on the fresh drag.
#[derive(Clone, Debug)]
pub struct DragController {
    gesture: Option<Gesture>,
    suppress_click: bool,
    snap_back: Option<PendingSnapBack>,
    next_ticket: u64,
    slop: f32,
    epsilon: f32,
}

impl DragController {
    pub fn new(rules: &PuzzleRules) -> Self {
        Self {
            gesture: None,
            suppress_click: false,
            snap_back: None,
            next_ticket: 1,
            slop: rules.drag_slop,
            epsilon: rules.commit_epsilon,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn pending_snap_back(&self) -> Option<PendingSnapBack> {
        self.snap_back
    }

    pub fn click_suppressed(&self) -> bool {
        self.suppress_click
    }

    pub fn begin(&mut self, board: &PuzzleBoard, request: DragRequest) -> DragStart {
        if self.gesture.is_some() {
            return DragStart::Ignored(DragIgnore::GestureActive);
        }
        if !board.is_movable(request.index) {
            return DragStart::Ignored(DragIgnore::NotMovable);
        }
        let Some((dx, dy)) = request.to_empty else {
            return DragStart::Ignored(DragIgnore::MissingGeometry);
        };
        let (axis, max_offset) = Axis::dominant(dx, dy);
        let cancelled = self.snap_back.take();
        self.gesture = Some(Gesture {
            index: request.index,
            pointer_id: request.pointer_id,
            axis,
            max_offset,
            start: (request.x, request.y),
            offset: 0.0,
            moved: false,
        });
        DragStart::Started {
            axis,
            max_offset,
            cancelled,
        }
    }

    pub fn update(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<DragMotion> {
        let slop = self.slop;
        let gesture = self.gesture.as_mut()?;
        if gesture.pointer_id != pointer_id {
            return None;
        }
        gesture.update(x, y, slop);
        Some(DragMotion {
            index: gesture.index,
            axis: gesture.axis,
            offset: gesture.offset,
        })
    }

    /// Resolves the live gesture. Pointer-up and pointer-cancel share this path.
    pub fn release(&mut self, pointer_id: i32) -> DragRelease {
        let gesture = match self.gesture {
            Some(gesture) if gesture.pointer_id == pointer_id => gesture,
            _ => return DragRelease::Ignored,
        };
        self.gesture = None;
        if gesture.should_commit(self.epsilon) {
            self.suppress_click = true;
            return DragRelease::Commit {
                index: gesture.index,
            };
        }
        self.suppress_click = gesture.moved;
        let ticket = SnapBackTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.snap_back = Some(PendingSnapBack {
            index: gesture.index,
            ticket,
        });
        DragRelease::SnapBack {
            index: gesture.index,
            ticket,
        }
    }

    /// Returns the tile index when `ticket` is the snap-back still pending.
    pub fn finish_snap_back(&mut self, ticket: SnapBackTicket) -> Option<usize> {
        match self.snap_back {
            Some(pending) if pending.ticket == ticket => {
                self.snap_back = None;
                Some(pending.index)
            }
            _ => None,
        }
    }

    /// Consumes the click suppression flag. Returns `true` when the click
    /// should be swallowed.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    /// Drops all gesture state, handing back what the surface must undo.
    pub fn reset(&mut self) -> (Option<Gesture>, Option<PendingSnapBack>) {
        self.suppress_click = false;
        (self.gesture.take(), self.snap_back.take())
    }
}
