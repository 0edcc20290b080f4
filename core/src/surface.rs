use std::rc::Rc;

use crate::action::PuzzleAction;
use crate::gesture::{Axis, SnapBackTicket};

/// Render model for one board slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub value: u32,
    pub empty: bool,
    pub movable: bool,
}

impl CellView {
    pub fn text(&self) -> String {
        if self.empty {
            String::new()
        } else {
            self.value.to_string()
        }
    }

    pub fn class_name(&self) -> String {
        let mut class = String::from("tile");
        if self.empty {
            class.push_str(" empty");
        }
        if self.movable {
            class.push_str(" movable");
        }
        class
    }

    pub fn aria_label(&self) -> String {
        if self.empty {
            "Empty space (drop target)".to_string()
        } else if self.movable {
            format!("Tile {} (movable, draggable)", self.value)
        } else {
            format!("Tile {}", self.value)
        }
    }
}

#[derive(Clone)]
pub struct SurfaceHooks {
    pub on_action: Rc<dyn Fn(PuzzleAction)>,
}

impl SurfaceHooks {
    pub fn empty() -> Self {
        Self {
            on_action: Rc::new(|_| {}),
        }
    }
}

/// Rendering and input capability the puzzle needs from its host.
///
/// Implementations feed pointer, click and snap-back completion input back
/// through the hooks given to [`GridSurface::subscribe`].
pub trait GridSurface {
    fn subscribe(&mut self, hooks: SurfaceHooks);
    /// Rebuilds every cell. Called after each board change.
    fn render_cells(&mut self, cells: &[CellView]);
    /// Top-left corner of a cell in the same space as pointer coordinates.
    fn cell_origin(&self, index: usize) -> Option<(f32, f32)>;
    fn set_dragging(&mut self, index: usize, dragging: bool);
    fn set_tile_offset(&mut self, index: usize, axis: Axis, offset: f32);
    fn clear_tile_offset(&mut self, index: usize);
    /// Animates the tile back to rest and reports
    /// [`PuzzleAction::SnapBackFinished`] with `ticket` once done.
    fn start_snap_back(&mut self, index: usize, duration_ms: u32, ticket: SnapBackTicket);
    fn finish_snap_back(&mut self, index: usize);
    /// Drops a pending completion and puts the tile at rest immediately.
    fn cancel_snap_back(&mut self, index: usize, ticket: SnapBackTicket);
    fn set_move_count(&mut self, moves: u32);
    fn notify_solved(&mut self, moves: u32);
}
