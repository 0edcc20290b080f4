use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::action::PuzzleAction;
use crate::board::{MoveOutcome, PuzzleBoard, ShuffleTrace};
use crate::gesture::{
    Axis, DragController, DragIgnore, DragRelease, DragRequest, DragStart, SnapBackTicket,
};
use crate::rules::PuzzleRules;
use crate::surface::{GridSurface, SurfaceHooks};

/// 32-bit integer hash for turning clock readings into RNG seeds.
pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Click,
    Drag,
}

/// What a dispatched action did, for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PuzzleEvent {
    Ignored,
    DragStarted {
        index: usize,
        axis: Axis,
        max_offset: f32,
    },
    DragRejected {
        index: usize,
        reason: DragIgnore,
    },
    DragMoved {
        index: usize,
        offset: f32,
    },
    Moved {
        index: usize,
        source: MoveSource,
        outcome: MoveOutcome,
    },
    SnappedBack {
        index: usize,
        ticket: SnapBackTicket,
    },
    SnapBackSettled {
        index: usize,
    },
    ClickSuppressed {
        index: usize,
    },
    Shuffled {
        steps: usize,
    },
    Reset,
}

pub struct PuzzleGame<S: GridSurface> {
    board: PuzzleBoard,
    drag: DragController,
    rules: PuzzleRules,
    rng: SmallRng,
    surface: S,
}

impl<S: GridSurface> PuzzleGame<S> {
    /// Creates a solved board and renders it once.
    pub fn new(rules: PuzzleRules, surface: S, seed: u64) -> Self {
        let mut game = Self {
            board: PuzzleBoard::new(rules.size),
            drag: DragController::new(&rules),
            rules,
            rng: SmallRng::seed_from_u64(seed),
            surface,
        };
        game.render();
        game
    }

    pub fn subscribe(&mut self, hooks: SurfaceHooks) {
        self.surface.subscribe(hooks);
    }

    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn apply_action(&mut self, action: PuzzleAction) -> PuzzleEvent {
        match action {
            PuzzleAction::PointerDown {
                index,
                pointer_id,
                x,
                y,
            } => self.pointer_down(index, pointer_id, x, y),
            PuzzleAction::PointerMove { pointer_id, x, y } => self.pointer_move(pointer_id, x, y),
            PuzzleAction::PointerUp { pointer_id } | PuzzleAction::PointerCancel { pointer_id } => {
                self.release(pointer_id)
            }
            PuzzleAction::Click { index } => self.click(index),
            PuzzleAction::SnapBackFinished { ticket } => self.finish_snap_back(ticket),
            PuzzleAction::Shuffle => {
                let trace = self.shuffle();
                PuzzleEvent::Shuffled { steps: trace.len() }
            }
            PuzzleAction::Reset => {
                self.reset();
                PuzzleEvent::Reset
            }
        }
    }

    /// Scrambles the board with the configured number of random moves.
    pub fn shuffle(&mut self) -> ShuffleTrace {
        self.abort_gesture();
        let trace = self.board.shuffle(&mut self.rng, self.rules.shuffle_moves);
        self.render();
        trace
    }

    pub fn reset(&mut self) {
        self.abort_gesture();
        self.board.initialize();
        self.render();
    }

    fn pointer_down(&mut self, index: usize, pointer_id: i32, x: f32, y: f32) -> PuzzleEvent {
        let to_empty = match (
            self.surface.cell_origin(index),
            self.surface.cell_origin(self.board.empty_index()),
        ) {
            (Some((tile_x, tile_y)), Some((empty_x, empty_y))) => {
                Some((empty_x - tile_x, empty_y - tile_y))
            }
            _ => None,
        };
        let request = DragRequest {
            index,
            pointer_id,
            x,
            y,
            to_empty,
        };
        match self.drag.begin(&self.board, request) {
            DragStart::Started {
                axis,
                max_offset,
                cancelled,
            } => {
                if let Some(pending) = cancelled {
                    self.surface.cancel_snap_back(pending.index, pending.ticket);
                }
                self.surface.set_dragging(index, true);
                PuzzleEvent::DragStarted {
                    index,
                    axis,
                    max_offset,
                }
            }
            DragStart::Ignored(reason) => PuzzleEvent::DragRejected { index, reason },
        }
    }

    fn pointer_move(&mut self, pointer_id: i32, x: f32, y: f32) -> PuzzleEvent {
        let Some(motion) = self.drag.update(pointer_id, x, y) else {
            return PuzzleEvent::Ignored;
        };
        self.surface
            .set_tile_offset(motion.index, motion.axis, motion.offset);
        PuzzleEvent::DragMoved {
            index: motion.index,
            offset: motion.offset,
        }
    }

    fn release(&mut self, pointer_id: i32) -> PuzzleEvent {
        match self.drag.release(pointer_id) {
            DragRelease::Commit { index } => {
                self.surface.set_dragging(index, false);
                self.surface.clear_tile_offset(index);
                let outcome = self.board.attempt_move(index);
                self.after_move(outcome);
                PuzzleEvent::Moved {
                    index,
                    source: MoveSource::Drag,
                    outcome,
                }
            }
            DragRelease::SnapBack { index, ticket } => {
                self.surface.set_dragging(index, false);
                self.surface
                    .start_snap_back(index, self.rules.snap_back_ms, ticket);
                PuzzleEvent::SnappedBack { index, ticket }
            }
            DragRelease::Ignored => PuzzleEvent::Ignored,
        }
    }

    fn click(&mut self, index: usize) -> PuzzleEvent {
        if self.drag.is_dragging() || !self.board.is_movable(index) {
            return PuzzleEvent::Ignored;
        }
        if self.drag.take_click_suppression() {
            return PuzzleEvent::ClickSuppressed { index };
        }
        let outcome = self.board.attempt_move(index);
        self.after_move(outcome);
        PuzzleEvent::Moved {
            index,
            source: MoveSource::Click,
            outcome,
        }
    }

    fn finish_snap_back(&mut self, ticket: SnapBackTicket) -> PuzzleEvent {
        match self.drag.finish_snap_back(ticket) {
            Some(index) => {
                self.surface.finish_snap_back(index);
                PuzzleEvent::SnapBackSettled { index }
            }
            None => PuzzleEvent::Ignored,
        }
    }

    fn after_move(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Ignored => {}
            MoveOutcome::Moved { .. } => self.render(),
            MoveOutcome::Solved { moves } => {
                self.render();
                self.surface.notify_solved(moves);
            }
        }
    }

    fn abort_gesture(&mut self) {
        let (gesture, pending) = self.drag.reset();
        if let Some(gesture) = gesture {
            self.surface.set_dragging(gesture.index, false);
            self.surface.clear_tile_offset(gesture.index);
        }
        if let Some(pending) = pending {
            self.surface.cancel_snap_back(pending.index, pending.ticket);
        }
    }

    fn render(&mut self) {
        let cells = self.board.cells();
        self.surface.render_cells(&cells);
        self.surface.set_move_count(self.board.moves());
    }
}
