pub mod action;
pub mod board;
pub mod game;
pub mod gesture;
pub mod media;
pub mod rules;
pub mod surface;

pub use action::PuzzleAction;
pub use board::{is_adjacent, BoardError, MoveOutcome, PuzzleBoard, ShuffleTrace, EMPTY};
pub use game::{splitmix32, MoveSource, PuzzleEvent, PuzzleGame};
pub use gesture::{
    Axis, DragController, DragIgnore, DragRelease, DragStart, Gesture, SnapBackTicket,
};
pub use media::{
    timeline_ratio, LabelPolicy, LabelPolicyError, MediaElement, PlaybackControl, PlaybackRequest,
    TimelineSync, PAUSE_GLYPH, PLAY_GLYPH,
};
pub use rules::{BoardSize, BoardSizeError, PuzzleRules};
pub use surface::{CellView, GridSurface, SurfaceHooks};
