use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE_MIN: usize = 2;
pub const BOARD_SIZE_MAX: usize = 8;
pub const BOARD_SIZE_DEFAULT: usize = 3;

pub const SHUFFLE_MOVES_DEFAULT: u32 = 1000;
pub const SHUFFLE_MOVES_MAX: u32 = 100_000;

/// Raw pointer travel (in CSS pixels) before a press counts as a drag.
pub const DRAG_SLOP: f32 = 1.0;
/// Minimum clamped travel toward the empty cell for a drag to commit.
pub const COMMIT_EPSILON: f32 = 1.0;
pub const SNAP_BACK_MS: u32 = 120;
pub const SOLVED_NOTICE_DELAY_MS: u32 = 100;

/// Side length of a square board, validated against
/// `BOARD_SIZE_MIN..=BOARD_SIZE_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    pub fn new(size: usize) -> Result<Self, BoardSizeError> {
        if !(BOARD_SIZE_MIN..=BOARD_SIZE_MAX).contains(&size) {
            return Err(BoardSizeError::OutOfRange {
                min: BOARD_SIZE_MIN,
                max: BOARD_SIZE_MAX,
                found: size,
            });
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self(BOARD_SIZE_DEFAULT)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

impl FromStr for BoardSize {
    type Err = BoardSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let size = value
            .trim()
            .parse::<usize>()
            .map_err(|_| BoardSizeError::NotANumber {
                value: value.to_string(),
            })?;
        Self::new(size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSizeError {
    OutOfRange { min: usize, max: usize, found: usize },
    NotANumber { value: String },
}

impl fmt::Display for BoardSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardSizeError::OutOfRange { min, max, found } => {
                write!(f, "board size must be between {min} and {max}, got {found}")
            }
            BoardSizeError::NotANumber { value } => {
                write!(f, "board size '{value}' is not a number")
            }
        }
    }
}

impl std::error::Error for BoardSizeError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleRules {
    pub size: BoardSize,
    pub shuffle_moves: u32,
    pub drag_slop: f32,
    pub commit_epsilon: f32,
    pub snap_back_ms: u32,
}

impl Default for PuzzleRules {
    fn default() -> Self {
        Self {
            size: BoardSize::default(),
            shuffle_moves: SHUFFLE_MOVES_DEFAULT,
            drag_slop: DRAG_SLOP,
            commit_epsilon: COMMIT_EPSILON,
            snap_back_ms: SNAP_BACK_MS,
        }
    }
}
