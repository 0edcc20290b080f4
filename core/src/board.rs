use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::rules::BoardSize;
use crate::surface::CellView;

/// Value stored in the vacant slot.
pub const EMPTY: u32 = 0;

pub const DIR_UP: usize = 0;
pub const DIR_RIGHT: usize = 1;
pub const DIR_DOWN: usize = 2;
pub const DIR_LEFT: usize = 3;

pub fn neighbor_index(index: usize, size: usize, dir: usize) -> Option<usize> {
    if index >= size * size {
        return None;
    }
    let col = index % size;
    let row = index / size;
    match dir {
        DIR_UP if row > 0 => Some(index - size),
        DIR_RIGHT if col + 1 < size => Some(index + 1),
        DIR_DOWN if row + 1 < size => Some(index + size),
        DIR_LEFT if col > 0 => Some(index - 1),
        _ => None,
    }
}

/// Orthogonal adjacency on a `size`x`size` grid. Diagonals, the cell itself
/// and out-of-range indices are never adjacent.
pub fn is_adjacent(size: usize, a: usize, b: usize) -> bool {
    let total = size * size;
    if a >= total || b >= total {
        return false;
    }
    let (row_a, col_a) = (a / size, a % size);
    let (row_b, col_b) = (b / size, b % size);
    (row_a.abs_diff(row_b) == 1 && col_a == col_b) || (col_a.abs_diff(col_b) == 1 && row_a == row_b)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Ignored,
    Moved { moves: u32 },
    Solved { moves: u32 },
}

impl MoveOutcome {
    pub fn applied(self) -> bool {
        !matches!(self, MoveOutcome::Ignored)
    }
}

/// Empty-slot positions recorded before each shuffle step. Moving the tiles at
/// these positions in reverse order undoes the shuffle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShuffleTrace {
    steps: Vec<usize>,
}

impl ShuffleTrace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn undo_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().rev().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleBoard {
    size: usize,
    tiles: Vec<u32>,
    empty_index: usize,
    moves: u32,
}

impl PuzzleBoard {
    pub fn new(size: BoardSize) -> Self {
        let mut board = Self {
            size: size.get(),
            tiles: Vec::with_capacity(size.cell_count()),
            empty_index: 0,
            moves: 0,
        };
        board.initialize();
        board
    }

    /// Builds a board from an explicit arrangement. The move counter starts at 0.
    pub fn from_tiles(size: BoardSize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        let total = size.cell_count();
        if tiles.len() != total {
            return Err(BoardError::WrongLength {
                expected: total,
                found: tiles.len(),
            });
        }
        let mut seen = HashSet::with_capacity(total);
        for &value in &tiles {
            if value as usize >= total {
                return Err(BoardError::OutOfRange { value, max: total as u32 - 1 });
            }
            if !seen.insert(value) {
                return Err(BoardError::Duplicate { value });
            }
        }
        let Some(empty_index) = tiles.iter().position(|&value| value == EMPTY) else {
            return Err(BoardError::MissingEmpty);
        };
        Ok(Self {
            size: size.get(),
            tiles,
            empty_index,
            moves: 0,
        })
    }

    /// Restores solved order and clears the move counter.
    pub fn initialize(&mut self) {
        let total = self.size * self.size;
        self.tiles.clear();
        self.tiles.extend(1..total as u32);
        self.tiles.push(EMPTY);
        self.empty_index = total - 1;
        self.moves = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn tile_at(&self, index: usize) -> Option<u32> {
        self.tiles.get(index).copied()
    }

    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        is_adjacent(self.size, a, b)
    }

    pub fn is_movable(&self, index: usize) -> bool {
        index != self.empty_index && self.is_adjacent(index, self.empty_index)
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        [DIR_UP, DIR_DOWN, DIR_LEFT, DIR_RIGHT]
            .into_iter()
            .filter_map(move |dir| neighbor_index(index, self.size, dir))
    }

    /// Slides the tile at `index` into the empty slot when they are adjacent.
    /// Anything else is ignored so callers can forward every request.
    pub fn attempt_move(&mut self, index: usize) -> MoveOutcome {
        if !self.is_adjacent(index, self.empty_index) {
            return MoveOutcome::Ignored;
        }
        self.swap_with_empty(index);
        self.moves = self.moves.saturating_add(1);
        if self.is_solved() {
            MoveOutcome::Solved { moves: self.moves }
        } else {
            MoveOutcome::Moved { moves: self.moves }
        }
    }

    pub fn is_solved(&self) -> bool {
        let Some((last, rest)) = self.tiles.split_last() else {
            return false;
        };
        rest.iter()
            .enumerate()
            .all(|(i, &value)| value == i as u32 + 1)
            && *last == EMPTY
    }

    /// Applies `steps` random legal moves, then clears the move counter.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R, steps: u32) -> ShuffleTrace {
        let mut trace = Vec::with_capacity(steps as usize);
        let mut options = Vec::with_capacity(4);
        for _ in 0..steps {
            options.clear();
            options.extend(self.neighbors(self.empty_index));
            if options.is_empty() {
                break;
            }
            let target = options[rng.random_range(0..options.len())];
            trace.push(self.empty_index);
            self.swap_with_empty(target);
        }
        self.moves = 0;
        ShuffleTrace { steps: trace }
    }

    /// Permutation parity test: odd widths need an even inversion count, even
    /// widths need inversions plus the empty row (counted from the bottom,
    /// starting at 1) to be odd.
    pub fn is_solvable(&self) -> bool {
        let values: Vec<u32> = self.tiles.iter().copied().filter(|&v| v != EMPTY).collect();
        let mut inversions = 0usize;
        for (i, &a) in values.iter().enumerate() {
            inversions += values[i + 1..].iter().filter(|&&b| b < a).count();
        }
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row_from_bottom = self.size - self.empty_index / self.size;
            (inversions + row_from_bottom) % 2 == 1
        }
    }

    pub fn cells(&self) -> Vec<CellView> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, &value)| CellView {
                index,
                value,
                empty: value == EMPTY,
                movable: self.is_movable(index),
            })
            .collect()
    }

    fn swap_with_empty(&mut self, index: usize) {
        self.tiles.swap(index, self.empty_index);
        self.empty_index = index;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { expected: usize, found: usize },
    OutOfRange { value: u32, max: u32 },
    Duplicate { value: u32 },
    MissingEmpty,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::WrongLength { expected, found } => {
                write!(f, "board needs {expected} cells, got {found}")
            }
            BoardError::OutOfRange { value, max } => {
                write!(f, "tile {value} is outside 0..={max}")
            }
            BoardError::Duplicate { value } => write!(f, "tile {value} appears more than once"),
            BoardError::MissingEmpty => write!(f, "board has no empty slot"),
        }
    }
}

impl std::error::Error for BoardError {}
