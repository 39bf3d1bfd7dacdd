use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::model::PuzzleConfig;

/// Grid cell holding the target character, 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerPosition {
    /// Row index, `0 <= row < rows`.
    pub row: u32,
    /// Column index, `0 <= col < cols`.
    pub col: u32,
}

impl AnswerPosition {
    /// Construct a position from row/column indices.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Whether the position lies inside a `rows x cols` grid.
    pub fn fits(self, rows: u32, cols: u32) -> bool {
        self.row < rows && self.col < cols
    }
}

/// Choose a target cell uniformly at random using the thread-local RNG.
///
/// `rows` and `cols` must be at least 1.
pub fn choose_target(rows: u32, cols: u32) -> AnswerPosition {
    choose_target_with(&mut rand::thread_rng(), rows, cols)
}

/// Choose a target cell uniformly at random from `rng`.
pub fn choose_target_with<R: Rng + ?Sized>(rng: &mut R, rows: u32, cols: u32) -> AnswerPosition {
    AnswerPosition {
        row: rng.gen_range(0..rows.max(1)),
        col: rng.gen_range(0..cols.max(1)),
    }
}

/// Stable identity of one question/answer pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

/// One puzzle instance: the target is chosen once and shared by both renders.
///
/// Both the question and the answer render take the same instance, so the revealed
/// cell always coincides with the cell that held the target in the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleInstance {
    id: PuzzleId,
    target: AnswerPosition,
}

impl PuzzleInstance {
    /// Start a new puzzle for `config`'s grid using the thread-local RNG.
    pub fn new(config: &PuzzleConfig) -> Self {
        Self::new_with(&mut rand::thread_rng(), config)
    }

    /// Start a new puzzle drawing the id and the target from `rng`.
    pub fn new_with<R: Rng + ?Sized>(rng: &mut R, config: &PuzzleConfig) -> Self {
        let target = choose_target_with(rng, config.grid.rows, config.grid.cols);
        Self {
            id: PuzzleId(rng.next_u64()),
            target,
        }
    }

    /// Pin the target, e.g. to reproduce a previously published puzzle.
    pub fn with_target(id: PuzzleId, target: AnswerPosition) -> Self {
        Self { id, target }
    }

    /// Identity used to key cached renders.
    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// The answer cell.
    pub fn target(&self) -> AnswerPosition {
        self.target
    }

    /// Replace this puzzle with a fresh one; the only way a target changes.
    pub fn regenerate(&self, config: &PuzzleConfig) -> Self {
        Self::regenerate_with(self, &mut rand::thread_rng(), config)
    }

    /// Like [`PuzzleInstance::regenerate`] but drawing from `rng`.
    ///
    /// The new id always differs from the old one so stale caches cannot match.
    pub fn regenerate_with<R: Rng + ?Sized>(&self, rng: &mut R, config: &PuzzleConfig) -> Self {
        let mut next = Self::new_with(rng, config);
        if next.id == self.id {
            next.id = PuzzleId(self.id.0.wrapping_add(1));
        }
        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/target.rs"]
mod tests;
