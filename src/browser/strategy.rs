//! Line and column selection heuristics
//!
//! Pure functions over line counts and a random source. The simulator feeds
//! them the current document state and applies the result to the view.
//!
//! Documents are split into three tiers by line count:
//!
//! | Tier   | Lines  | Behavior                                          |
//! |--------|--------|---------------------------------------------------|
//! | Small  | ≤ 10   | step one line forward, stop at the last line      |
//! | Medium | 11..30 | jump 1..=3 lines in a random direction            |
//! | Large  | > 30   | one of [`LargeMove`] chosen uniformly each tick   |

use rand::Rng;

/// Documents up to this many lines are swept line by line
pub const SMALL_MAX_LINES: usize = 10;

/// Documents up to this many lines are browsed with short jumps
pub const MEDIUM_MAX_LINES: usize = 30;

/// Columns past this are never chosen, long lines or not
pub const MAX_COLUMN: usize = 80;

/// Size tier of a document, decides which scroll heuristic applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    pub fn for_line_count(line_count: usize) -> Self {
        if line_count <= SMALL_MAX_LINES {
            Self::Small
        } else if line_count <= MEDIUM_MAX_LINES {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// Moves available to large documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeMove {
    /// Read on for a few lines
    StepForward,
    /// Glance back a few lines
    StepBackward,
    /// Jump somewhere inside one of the four quarters of the document
    Quartile,
    /// Jump anywhere
    Anywhere,
}

impl LargeMove {
    pub const ALL: [LargeMove; 4] = [
        Self::StepForward,
        Self::StepBackward,
        Self::Quartile,
        Self::Anywhere,
    ];

    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Line to land on right after a document is opened
///
/// Returns `None` for an empty document.
pub fn initial_line<R: Rng>(line_count: usize, rng: &mut R) -> Option<usize> {
    match line_count {
        0 => None,
        n if n > SMALL_MAX_LINES => Some(rng.random_range(0..5)),
        _ => Some(0),
    }
}

/// Next line for a scroll tick, or `None` when the document is too short to scroll
///
/// The result is always in `0..line_count`.
pub fn next_line<R: Rng>(current: usize, line_count: usize, rng: &mut R) -> Option<usize> {
    if line_count <= 1 {
        return None;
    }
    let last = line_count - 1;
    let current = current.min(last);

    let line = match Tier::for_line_count(line_count) {
        Tier::Small => (current + 1).min(last),
        Tier::Medium => {
            let jump = rng.random_range(1..=3);
            if rng.random_bool(0.5) {
                (current + jump).min(last)
            } else {
                current.saturating_sub(jump)
            }
        }
        Tier::Large => large_move(LargeMove::pick(rng), current, line_count, rng),
    };

    Some(line.min(last))
}

/// Apply a specific large-document move
pub fn large_move<R: Rng>(mv: LargeMove, current: usize, line_count: usize, rng: &mut R) -> usize {
    let last = line_count.saturating_sub(1);
    let line = match mv {
        LargeMove::StepForward => current + rng.random_range(1..=5),
        LargeMove::StepBackward => current.saturating_sub(rng.random_range(1..=5)),
        LargeMove::Quartile => {
            let region_size = (line_count / 4).max(1);
            let region = rng.random_range(0..4);
            let start = region * region_size;
            start + rng.random_range(0..region_size)
        }
        LargeMove::Anywhere => rng.random_range(0..line_count.max(1)),
    };
    tracing::trace!(?mv, current, line, "Large document move");
    line.min(last)
}

/// Column to place the caret on within a line of `line_length` characters
pub fn column<R: Rng>(line_length: usize, rng: &mut R) -> usize {
    if line_length == 0 {
        0
    } else {
        rng.random_range(0..line_length.min(MAX_COLUMN))
    }
}
