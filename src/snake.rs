use std::collections::{HashSet, VecDeque};

use crate::config::GridSize;
use crate::grid::Cell;

/// The snake's body, head first, plus growth that has been earned but not yet laid down.
///
/// Growth is realised one segment per move by keeping the tail in place, so the
/// body never holds the same cell twice.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    pending_growth: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        Self {
            body: VecDeque::from([start]),
            pending_growth: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: VecDeque::from(segments),
            pending_growth: 0,
        })
    }

    /// Moves the head onto `next_head`. The tail follows unless growth is pending.
    pub fn advance(&mut self, next_head: Cell) {
        self.body.push_front(next_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Moves the head onto `next_head` and keeps the tail, growing by one.
    pub fn advance_and_grow(&mut self, next_head: Cell) {
        self.body.push_front(next_head);
    }

    /// Schedules enough growth to double [`target_len`](Self::target_len).
    pub fn grow_double(&mut self) {
        self.pending_growth += self.target_len();
    }

    /// Halves [`target_len`](Self::target_len), keeping the head-end prefix and at least one segment.
    pub fn shrink_half(&mut self) {
        let keep = (self.target_len() / 2).max(1);
        if keep >= self.body.len() {
            self.pending_growth = keep - self.body.len();
        } else {
            self.pending_growth = 0;
            self.body.truncate(keep);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Cells a path search must avoid: every segment except the head.
    #[must_use]
    pub fn obstacles(&self) -> HashSet<Cell> {
        self.body.iter().skip(1).copied().collect()
    }

    /// Every occupied cell.
    #[must_use]
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns true if no cell appears twice and every cell lies in `bounds`.
    #[must_use]
    pub fn is_consistent(&self, bounds: GridSize) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body
            .iter()
            .all(|cell| cell.is_within_bounds(bounds) && seen.insert(*cell))
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments laid down plus growth still owed.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.body.len() + self.pending_growth
    }

    #[must_use]
    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
