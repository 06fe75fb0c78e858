use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::error::PathError;
use crate::grid::Cell;

/// Search algorithm used to steer the snake.
///
/// Both strategies return a shortest route in step count on a 4-connected grid.
/// When several shortest routes exist, which one comes back depends on the
/// strategy's expansion order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PathStrategy {
    #[serde(rename = "bfs")]
    #[value(name = "bfs")]
    BreadthFirst,
    #[serde(rename = "astar")]
    #[value(name = "astar")]
    AStar,
}

impl PathStrategy {
    /// Returns the shortest route from `origin` (exclusive) to `target` (inclusive)
    /// that never enters `blocked` or leaves the grid.
    ///
    /// Returns `None` when no route exists, including when the target is
    /// blocked or out of bounds.
    #[must_use]
    pub fn find_path(
        self,
        origin: Cell,
        target: Cell,
        blocked: &HashSet<Cell>,
        bounds: GridSize,
    ) -> Option<Vec<Cell>> {
        self.checked_path(origin, target, blocked, bounds)
            .ok()
            .flatten()
    }

    /// Like [`find_path`](Self::find_path), but reports a malformed request as an error
    /// instead of folding it into "no route".
    pub fn checked_path(
        self,
        origin: Cell,
        target: Cell,
        blocked: &HashSet<Cell>,
        bounds: GridSize,
    ) -> Result<Option<Vec<Cell>>, PathError> {
        if !origin.is_within_bounds(bounds) {
            return Err(PathError::OriginOutOfBounds(origin));
        }
        if !target.is_within_bounds(bounds) {
            return Err(PathError::TargetOutOfBounds(target));
        }
        if blocked.contains(&target) {
            return Err(PathError::TargetBlocked(target));
        }
        if origin == target {
            return Ok(Some(Vec::new()));
        }

        Ok(match self {
            Self::BreadthFirst => breadth_first(origin, target, blocked, bounds),
            Self::AStar => a_star(origin, target, blocked, bounds),
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::AStar => "astar",
        }
    }
}

impl fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn breadth_first(
    origin: Cell,
    target: Cell,
    blocked: &HashSet<Cell>,
    bounds: GridSize,
) -> Option<Vec<Cell>> {
    let mut queue = VecDeque::from([origin]);
    let mut visited = HashSet::from([origin]);
    let mut parents = HashMap::new();

    while let Some(current) = queue.pop_front() {
        if current == target {
            return Some(reconstruct(&parents, target));
        }

        for neighbour in current.neighbours_within(bounds) {
            if blocked.contains(&neighbour) || !visited.insert(neighbour) {
                continue;
            }
            parents.insert(neighbour, current);
            queue.push_back(neighbour);
        }
    }

    None
}

/// Open-set entry. Ordered so that `BinaryHeap` pops the lowest `(f, g)` first,
/// with earlier insertions winning ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u64,
    cell: Cell,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.f, other.g, other.seq).cmp(&(self.f, self.g, self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn a_star(
    origin: Cell,
    target: Cell,
    blocked: &HashSet<Cell>,
    bounds: GridSize,
) -> Option<Vec<Cell>> {
    let mut open = BinaryHeap::new();
    let mut closed = HashSet::new();
    let mut g_score = HashMap::from([(origin, 0_u32)]);
    let mut parents = HashMap::new();
    let mut seq = 0_u64;

    open.push(OpenNode {
        f: origin.manhattan(target),
        g: 0,
        seq,
        cell: origin,
    });

    while let Some(OpenNode { g, cell: current, .. }) = open.pop() {
        if current == target {
            return Some(reconstruct(&parents, target));
        }
        // Stale entry superseded by a cheaper push.
        if !closed.insert(current) {
            continue;
        }

        for neighbour in current.neighbours_within(bounds) {
            if blocked.contains(&neighbour) || closed.contains(&neighbour) {
                continue;
            }

            let tentative = g + 1;
            if g_score
                .get(&neighbour)
                .is_some_and(|&known| known <= tentative)
            {
                continue;
            }

            g_score.insert(neighbour, tentative);
            parents.insert(neighbour, current);
            seq += 1;
            open.push(OpenNode {
                f: tentative + neighbour.manhattan(target),
                g: tentative,
                seq,
                cell: neighbour,
            });
        }
    }

    None
}

/// Walks parent links back from `target`. The origin has no parent entry.
fn reconstruct(parents: &HashMap<Cell, Cell>, target: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = target;
    while let Some(&parent) = parents.get(&current) {
        path.push(current);
        current = parent;
    }
    path.reverse();
    path
}
