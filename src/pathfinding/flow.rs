use std::collections::{HashSet, VecDeque};

use crate::geometry::{ALL_DIRECTIONS, Cell};
use crate::map::GridMap;

// =============================================================================
// PATH TABLE
// =============================================================================
///
/// Breadth-first flow field toward a single goal cell.
///
/// Every reachable free cell stores the 8-neighbour offset that lies on a
/// shortest path to the goal, plus its step count. Following the offsets from
/// any reachable cell arrives at the goal in exactly `distance` steps.
///
/// Convention:
/// - the goal has distance 0 and no direction
/// - unreachable cells have no entry
/// - a goal outside the map or inside a wall yields an empty table
#[derive(Clone, Debug, Default)]
pub struct PathTable {
    cols: i32,
    rows: i32,
    goal: Option<Cell>,
    dirs: Vec<Option<(i32, i32)>>,
    dist: Vec<Option<u32>>,
}

impl PathTable {
    /// Build the table for `goal`.
    ///
    /// Cells in `blocked` (alive NPCs) are discovered and receive an entry but
    /// the search does not expand through them. Diagonal steps that would cut
    /// a wall corner are not taken.
    pub fn compute(map: &GridMap, goal: Cell, blocked: &HashSet<Cell>) -> Self {
        let cols = map.cols();
        let rows = map.rows();
        let size = (cols * rows) as usize;
        let mut table = Self {
            cols,
            rows,
            goal: None,
            dirs: vec![None; size],
            dist: vec![None; size],
        };
        if map.is_wall(goal) {
            return table;
        }

        table.goal = Some(goal);
        let gi = table.index(goal);
        table.dist[gi] = Some(0);

        let mut queue: VecDeque<Cell> = VecDeque::new();
        queue.push_back(goal);

        while let Some(cell) = queue.pop_front() {
            if cell != goal && blocked.contains(&cell) {
                continue;
            }
            let current = table.dist[table.index(cell)].unwrap_or(0);
            for (dx, dy) in ALL_DIRECTIONS {
                let next = (cell.0 + dx, cell.1 + dy);
                if map.is_wall(next) {
                    continue;
                }
                if dx != 0 && dy != 0
                    && (map.is_wall((cell.0 + dx, cell.1)) || map.is_wall((cell.0, cell.1 + dy)))
                {
                    continue;
                }
                let ni = table.index(next);
                if table.dist[ni].is_none() {
                    table.dist[ni] = Some(current + 1);
                    // Point back at the cell we came from.
                    table.dirs[ni] = Some((-dx, -dy));
                    queue.push_back(next);
                }
            }
        }

        table
    }

    #[inline]
    fn index(&self, (x, y): Cell) -> usize {
        (y * self.cols + x) as usize
    }

    #[inline]
    fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && y >= 0 && x < self.cols && y < self.rows
    }

    /// The cell the table leads to, `None` for an empty table.
    pub fn goal(&self) -> Option<Cell> { self.goal }

    pub fn is_empty(&self) -> bool { self.goal.is_none() }

    /// Offset to step from `cell` toward the goal.
    pub fn direction(&self, cell: Cell) -> Option<(i32, i32)> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.dirs[self.index(cell)]
    }

    /// The neighbour of `cell` on a shortest path to the goal.
    pub fn next_cell(&self, cell: Cell) -> Option<Cell> {
        self.direction(cell).map(|(dx, dy)| (cell.0 + dx, cell.1 + dy))
    }

    /// Shortest step count from `cell` to the goal.
    pub fn distance(&self, cell: Cell) -> Option<u32> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.dist[self.index(cell)]
    }

    /// Number of cells with an entry, the goal included.
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }
}

// =============================================================================
// PATH FINDER
// =============================================================================

/// Recomputes a [`PathTable`] on a fixed interval. Between recomputes callers
/// read the previous, possibly stale, table.
#[derive(Debug)]
pub struct PathFinder {
    interval: f32,
    elapsed: f32,
    fresh: bool,
    table: PathTable,
}

impl PathFinder {
    pub fn new(interval: f32) -> Self {
        Self { interval, elapsed: 0.0, fresh: false, table: PathTable::default() }
    }

    /// Advance the timer; recompute when due or when no table exists yet.
    /// Returns `true` if the table was rebuilt.
    pub fn tick(&mut self, dt: f32, map: &GridMap, goal: Cell, blocked: &HashSet<Cell>) -> bool {
        self.elapsed += dt;
        if self.fresh && self.elapsed < self.interval {
            return false;
        }
        self.elapsed = 0.0;
        self.fresh = true;
        self.table = PathTable::compute(map, goal, blocked);
        tracing::debug!(
            goal = ?goal,
            reachable = self.table.reachable_count(),
            "path table recomputed"
        );
        true
    }

    pub fn table(&self) -> &PathTable { &self.table }
}
