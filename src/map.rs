use glam::Vec2;

use crate::error::MapError;
use crate::geometry::Cell;

/// Texture id reported for out-of-bounds cells.
pub const BOUNDARY_TEXTURE: u8 = 1;

/// Static occupancy grid.
///
/// Each cell is either free (`0`) or a wall carrying a texture id `1..=9`.
/// The grid never changes after construction. Every query treats cells outside
/// the grid as walls, so callers never need to bounds-check first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    cols: i32,
    rows: i32,
    cells: Vec<u8>,
}

impl GridMap {
    /// Build a grid from layout rows. `.` and space are free floor, digits
    /// `1`–`9` are walls. Any other character is rejected; use
    /// [`Level::parse`](crate::level::Level::parse) for entity markers.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        Self::parse_with(rows, |_, _, _| false)
    }

    /// Shared parser. `marker` is offered every non-grid character with its
    /// cell; returning `true` accepts it as free floor.
    pub(crate) fn parse_with<S: AsRef<str>>(
        rows: &[S],
        mut marker: impl FnMut(char, usize, usize) -> bool,
    ) -> Result<Self, MapError> {
        let Some(first) = rows.first() else { return Err(MapError::Empty) };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow { row, expected: width, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' | '0' => 0,
                    '1'..='9' => ch as u8 - b'0',
                    other if marker(other, col, row) => 0,
                    other => return Err(MapError::InvalidCell { col, row, ch: other }),
                };
                cells.push(cell);
            }
        }

        Ok(Self { cols: width as i32, rows: rows.len() as i32, cells })
    }

    /// An open `cols × rows` room enclosed by a one-cell border wall.
    pub fn bordered(cols: i32, rows: i32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut cells = vec![0u8; (cols * rows) as usize];
        for y in 0..rows {
            for x in 0..cols {
                if x == 0 || y == 0 || x == cols - 1 || y == rows - 1 {
                    cells[(y * cols + x) as usize] = 1;
                }
            }
        }
        Self { cols, rows, cells }
    }

    pub fn cols(&self) -> i32 { self.cols }
    pub fn rows(&self) -> i32 { self.rows }

    #[inline]
    pub fn contains(&self, (x, y): Cell) -> bool {
        x >= 0 && y >= 0 && x < self.cols && y < self.rows
    }

    /// Wall texture id at `cell`, `None` for free floor.
    #[inline]
    pub fn wall_at(&self, cell: Cell) -> Option<u8> {
        if !self.contains(cell) {
            return Some(BOUNDARY_TEXTURE);
        }
        match self.cells[(cell.1 * self.cols + cell.0) as usize] {
            0 => None,
            id => Some(id),
        }
    }

    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.wall_at(cell).is_some()
    }

    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_wall(cell)
    }

    /// All free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows)
            .flat_map(move |y| (0..self.cols).map(move |x| (x, y)))
            .filter(|&c| self.is_free(c))
    }

    /// Move `pos` by `delta`, resolving collisions one axis at a time so a
    /// blocked axis does not stop movement along the other.
    ///
    /// Each axis probes the cell `radius` ahead of the destination in the
    /// direction of travel; the move along that axis is rejected when the
    /// probe lands in a wall.
    pub fn slide(&self, pos: Vec2, delta: Vec2, radius: f32) -> Vec2 {
        let mut out = pos;
        if delta.x != 0.0 {
            let probe = out.x + delta.x + radius * delta.x.signum();
            if self.is_free((probe.floor() as i32, out.y.floor() as i32)) {
                out.x += delta.x;
            }
        }
        if delta.y != 0.0 {
            let probe = out.y + delta.y + radius * delta.y.signum();
            if self.is_free((out.x.floor() as i32, probe.floor() as i32)) {
                out.y += delta.y;
            }
        }
        out
    }
}
