use super::collision::wall_collision;
use super::geometry::{Point, Rect};

/// Static wall blocks, each a circle of the same radius
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WallSet {
    positions: Vec<Point>,
    radius: f64,
}

impl WallSet {
    /// An empty set whose blocks will all have `radius`
    pub fn new(radius: f64) -> Self {
        Self {
            positions: Vec::new(),
            radius,
        }
    }

    pub fn from_positions(positions: Vec<Point>, radius: f64) -> Self {
        Self { positions, radius }
    }

    /// Walls for a grid map where `1` marks a wall cell.
    ///
    /// The grid is centred inside `arena`; each wall sits at its cell centre.
    pub fn from_grid(map: &[Vec<u8>], cell_size: f64, arena: Rect, radius: f64) -> Self {
        let rows = map.len();
        let cols = map.iter().map(Vec::len).max().unwrap_or(0);
        let origin = Point::new(
            arena.left + ((arena.right - arena.left) - cols as f64 * cell_size) / 2.0,
            arena.top + ((arena.bottom - arena.top) - rows as f64 * cell_size) / 2.0,
        );

        let mut walls = Self::new(radius);
        for (row, cells) in map.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 1 {
                    walls.add_wall(origin.moved_by(
                        col as f64 * cell_size + cell_size / 2.0,
                        row as f64 * cell_size + cell_size / 2.0,
                    ));
                }
            }
        }
        walls
    }

    pub fn add_wall(&mut self, position: Point) {
        self.positions.push(position);
    }

    /// Blocks every `spacing` units from `start` toward `end`, both ends included
    /// when the length is a multiple of `spacing`
    pub fn add_line(&mut self, start: Point, end: Point, spacing: f64) {
        let length = start.distance(end);
        if length == 0.0 || spacing <= 0.0 {
            self.add_wall(start);
            return;
        }

        let steps = (length / spacing + 1e-9).floor() as usize;
        for i in 0..=steps {
            let t = (i as f64 * spacing) / length;
            self.add_wall(start.lerp(end, t));
        }
    }

    /// Outline (or fill) the rectangle spanned by two corners
    pub fn add_rectangle(&mut self, top_left: Point, bottom_right: Point, filled: bool) {
        let spacing = self.block_size();
        if spacing <= 0.0 {
            self.add_wall(top_left);
            return;
        }
        if filled {
            let mut y = top_left.y;
            while y <= bottom_right.y {
                let mut x = top_left.x;
                while x <= bottom_right.x {
                    self.add_wall(Point::new(x, y));
                    x += spacing;
                }
                y += spacing;
            }
        } else {
            let top_right = Point::new(bottom_right.x, top_left.y);
            let bottom_left = Point::new(top_left.x, bottom_right.y);
            self.add_line(top_left, top_right, spacing);
            self.add_line(bottom_left, bottom_right, spacing);
            self.add_line(top_left, bottom_left, spacing);
            self.add_line(top_right, bottom_right, spacing);
        }
    }

    /// A ring of blocks `margin` inside the arena edges
    pub fn add_border(&mut self, margin: f64, arena: Rect) {
        let inner = arena.shrunk(margin);
        self.add_rectangle(
            Point::new(inner.left, inner.top),
            Point::new(inner.right, inner.bottom),
            false,
        );
    }

    /// A centre cross plus four small boxes near the corners
    pub fn add_maze(&mut self, arena: Rect) {
        let spacing = self.block_size();
        let c = arena.center();
        self.add_line(c.moved_by(-100.0, 0.0), c.moved_by(100.0, 0.0), spacing);
        self.add_line(c.moved_by(0.0, -80.0), c.moved_by(0.0, 80.0), spacing);

        let inset = 100.0;
        let size = 60.0;
        let corners = [
            Point::new(arena.left + inset, arena.top + inset),
            Point::new(arena.right - inset - size, arena.top + inset),
            Point::new(arena.left + inset, arena.bottom - inset - size),
            Point::new(arena.right - inset - size, arena.bottom - inset - size),
        ];
        for corner in corners {
            self.add_rectangle(corner, corner.moved_by(size, size), false);
        }
    }

    /// True when a head circle at `head` touches any block
    pub fn collides(&self, head: Point, head_radius: f64) -> bool {
        wall_collision(head, head_radius, &self.positions, self.radius)
    }

    /// Block centres in insertion order
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Visual block edge; the collision radius is 40% of it
    fn block_size(&self) -> f64 {
        self.radius * 2.5
    }
}
