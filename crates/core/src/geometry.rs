//! Pixel-space rectangles and the movable body shared by the hero and pursuers.
//! This module exists so collision math works on plain values computed on demand.
//! It does not own tile lookups, item rules, or any per-tick sequencing.

use crate::types::{Cell, Direction, PixelPos, TILE_SIZE};

/// Axis-aligned rectangle in pixels. `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-tile rectangle covering `cell`.
    pub fn of_cell(cell: Cell) -> Self {
        let top_left = cell.top_left();
        Self::new(top_left.x, top_left.y, TILE_SIZE, TILE_SIZE)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Last pixel column covered by the rectangle.
    pub fn last_x(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Last pixel row covered by the rectangle.
    pub fn last_y(&self) -> i32 {
        self.y + self.height - 1
    }
}

/// Collision footprint relative to a body's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SolidArea {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl SolidArea {
    pub const fn new(offset_x: i32, offset_y: i32, width: i32, height: i32) -> Self {
        Self { offset_x, offset_y, width, height }
    }

    /// Square footprint anchored at the position, `inset` pixels smaller than a tile.
    pub const fn tile_inset(inset: i32) -> Self {
        Self::new(0, 0, TILE_SIZE - inset, TILE_SIZE - inset)
    }
}

/// Edges of a body's footprint as used by pursuer steering.
/// `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub pos: PixelPos,
    pub solid: SolidArea,
    /// `None` until the body is first given a heading.
    pub direction: Option<Direction>,
    /// Facing used for sprites; only horizontal headings update it.
    pub last_horizontal: Direction,
    pub speed: i32,
    pub collision: bool,
    pub reached_end: bool,
    pub on_hazard: bool,
}

impl Body {
    pub fn new(pos: PixelPos, solid: SolidArea, speed: i32, direction: Option<Direction>) -> Self {
        let last_horizontal = match direction {
            Some(dir) if dir.is_horizontal() => dir,
            _ => Direction::Right,
        };
        Self {
            pos,
            solid,
            direction,
            last_horizontal,
            speed,
            collision: false,
            reached_end: false,
            on_hazard: false,
        }
    }

    pub fn absolute_rect(&self) -> Rect {
        Rect::new(
            self.pos.x + self.solid.offset_x,
            self.pos.y + self.solid.offset_y,
            self.solid.width,
            self.solid.height,
        )
    }

    /// Footprint shifted one step along the current direction.
    pub fn projected_rect(&self) -> Option<Rect> {
        let direction = self.direction?;
        let (dx, dy) = direction.offset(self.speed);
        Some(self.absolute_rect().translated(dx, dy))
    }

    pub fn bounds(&self) -> Bounds {
        let rect = self.absolute_rect();
        Bounds {
            left: rect.x,
            right: rect.x + rect.width,
            top: rect.y,
            bottom: rect.y + rect.height,
        }
    }

    /// Tile containing the footprint's top-left corner.
    pub fn cell(&self) -> Cell {
        let rect = self.absolute_rect();
        PixelPos { x: rect.x, y: rect.y }.cell()
    }

    pub fn face(&mut self, direction: Direction) {
        if direction.is_horizontal() {
            self.last_horizontal = direction;
        }
        self.direction = Some(direction);
    }

    pub fn clear_flags(&mut self) {
        self.collision = false;
        self.reached_end = false;
        self.on_hazard = false;
    }

    /// Moves one step along the current direction.
    pub fn advance(&mut self) {
        if let Some(direction) = self.direction {
            let (dx, dy) = direction.offset(self.speed);
            self.pos.x += dx;
            self.pos.y += dy;
        }
    }

    pub fn place_at(&mut self, cell: Cell) {
        self.pos = cell.top_left();
    }
}
