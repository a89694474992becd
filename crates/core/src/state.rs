use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use slotmap::SlotMap;

use crate::content::item_category;
use crate::geometry::{Body, Rect, SolidArea};
use crate::notice::MessageBoard;
use crate::types::*;

/// Floor cells skipped at the start of the column-major walk before a hazard may appear.
const HAZARD_SKIP: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedEffect {
    pub base_speed: i32,
    pub expires_at_tick: u64,
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub body: Body,
    pub speed_effect: Option<SpeedEffect>,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub cell: Cell,
    pub solid: SolidArea,
    pub collidable: bool,
}

impl Item {
    pub fn absolute_rect(&self) -> Rect {
        let top_left = self.cell.top_left();
        Rect::new(
            top_left.x + self.solid.offset_x,
            top_left.y + self.solid.offset_y,
            self.solid.width,
            self.solid.height,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    hazard_revealed: bool,
}

impl Map {
    /// Open floor enclosed by a brick border. A zero dimension gives an empty map.
    pub fn new(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            return Self { width, height, tiles: Vec::new(), hazard_revealed: false };
        }
        let mut tiles = vec![TileKind::Floor; width * height];
        for x in 0..width {
            tiles[x] = TileKind::Bricks;
            tiles[(height - 1) * width + x] = TileKind::Bricks;
        }
        for y in 0..height {
            tiles[y * width] = TileKind::Bricks;
            tiles[y * width + (width - 1)] = TileKind::Bricks;
        }
        Self { width, height, tiles, hazard_revealed: false }
    }

    /// Builds a map from row-major tile kinds.
    /// The caller guarantees `tiles.len() == width * height`.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tiles, hazard_revealed: false }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as usize) < self.width
            && (cell.row as usize) < self.height
    }

    /// Nearest in-bounds cell.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            col: cell.col.clamp(0, (self.width as i32 - 1).max(0)),
            row: cell.row.clamp(0, (self.height as i32 - 1).max(0)),
        }
    }

    /// Tile at `cell`. Callers clamp first; out-of-bounds reads as solid bricks.
    pub fn tile_at(&self, cell: Cell) -> TileKind {
        debug_assert!(self.in_bounds(cell), "tile query out of bounds: {cell:?}");
        if !self.in_bounds(cell) {
            return TileKind::Bricks;
        }
        self.tiles[self.index(cell)]
    }

    pub fn set_tile(&mut self, cell: Cell, tile: TileKind) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.index(cell);
        self.tiles[idx] = tile;
    }

    pub fn is_traversable(&self, cell: Cell) -> bool {
        self.tile_at(cell).is_traversable()
    }

    pub fn is_level_end(&self, cell: Cell) -> bool {
        self.tile_at(cell).is_level_end()
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.tile_at(cell).is_hazard()
    }

    /// Cells in column-major order, the order hazard placement walks.
    pub fn cells_column_major(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width as i32)
            .flat_map(move |col| (0..self.height as i32).map(move |row| Cell { col, row }))
    }

    pub fn hazard_cell(&self) -> Option<Cell> {
        self.cells_column_major().find(|&cell| self.tile_at(cell).is_hazard())
    }

    /// Turns one floor cell into the hidden smoke hazard.
    ///
    /// Draws `k` uniformly in `[5, n]` over the `n` floor cells and converts the
    /// `k`-th floor cell of a column-major walk. `k == n` converts nothing.
    pub fn place_hazard(&mut self, rng: &mut ChaCha8Rng) -> Option<Cell> {
        let floor: Vec<Cell> = self
            .cells_column_major()
            .filter(|&cell| self.tile_at(cell) == TileKind::Floor)
            .collect();
        if floor.len() < HAZARD_SKIP {
            return None;
        }
        let span = (floor.len() - HAZARD_SKIP + 1) as u64;
        let pick = HAZARD_SKIP + (rng.next_u64() % span) as usize;
        let cell = floor.get(pick).copied()?;
        self.set_tile(cell, TileKind::Smoke);
        Some(cell)
    }

    pub fn reveal_hazard(&mut self) {
        self.hazard_revealed = true;
    }

    pub fn hazard_revealed(&self) -> bool {
        self.hazard_revealed
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.row as usize) * self.width + (cell.col as usize)
    }
}

pub struct GameState {
    pub map: Map,
    pub actors: SlotMap<EntityId, Actor>,
    pub items: SlotMap<ItemId, Item>,
    pub hero_id: EntityId,
    /// Pursuer slots, stepped in order each tick.
    pub pursuers: Vec<EntityId>,
    pub score: i32,
    pub items_collected: u32,
    pub hero_alive: bool,
    pub messages: MessageBoard,
}

impl GameState {
    pub fn hero(&self) -> &Actor {
        &self.actors[self.hero_id]
    }

    pub fn rewards_left(&self) -> usize {
        self.items
            .values()
            .filter(|item| item_category(item.kind) == ItemCategory::Reward)
            .count()
    }
}
