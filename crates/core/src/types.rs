use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: i32 = 48;
pub const MAX_COLS: usize = 28;
pub const MAX_ROWS: usize = 18;
pub const TICKS_PER_SECOND: u64 = 60;

/// Grid coordinate of one map tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Pixel-space top-left corner of this tile.
    pub fn top_left(self) -> PixelPos {
        PixelPos { x: self.col * TILE_SIZE, y: self.row * TILE_SIZE }
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    /// Tile containing this pixel. Negative coordinates floor toward the previous tile.
    pub fn cell(self) -> Cell {
        Cell { col: self.x.div_euclid(TILE_SIZE), row: self.y.div_euclid(TILE_SIZE) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Pixel offset of one movement step at `speed`.
    pub fn offset(self, speed: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -speed),
            Direction::Down => (0, speed),
            Direction::Left => (-speed, 0),
            Direction::Right => (speed, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Tile types addressed by the integer ids stored in map files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Floor,
    Door,
    Locker,
    Bricks,
    End,
    Smoke,
}

impl TileKind {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(TileKind::Floor),
            1 => Some(TileKind::Door),
            2 => Some(TileKind::Locker),
            3 => Some(TileKind::Bricks),
            4 => Some(TileKind::End),
            5 => Some(TileKind::Smoke),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            TileKind::Floor => 0,
            TileKind::Door => 1,
            TileKind::Locker => 2,
            TileKind::Bricks => 3,
            TileKind::End => 4,
            TileKind::Smoke => 5,
        }
    }

    pub fn is_traversable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Smoke)
    }

    pub fn is_level_end(self) -> bool {
        self == TileKind::End
    }

    pub fn is_hazard(self) -> bool {
        self == TileKind::Smoke
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorKind {
    Hero,
    ZombieProfessor,
    Bear,
    FailedExam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bed,
    APlusPaper,
    Coffee,
    PileOfBooks,
    Vortex,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Bed => "Bed",
            ItemKind::APlusPaper => "APlusPaper",
            ItemKind::Coffee => "Coffee",
            ItemKind::PileOfBooks => "PileOfBooks",
            ItemKind::Vortex => "Vortex",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Reward,
    Punishment,
}

/// Every gameplay effect an item or hazard tile can apply to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    Reward(i32),
    Punishment(i32),
    Teleport { penalty: i32 },
    SpeedBoost { delta: i32, speed: i32, seconds: u64 },
    SpeedDebuff { speed: i32, seconds: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown difficulty '{raw}' (expected Easy, Medium or Hard)"))
    }
}

/// Held state of the four directional keys for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    pub const IDLE: InputSnapshot =
        InputSnapshot { up: false, down: false, left: false, right: false };

    pub fn only(direction: Direction) -> Self {
        let mut input = Self::IDLE;
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// First held key in up, down, left, right order.
    pub fn held_direction(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Marker returned when two characters' rectangles meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossCause {
    Caught,
    ScoreDepleted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Won,
    Lost(LossCause),
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundState {
    Idle,
    Running,
    /// Level end reached with rewards still on the map; play resumes next tick.
    WonPending,
    Won { terminate_at_tick: u64 },
    Lost(LossCause),
    Terminated,
}

impl RoundState {
    /// Whether the hero and pursuers still act this tick.
    pub fn is_active(self) -> bool {
        matches!(self, RoundState::Running | RoundState::WonPending)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub state: RoundState,
    pub terminate_requested: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RoundStarted { difficulty: Difficulty },
    ItemPickedUp { kind: ItemKind, cell: Cell },
    Teleported { from: Cell, to: Cell },
    HazardTriggered { cell: Cell },
    CompletionRejected { rewards_left: usize },
    PapersRelocated { count: usize },
    RoundWon { tick: u64 },
    RoundLost { cause: LossCause, tick: u64 },
    RoundAborted { tick: u64 },
}
