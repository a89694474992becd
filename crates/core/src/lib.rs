pub mod content;
pub mod game;
pub mod geometry;
pub mod journal;
pub mod journal_file;
pub mod map_file;
pub mod notice;
pub mod replay;
pub mod state;
pub mod types;

pub use game::Game;
pub use game::pathfinding::PathFinder;
pub use geometry::{Body, Bounds, Rect, SolidArea};
pub use journal::{InputFrame, InputJournal};
pub use journal_file::{JournalError, JournalWriter, load_journal_from_file, write_journal};
pub use map_file::{LevelMap, MapError, MapSource};
pub use notice::MessageBoard;
pub use replay::*;
pub use state::{Actor, GameState, Item, Map};
pub use types::*;
