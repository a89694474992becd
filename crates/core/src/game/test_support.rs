//! Shared fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating round setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::content::{ITEM_SOLID, PURSUER_SOLID};
use crate::geometry::Body;

/// Running round on an open bordered 28x18 room with no items, pursuers or hazard.
pub(super) fn open_room_game(seed: u64) -> Game {
    let mut game = Game::new(seed, Difficulty::Easy, Map::new(MAX_COLS, MAX_ROWS));
    clear_round(&mut game);
    game.start();
    game
}

pub(super) fn clear_round(game: &mut Game) {
    let state = game.state_mut();
    state.items.clear();
    for id in state.pursuers.drain(..) {
        state.actors.remove(id);
    }
    if let Some(cell) = state.map.hazard_cell() {
        state.map.set_tile(cell, TileKind::Floor);
    }
}

pub(super) fn add_item(game: &mut Game, kind: ItemKind, cell: Cell) -> ItemId {
    game.state_mut().items.insert_with_key(|id| Item {
        id,
        kind,
        cell,
        solid: ITEM_SOLID,
        collidable: true,
    })
}

pub(super) fn add_pursuer(game: &mut Game, cell: Cell, speed: i32) -> EntityId {
    let state = game.state_mut();
    let id = state.actors.insert_with_key(|id| Actor {
        id,
        kind: ActorKind::ZombieProfessor,
        body: Body::new(cell.top_left(), PURSUER_SOLID, speed, Some(Direction::Right)),
        speed_effect: None,
    });
    state.pursuers.push(id);
    id
}

/// Moves the hero so its footprint sits at the top-left of `cell`, facing `direction`.
pub(super) fn place_hero(game: &mut Game, cell: Cell, direction: Direction) {
    let state = game.state_mut();
    let hero_id = state.hero_id;
    let body = &mut state.actors[hero_id].body;
    body.place_at(cell);
    body.face(direction);
}
