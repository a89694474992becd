//! Rectangle tests between moving bodies, map tiles, items and other bodies.
//! This module exists to keep every overlap rule in one place for both the
//! hero and pursuers. It does not apply item effects or change round state.
//!
//! Rectangles are computed as values from each body's relative solid area, so
//! no check leaves an absolute offset behind.

use slotmap::SlotMap;

use crate::content::{HAZARD_MESSAGE, pickup_message};
use crate::geometry::{Body, Rect};
use crate::notice::MessageBoard;
use crate::state::{Actor, Item, Map};
use crate::types::{Cell, Contact, Direction, EntityId, ItemId, PixelPos, TileKind};

/// Raises the body's tile flags for the leading edge one step ahead.
///
/// Looks at the (up to) two cells the projected edge covers. No-op when the
/// body has no direction yet.
pub fn check_tile(map: &Map, body: &mut Body, messages: &mut MessageBoard) {
    let Some(direction) = body.direction else {
        return;
    };
    let rect = body.absolute_rect();
    let speed = body.speed;
    let (first, second) = match direction {
        Direction::Up => {
            let y = rect.y - speed;
            (PixelPos { x: rect.x, y }, PixelPos { x: rect.last_x(), y })
        }
        Direction::Down => {
            let y = rect.last_y() + speed;
            (PixelPos { x: rect.x, y }, PixelPos { x: rect.last_x(), y })
        }
        Direction::Left => {
            let x = rect.x - speed;
            (PixelPos { x, y: rect.y }, PixelPos { x, y: rect.last_y() })
        }
        Direction::Right => {
            let x = rect.last_x() + speed;
            (PixelPos { x, y: rect.y }, PixelPos { x, y: rect.last_y() })
        }
    };

    // Off the grid counts as a wall, so borderless maps still hold bodies in.
    let tiles = [first.cell(), second.cell()]
        .map(|cell| if map.in_bounds(cell) { map.tile_at(cell) } else { TileKind::Bricks });
    if tiles.iter().any(|tile| !tile.is_traversable()) {
        body.collision = true;
    }
    if tiles.iter().any(|tile| tile.is_level_end()) {
        body.reached_end = true;
    }
    if tiles.iter().any(|tile| tile.is_hazard()) {
        body.on_hazard = true;
        messages.show_message(HAZARD_MESSAGE);
    }
}

/// Tests the body's one-step projection against every live item.
///
/// Collidable hits raise the collision flag and post a pickup message. When
/// `primary` is set the last intersecting item is returned. The id is only
/// meaningful until the item set changes.
pub fn check_item(
    items: &SlotMap<ItemId, Item>,
    body: &mut Body,
    primary: bool,
    messages: &mut MessageBoard,
) -> Option<ItemId> {
    let projected = body.projected_rect()?;
    let mut hit = None;
    for (id, item) in items {
        if !projected.intersects(&item.absolute_rect()) {
            continue;
        }
        if item.collidable {
            body.collision = true;
            messages.show_message(pickup_message(item.kind));
        }
        if primary {
            hit = Some(id);
        }
    }
    hit
}

/// Tests the actor's one-step projection against `other`'s footprint.
pub fn check_character(actor: &mut Body, other: Option<&Body>) -> Option<Contact> {
    let other = other?;
    let projected = actor.projected_rect()?;
    if projected.intersects(&other.absolute_rect()) {
        actor.collision = true;
        Some(Contact)
    } else {
        None
    }
}

/// Exact cell match against live items.
pub fn is_tile_occupied(items: &SlotMap<ItemId, Item>, cell: Cell) -> bool {
    items.values().any(|item| item.cell == cell)
}

/// Whether a full tile at `cell` would overlap any character's footprint.
pub fn is_character_intersecting(actors: &SlotMap<EntityId, Actor>, cell: Cell) -> bool {
    let candidate = Rect::of_cell(cell);
    actors.values().any(|actor| candidate.intersects(&actor.body.absolute_rect()))
}

/// Whether `cell` is floor, free of items and clear of every character.
pub fn is_valid_spawn(
    map: &Map,
    items: &SlotMap<ItemId, Item>,
    actors: &SlotMap<EntityId, Actor>,
    cell: Cell,
) -> bool {
    map.in_bounds(cell)
        && map.tile_at(cell) == TileKind::Floor
        && !is_tile_occupied(items, cell)
        && !is_character_intersecting(actors, cell)
}
