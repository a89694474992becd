//! Turns the first step of a path into a cardinal heading.
//! Diagonal cases try the vertical move first and fall back to a horizontal
//! one when `is_blocked` reports the tentative heading as obstructed.

use std::cmp::Ordering;

use crate::geometry::Bounds;
use crate::types::{Direction, PixelPos};

/// Picks the heading toward `next`, the top-left pixel of the next path cell.
///
/// `current` is kept when the body already sits exactly in the target column
/// and row span. `is_blocked` is only called for the diagonal cases.
pub fn resolve_direction(
    bounds: Bounds,
    next: PixelPos,
    tile_size: i32,
    current: Direction,
    mut is_blocked: impl FnMut(Direction) -> bool,
) -> Direction {
    let within_column = bounds.left >= next.x && bounds.right < next.x + tile_size;

    if bounds.top > next.y && within_column {
        return Direction::Up;
    }
    if bounds.top < next.y && within_column {
        return Direction::Down;
    }
    if bounds.top >= next.y && bounds.bottom < next.y + tile_size {
        return match bounds.left.cmp(&next.x) {
            Ordering::Greater => Direction::Left,
            Ordering::Less => Direction::Right,
            Ordering::Equal => current,
        };
    }

    let (tentative, fallback) = if bounds.top > next.y && bounds.left > next.x {
        (Direction::Up, Direction::Left)
    } else if bounds.left < next.x && bounds.top > next.y {
        (Direction::Up, Direction::Right)
    } else {
        (Direction::Down, Direction::Left)
    };
    if is_blocked(tentative) {
        tracing::debug!(?tentative, ?fallback, "tentative heading blocked");
        fallback
    } else {
        tentative
    }
}
