use tracing::debug;

use super::*;
use crate::game::collision::{check_character, check_tile};
use crate::game::steering::resolve_direction;

impl Game {
    pub(super) fn step_pursuers(&mut self) {
        for slot in 0..self.state.pursuers.len() {
            if !self.round.is_active() {
                return;
            }
            let id = self.state.pursuers[slot];
            self.step_pursuer(id);
        }
    }

    /// Chases the hero's current cell one step. No path means no movement.
    ///
    /// Tentative headings are tested on a copy of the body, so the collision flag
    /// left on the pursuer always belongs to the final heading.
    fn step_pursuer(&mut self, id: EntityId) {
        let hero_id = self.state.hero_id;
        let hero_body = self.state.actors[hero_id].body;
        let state = &mut self.state;
        let Some(pursuer) = state.actors.get_mut(id) else {
            return;
        };
        let body = &mut pursuer.body;
        body.clear_flags();

        let start = state.map.clamp(body.cell());
        let goal = state.map.clamp(hero_body.cell());
        // Sharing the hero's cell leaves no path; steer at the hero's footprint instead.
        let next = if start == goal {
            let hero_rect = hero_body.absolute_rect();
            Some(PixelPos { x: hero_rect.x, y: hero_rect.y })
        } else {
            self.pathfinder
                .find_path(&state.map, start, goal)
                .and_then(|path| path.first().map(|cell| cell.top_left()))
        };

        let mut can_move = false;
        match next {
            Some(next) => {
                let snapshot = *body;
                let map = &state.map;
                let messages = &mut state.messages;
                let current = body.direction.unwrap_or(body.last_horizontal);
                let direction = resolve_direction(
                    body.bounds(),
                    next,
                    TILE_SIZE,
                    current,
                    |tentative| {
                        let mut trial = snapshot;
                        trial.clear_flags();
                        trial.face(tentative);
                        check_tile(map, &mut trial, messages);
                        trial.collision
                    },
                );
                body.face(direction);
                check_tile(map, body, messages);
                can_move = true;
            }
            None => {
                debug!(?start, ?goal, steps = self.pathfinder.last_steps(), "pursuer has no path");
            }
        }

        if check_character(body, Some(&hero_body)).is_some() {
            self.lose(LossCause::Caught);
            return;
        }
        if can_move && !body.collision {
            body.advance();
        }
    }
}
