use super::*;
use crate::content::hazard_effect;
use crate::game::collision::{check_character, check_item, check_tile};

impl Game {
    /// Held keys pick the heading; the hero moves unless the tile ahead blocks it,
    /// then contact, items, the level end and the hazard are resolved in that order.
    pub(super) fn step_hero(&mut self, input: InputSnapshot) {
        if self.state.score < 0 {
            self.lose(LossCause::ScoreDepleted);
            return;
        }

        let hero_id = self.state.hero_id;
        let state = &mut self.state;
        let hero = &mut state.actors[hero_id].body;
        hero.clear_flags();
        if let Some(direction) = input.held_direction() {
            hero.face(direction);
            check_tile(&state.map, hero, &mut state.messages);
            if !hero.collision {
                hero.advance();
            }
        }

        let pursuer_bodies: Vec<Body> =
            state.pursuers.iter().filter_map(|id| state.actors.get(*id)).map(|a| a.body).collect();
        let hero = &mut state.actors[hero_id].body;
        if pursuer_bodies.iter().any(|other| check_character(hero, Some(other)).is_some()) {
            self.lose(LossCause::Caught);
            return;
        }

        if let Some(item_id) = check_item(&state.items, hero, true, &mut state.messages) {
            self.pick_up_item(hero_id, item_id);
        }

        let hero = self.state.actors[hero_id].body;
        if hero.reached_end {
            self.resolve_level_end();
            if !self.round.is_active() {
                return;
            }
        } else {
            self.completion_rejected = false;
        }
        if hero.on_hazard {
            self.trigger_hazard(hero_id);
        }
    }

    fn trigger_hazard(&mut self, hero_id: EntityId) {
        self.apply_effect(hero_id, hazard_effect());
        if !self.state.map.hazard_revealed() {
            self.state.map.reveal_hazard();
            if let Some(cell) = self.state.map.hazard_cell() {
                self.announce(LogEvent::HazardTriggered { cell });
            }
        }
    }
}
