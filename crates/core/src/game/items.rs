//! Item pickup, effect application and random spawn-cell sampling.
//! This module exists so every score and speed change funnels through one
//! exhaustive match. It does not own collision detection.

use rand_chacha::rand_core::Rng;
use tracing::{debug, info, warn};

use super::*;
use crate::content::{SPAWN_ATTEMPTS, item_effect};
use crate::game::collision::is_valid_spawn;
use crate::state::SpeedEffect;

impl Game {
    /// Consumes `item_id` for `actor`: counts it, applies its effect, removes it.
    pub(super) fn pick_up_item(&mut self, actor: EntityId, item_id: ItemId) {
        let Some(item) = self.state.items.get(item_id) else {
            return;
        };
        let (kind, cell) = (item.kind, item.cell);
        self.state.items_collected += 1;
        self.apply_effect(actor, item_effect(kind));
        self.state.items.remove(item_id);
        info!(item = kind.name(), ?cell, score = self.state.score, "item picked up");
        self.log.push(LogEvent::ItemPickedUp { kind, cell });
    }

    pub fn apply_effect(&mut self, actor: EntityId, effect: ItemEffect) {
        match effect {
            ItemEffect::Reward(delta) => self.state.score += delta,
            ItemEffect::Punishment(delta) => self.state.score -= delta,
            ItemEffect::Teleport { penalty } => {
                self.state.score -= penalty;
                self.teleport(actor);
            }
            ItemEffect::SpeedBoost { delta, speed, seconds } => {
                self.state.score += delta;
                self.apply_timed_speed(actor, speed, seconds);
            }
            ItemEffect::SpeedDebuff { speed, seconds } => {
                self.apply_timed_speed(actor, speed, seconds);
            }
        }
    }

    fn apply_timed_speed(&mut self, actor: EntityId, speed: i32, seconds: u64) {
        let expires_at_tick = self.tick + seconds * TICKS_PER_SECOND;
        let Some(actor) = self.state.actors.get_mut(actor) else {
            return;
        };
        let base_speed = actor.speed_effect.map_or(actor.body.speed, |effect| effect.base_speed);
        actor.speed_effect = Some(SpeedEffect { base_speed, expires_at_tick });
        actor.body.speed = speed;
    }

    pub(super) fn expire_speed_effects(&mut self) {
        let tick = self.tick;
        for actor in self.state.actors.values_mut() {
            if let Some(effect) = actor.speed_effect
                && tick >= effect.expires_at_tick
            {
                actor.body.speed = effect.base_speed;
                actor.speed_effect = None;
            }
        }
    }

    fn teleport(&mut self, actor_id: EntityId) {
        let Some(to) = self.sample_spawn_cell() else {
            warn!("no free cell to teleport to");
            return;
        };
        let Some(actor) = self.state.actors.get_mut(actor_id) else {
            return;
        };
        let from = actor.body.cell();
        actor.body.place_at(to);
        self.announce(LogEvent::Teleported { from, to });
    }

    /// Draws random cells until one is floor, item-free and clear of characters.
    pub fn sample_spawn_cell(&mut self) -> Option<Cell> {
        let cols = self.state.map.width() as u64;
        let rows = self.state.map.height() as u64;
        for _ in 0..SPAWN_ATTEMPTS {
            let cell = Cell::new(
                (self.rng.next_u64() % cols) as i32,
                (self.rng.next_u64() % rows) as i32,
            );
            if is_valid_spawn(&self.state.map, &self.state.items, &self.state.actors, cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Moves every live APlusPaper to a freshly sampled cell.
    pub(super) fn relocate_papers(&mut self) {
        let papers: Vec<ItemId> = self
            .state
            .items
            .iter()
            .filter(|(_, item)| item.kind == ItemKind::APlusPaper)
            .map(|(id, _)| id)
            .collect();
        let mut count = 0;
        for id in papers {
            if let Some(cell) = self.sample_spawn_cell() {
                self.state.items[id].cell = cell;
                count += 1;
            }
        }
        if count > 0 {
            debug!(count, tick = self.tick, "papers relocated");
            self.log.push(LogEvent::PapersRelocated { count });
        }
    }
}
