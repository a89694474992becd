use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use tracing::info;

use crate::content::{
    HERO_SOLID, HERO_SPEED, HERO_START, ITEM_SOLID, PURSUER_SOLID, RELOCATE_INTERVAL_TICKS,
    STARTING_SCORE, item_layout, pursuer_preset,
};
use crate::geometry::Body;
use crate::notice::MessageBoard;
use crate::state::{Actor, GameState, Item, Map};
use crate::types::*;

pub mod collision;
mod hash;
mod hero;
mod items;
pub mod pathfinding;
mod pursuit;
mod round;
pub mod steering;

#[cfg(test)]
mod test_support;

use pathfinding::PathFinder;

pub struct Game {
    seed: u64,
    difficulty: Difficulty,
    tick: u64,
    rng: ChaCha8Rng,
    state: GameState,
    round: RoundState,
    outcome: Option<RoundOutcome>,
    finished_at_tick: Option<u64>,
    pathfinder: PathFinder,
    log: Vec<LogEvent>,
    termination_requests: u32,
    terminate_pending: bool,
    /// Set while the hero keeps pressing into the exit with rewards left.
    completion_rejected: bool,
}

impl Game {
    /// Sets up a round on `map`: hazard tile, hero, the difficulty's pursuer and item layout.
    pub fn new(seed: u64, difficulty: Difficulty, mut map: Map) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(cell) = map.place_hazard(&mut rng) {
            tracing::debug!(?cell, "hazard placed");
        }

        let mut actors = SlotMap::with_key();
        let hero_id = actors.insert_with_key(|id| Actor {
            id,
            kind: ActorKind::Hero,
            body: Body::new(HERO_START, HERO_SOLID, HERO_SPEED, Some(Direction::Right)),
            speed_effect: None,
        });

        let preset = pursuer_preset(difficulty);
        let pursuer_id = actors.insert_with_key(|id| Actor {
            id,
            kind: preset.kind,
            body: Body::new(
                preset.spawn.top_left(),
                PURSUER_SOLID,
                preset.speed,
                Some(Direction::Right),
            ),
            speed_effect: None,
        });

        let mut items = SlotMap::with_key();
        for &(kind, cell) in item_layout(difficulty) {
            items.insert_with_key(|id| Item {
                id,
                kind,
                cell,
                solid: ITEM_SOLID,
                collidable: true,
            });
        }

        Self {
            seed,
            difficulty,
            tick: 0,
            rng,
            state: GameState {
                map,
                actors,
                items,
                hero_id,
                pursuers: vec![pursuer_id],
                score: STARTING_SCORE,
                items_collected: 0,
                hero_alive: true,
                messages: MessageBoard::default(),
            },
            round: RoundState::Idle,
            outcome: None,
            finished_at_tick: None,
            pathfinder: PathFinder::new(),
            log: Vec::new(),
            termination_requests: 0,
            terminate_pending: false,
            completion_rejected: false,
        }
    }

    /// Advances one fixed simulation step.
    pub fn tick(&mut self, input: InputSnapshot) -> TickReport {
        match self.round {
            RoundState::Idle | RoundState::Lost(_) | RoundState::Terminated => {
                return self.report();
            }
            RoundState::Won { .. } => {
                self.tick += 1;
                self.advance_win_countdown();
                self.state.messages.advance();
                return self.report();
            }
            RoundState::WonPending => self.round = RoundState::Running,
            RoundState::Running => {}
        }

        self.tick += 1;
        self.expire_speed_effects();
        if self.tick % RELOCATE_INTERVAL_TICKS == 0 {
            self.relocate_papers();
        }

        self.step_hero(input);
        if self.round.is_active() {
            self.step_pursuers();
        }

        self.state.messages.advance();
        self.report()
    }

    fn report(&mut self) -> TickReport {
        TickReport {
            state: self.round,
            terminate_requested: mem::take(&mut self.terminate_pending),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Play time in seconds, frozen once the round has an outcome.
    pub fn elapsed_seconds(&self) -> f64 {
        self.finished_at_tick.unwrap_or(self.tick) as f64 / TICKS_PER_SECOND as f64
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scenario setup in tests and tools.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn round_state(&self) -> RoundState {
        self.round
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn score(&self) -> i32 {
        self.state.score
    }

    pub fn message(&self) -> Option<&str> {
        self.state.messages.current()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// How many times this round has asked its host to shut down.
    pub fn termination_requests(&self) -> u32 {
        self.termination_requests
    }

    fn announce(&mut self, event: LogEvent) {
        info!(tick = self.tick, ?event, "round event");
        self.log.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::map_file::default_map;

    #[test]
    fn new_round_uses_difficulty_preset() {
        let game = Game::new(3, Difficulty::Medium, default_map(Difficulty::Medium));
        let state = game.state();
        assert_eq!(game.round_state(), RoundState::Idle);
        assert_eq!(state.score, STARTING_SCORE);
        assert_eq!(state.items.len(), 17);
        assert_eq!(state.pursuers.len(), 1);

        let pursuer = &state.actors[state.pursuers[0]];
        assert_eq!(pursuer.kind, ActorKind::Bear);
        assert_eq!(pursuer.body.speed, 3);
        assert_eq!(pursuer.body.cell(), Cell::new(13, 11));

        let hero = state.hero();
        assert_eq!(hero.body.pos, HERO_START);
        assert_eq!(hero.body.direction, Some(Direction::Right));
    }

    #[test]
    fn idle_round_does_not_advance() {
        let mut game = Game::new(3, Difficulty::Easy, default_map(Difficulty::Easy));
        let report = game.tick(InputSnapshot::only(Direction::Down));
        assert_eq!(report.state, RoundState::Idle);
        assert_eq!(game.current_tick(), 0);
        assert_eq!(game.state().hero().body.pos, HERO_START);
    }

    #[test]
    fn hero_walks_while_key_is_held() {
        let mut game = open_room_game(11);
        let start = game.state().hero().body.pos;
        for _ in 0..5 {
            game.tick(InputSnapshot::only(Direction::Down));
        }
        assert_eq!(game.state().hero().body.pos.y, start.y + 5 * HERO_SPEED);
        assert_eq!(game.state().hero().body.pos.x, start.x);

        game.tick(InputSnapshot::IDLE);
        assert_eq!(game.state().hero().body.pos.y, start.y + 5 * HERO_SPEED);
    }

    #[test]
    fn hero_stops_at_walls() {
        let mut game = open_room_game(11);
        for _ in 0..20 {
            game.tick(InputSnapshot::only(Direction::Up));
        }
        let hero = game.state().hero();
        assert_eq!(hero.body.pos.y, HERO_START.y);
        assert!(hero.body.collision);
    }

    #[test]
    fn same_seed_same_hazard_cell() {
        let a = Game::new(77, Difficulty::Hard, default_map(Difficulty::Hard));
        let b = Game::new(77, Difficulty::Hard, default_map(Difficulty::Hard));
        assert_eq!(a.state().map.hazard_cell(), b.state().map.hazard_cell());
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());
    }
}
