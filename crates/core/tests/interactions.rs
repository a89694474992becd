use rcb_core::content::{ITEM_SOLID, PURSUER_SOLID, STARTING_SCORE, item_effect};
use rcb_core::game::collision::{check_character, is_tile_occupied};
use rcb_core::game::steering::resolve_direction;
use rcb_core::{
    Actor, ActorKind, Body, Bounds, Cell, Difficulty, Direction, EntityId, Game, InputSnapshot,
    Item, ItemId, ItemKind, LossCause, Map, PixelPos, RoundOutcome, RoundState, TileKind,
};

/// Running round on an open 28x18 room with only the hero in it.
fn empty_room(seed: u64) -> Game {
    let mut game = Game::new(seed, Difficulty::Easy, Map::new(28, 18));
    let state = game.state_mut();
    state.items.clear();
    for id in state.pursuers.drain(..) {
        state.actors.remove(id);
    }
    if let Some(cell) = state.map.hazard_cell() {
        state.map.set_tile(cell, TileKind::Floor);
    }
    game.start();
    game
}

fn put_hero(game: &mut Game, cell: Cell, direction: Direction) -> EntityId {
    let state = game.state_mut();
    let hero_id = state.hero_id;
    let body = &mut state.actors[hero_id].body;
    body.place_at(cell);
    body.face(direction);
    hero_id
}

fn put_item(game: &mut Game, kind: ItemKind, cell: Cell) -> ItemId {
    game.state_mut().items.insert_with_key(|id| Item {
        id,
        kind,
        cell,
        solid: ITEM_SOLID,
        collidable: true,
    })
}

fn put_pursuer(game: &mut Game, cell: Cell, speed: i32) -> EntityId {
    let state = game.state_mut();
    let id = state.actors.insert_with_key(|id| Actor {
        id,
        kind: ActorKind::Bear,
        body: Body::new(cell.top_left(), PURSUER_SOLID, speed, Some(Direction::Left)),
        speed_effect: None,
    });
    state.pursuers.push(id);
    id
}

#[test]
fn walking_into_a_paper_scores_and_removes_it() {
    let mut game = empty_room(1);
    put_hero(&mut game, Cell::new(5, 5), Direction::Right);
    let paper = put_item(&mut game, ItemKind::APlusPaper, Cell::new(6, 5));

    game.tick(InputSnapshot::only(Direction::Right));

    let state = game.state();
    assert_eq!(state.score, STARTING_SCORE + 10);
    assert_eq!(state.items_collected, 1);
    assert!(state.items.get(paper).is_none());
    assert!(!is_tile_occupied(&state.items, Cell::new(6, 5)));
    assert_eq!(game.message(), Some("APlusPaper item collected!"));
}

#[test]
fn pile_of_books_costs_five() {
    let mut game = empty_room(2);
    let hero = game.state().hero_id;
    game.apply_effect(hero, item_effect(ItemKind::PileOfBooks));
    assert_eq!(game.score(), STARTING_SCORE - 5);
    assert_eq!(game.round_state(), RoundState::Running);
}

#[test]
fn vortex_costs_five_and_moves_the_hero() {
    let mut game = empty_room(3);
    let hero = put_hero(&mut game, Cell::new(5, 5), Direction::Down);
    let before = game.state().hero().body.cell();

    game.apply_effect(hero, item_effect(ItemKind::Vortex));

    let after = game.state().hero().body;
    assert_eq!(game.score(), STARTING_SCORE - 5);
    assert_ne!(after.cell(), before);
    assert_eq!(after.pos, after.cell().top_left());
    assert_eq!(game.state().map.tile_at(after.cell()), TileKind::Floor);
}

#[test]
fn score_can_go_negative_through_punishments() {
    let mut game = empty_room(4);
    let hero = game.state().hero_id;
    for _ in 0..5 {
        game.apply_effect(hero, item_effect(ItemKind::PileOfBooks));
    }
    assert_eq!(game.score(), STARTING_SCORE - 25);

    let report = game.tick(InputSnapshot::IDLE);
    assert_eq!(report.state, RoundState::Lost(LossCause::ScoreDepleted));
    assert_eq!(game.outcome(), Some(RoundOutcome::Lost(LossCause::ScoreDepleted)));
}

#[test]
fn pursuer_contact_loses_and_requests_termination_once() {
    let mut game = empty_room(5);
    put_hero(&mut game, Cell::new(8, 8), Direction::Right);
    put_pursuer(&mut game, Cell::new(11, 8), 4);

    let mut requests = 0;
    for _ in 0..200 {
        if game.tick(InputSnapshot::IDLE).terminate_requested {
            requests += 1;
        }
    }

    assert_eq!(requests, 1);
    assert_eq!(game.termination_requests(), 1);
    assert_eq!(game.round_state(), RoundState::Lost(LossCause::Caught));
    assert!(!game.state().hero_alive);
}

#[test]
fn lost_round_ignores_further_input() {
    let mut game = empty_room(6);
    game.state_mut().score = -1;
    game.tick(InputSnapshot::IDLE);
    let tick = game.current_tick();
    let pos = game.state().hero().body.pos;

    game.tick(InputSnapshot::only(Direction::Down));
    assert_eq!(game.current_tick(), tick);
    assert_eq!(game.state().hero().body.pos, pos);
}

#[test]
fn steering_toward_an_aligned_cell_above_is_stable() {
    let bounds = Bounds { left: 99, right: 141, top: 147, bottom: 189 };
    let next = PixelPos { x: 96, y: 96 };
    let first = resolve_direction(bounds, next, 48, Direction::Right, |_| false);
    assert_eq!(first, Direction::Up);
    for _ in 0..10 {
        assert_eq!(resolve_direction(bounds, next, 48, Direction::Right, |_| false), first);
    }
}

#[test]
fn character_check_flags_overlap_only() {
    let hero = Body::new(PixelPos { x: 96, y: 96 }, PURSUER_SOLID, 4, Some(Direction::Right));
    let mut touching =
        Body::new(PixelPos { x: 138, y: 96 }, PURSUER_SOLID, 2, Some(Direction::Left));
    assert!(check_character(&mut touching, Some(&hero)).is_some());
    assert!(touching.collision);

    let mut far = Body::new(PixelPos { x: 400, y: 96 }, PURSUER_SOLID, 2, Some(Direction::Left));
    assert!(check_character(&mut far, Some(&hero)).is_none());
    assert!(!far.collision);
    assert!(check_character(&mut far, None).is_none());
}
