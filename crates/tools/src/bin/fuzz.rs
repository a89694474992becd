use anyhow::{Result, bail, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use rcb_core::map_file::default_map;
use rcb_core::{
    Difficulty, Direction, Game, InputJournal, InputSnapshot, LossCause, RoundState, replay_to_end,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Seeds to play, starting at `seed`
    #[arg(short, long, default_value_t = 20)]
    rounds: u64,
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,
    /// Restrict to one difficulty; all three are played otherwise
    #[arg(short, long)]
    difficulty: Option<Difficulty>,
}

const CHOICES: [Option<Direction>; 5] = [
    Some(Direction::Up),
    Some(Direction::Down),
    Some(Direction::Left),
    Some(Direction::Right),
    None,
];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_input(rng: &mut ChaCha8Rng) -> InputSnapshot {
    match choose(rng, &CHOICES) {
        Some(direction) => InputSnapshot::only(direction),
        None => InputSnapshot::IDLE,
    }
}

fn fuzz_round(seed: u64, difficulty: Difficulty, max_ticks: u64) -> Result<RoundState> {
    let mut game = Game::new(seed, difficulty, default_map(difficulty));
    game.start();
    let mut journal = InputJournal::new(seed, difficulty);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

    let mut held = InputSnapshot::IDLE;
    let mut hold_left = 0;
    while game.current_tick() < max_ticks {
        if hold_left == 0 {
            held = random_input(&mut rng);
            hold_left = 1 + rng.next_u64() % 30;
        }
        hold_left -= 1;

        journal.record(held);
        let report = game.tick(held);
        check_invariants(&game)?;
        if report.terminate_requested || matches!(report.state, RoundState::Lost(_)) {
            break;
        }
    }
    // Let a pending win countdown finish so the live round matches a replay.
    while matches!(game.round_state(), RoundState::Won { .. }) {
        journal.record(InputSnapshot::IDLE);
        game.tick(InputSnapshot::IDLE);
    }

    ensure!(game.termination_requests() <= 1, "termination requested more than once");
    let replay = replay_to_end(&journal, journal.total_ticks() + 1)?;
    if replay.snapshot_hash != game.snapshot_hash() {
        bail!(
            "replay diverged for seed {seed} ({difficulty}): live tick {} vs replay tick {}",
            game.current_tick(),
            replay.final_tick
        );
    }
    debug!(seed, %difficulty, tick = game.current_tick(), state = ?game.round_state(), "round ok");
    Ok(game.round_state())
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let hero = state.hero();
    let cell = hero.body.cell();
    ensure!(state.map.in_bounds(cell), "hero left the map at {cell:?}");
    for id in &state.pursuers {
        if let Some(pursuer) = state.actors.get(*id) {
            let cell = pursuer.body.cell();
            ensure!(state.map.in_bounds(cell), "pursuer left the map at {cell:?}");
        }
    }
    if game.round_state() == RoundState::Lost(LossCause::ScoreDepleted) {
        ensure!(game.score() < 0, "score loss with score {}", game.score());
    }
    ensure!(game.termination_requests() <= 1, "termination requested more than once");
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let difficulties = match args.difficulty {
        Some(difficulty) => vec![difficulty],
        None => Difficulty::ALL.to_vec(),
    };
    info!(seed = args.seed, rounds = args.rounds, ticks = args.ticks, "starting fuzz harness");

    let mut lost = 0;
    let mut won = 0;
    for seed in args.seed..args.seed.saturating_add(args.rounds) {
        for &difficulty in &difficulties {
            match fuzz_round(seed, difficulty, args.ticks)? {
                RoundState::Lost(_) => lost += 1,
                RoundState::Terminated => won += 1,
                _ => {}
            }
        }
    }

    println!("Fuzzing completed successfully ({won} won, {lost} lost).");
    Ok(())
}
