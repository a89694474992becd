mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use std::env;

use macroquad::prelude::*;
use rcb_app::app_loop::{AppState, FinishedRound};
use rcb_app::format_seed;
use rcb_app::launch_args::{generate_runtime_seed, parse_launch_args};
use rcb_app::round_record_file::RoundRecordFile;
use rcb_app::run_journal_file::{default_runs_dir, save_round_journal};
use taffy::TaffyTree;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::frame_input::{held_input, pressed_keys};
use crate::game_layout::{compute_frame_layout, setup_layout};
use crate::ui_render::draw_frame;
use crate::window_config::build_window_conf;

fn window_conf() -> Conf {
    build_window_conf()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_last_round() {
    let Some(path) = RoundRecordFile::get_default_path() else {
        return;
    };
    if let Ok(record) = RoundRecordFile::load(&path) {
        info!(
            seed = record.seed,
            difficulty = %record.difficulty,
            outcome = %record.outcome_code,
            score = record.score,
            hash = %record.snapshot_hash_hex,
            "last round"
        );
    }
}

fn persist_finished_round(app: &AppState, finished: FinishedRound) {
    let journal_path = match default_runs_dir() {
        Some(dir) => match save_round_journal(&dir, &finished.journal) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("{err:#}");
                None
            }
        },
        None => {
            warn!("no data directory available, round journal not saved");
            None
        }
    };

    let (Some(game), Some(record_path)) = (app.game(), RoundRecordFile::get_default_path()) else {
        return;
    };
    let record = RoundRecordFile::from_game(game, finished.outcome, journal_path);
    if let Err(err) = record.write_atomic(&record_path) {
        warn!(path = %record_path.display(), "failed to write round record: {err}");
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let launch = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(launch) => launch,
        Err(err) => {
            error!("{err}");
            return;
        }
    };
    info!(seed = %format_seed(launch.seed.value()), "starting");
    log_last_round();

    let mut app = AppState::new(launch.seed.value(), launch.map);
    if let Some(difficulty) = launch.difficulty {
        app.start_round(difficulty);
    }

    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            error!("layout setup failed: {err}");
            return;
        }
    };

    loop {
        let keys = pressed_keys();
        app.frame(&keys, held_input(), f64::from(get_frame_time()));

        if let Some(finished) = app.take_finished_round() {
            persist_finished_round(&app, finished);
        }
        if app.should_quit() {
            break;
        }

        match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height()) {
            Ok(layout) => draw_frame(&app, &layout),
            Err(err) => warn!("layout failed: {err}"),
        }
        next_frame().await;
    }

    info!("Game over! Thank you for playing.");
}
