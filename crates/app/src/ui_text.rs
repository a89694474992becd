//! Text for the HUD, menu, win screen and event log.

use rcb_app::app_loop::AppMode;
use rcb_app::outcome_code;
use rcb_core::{Cell, Difficulty, LogEvent};

pub fn hud_score_text(score: i32) -> String {
    format!("Score = {score}")
}

pub fn hud_time_text(elapsed_seconds: f64) -> String {
    format!("Time:{elapsed_seconds:.2}")
}

pub fn menu_lines() -> Vec<String> {
    let mut lines = vec!["Choose a difficulty:".to_string()];
    for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
        lines.push(format!("{} = {}", index + 1, difficulty.label()));
    }
    lines.push("Esc = Exit".to_string());
    lines
}

pub fn win_lines(score: i32, elapsed_seconds: f64) -> [String; 3] {
    [
        "You got all the rewards and escaped RCB!".to_string(),
        format!("Your total score is {score} points."),
        format!("You took {elapsed_seconds:.2}s to escape RCB."),
    ]
}

pub fn status_text(mode: &AppMode) -> String {
    match mode {
        AppMode::Menu => "Menu".to_string(),
        AppMode::Playing => "Find every reward, then reach the exit (Esc to quit)".to_string(),
        AppMode::Finished(outcome) => format!("Finished: {}", outcome_code(*outcome)),
    }
}

fn cell_text(cell: Cell) -> String {
    format!("({}, {})", cell.col, cell.row)
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::RoundStarted { difficulty } => format!("{difficulty} round started"),
        LogEvent::ItemPickedUp { kind, cell } => {
            format!("picked up {} at {}", kind.name(), cell_text(*cell))
        }
        LogEvent::Teleported { from, to } => {
            format!("teleported {} -> {}", cell_text(*from), cell_text(*to))
        }
        LogEvent::HazardTriggered { cell } => format!("smoke at {}", cell_text(*cell)),
        LogEvent::CompletionRejected { rewards_left } => {
            format!("exit locked, {rewards_left} rewards left")
        }
        LogEvent::PapersRelocated { count } => format!("{count} papers moved"),
        LogEvent::RoundWon { tick } => format!("escaped at tick {tick}"),
        LogEvent::RoundLost { cause, tick } => format!("lost ({cause:?}) at tick {tick}"),
        LogEvent::RoundAborted { tick } => format!("aborted at tick {tick}"),
    }
}
