//! Rendering for the menu, the map panel and the HUD strip.

use crate::game_layout::{FrameLayout, PanelRect, tile_extent};
use crate::ui_text::{
    event_log_line, hud_score_text, hud_time_text, menu_lines, status_text, win_lines,
};
use macroquad::prelude::*;
use rcb_app::app_loop::{AppMode, AppState};
use rcb_core::{ActorKind, Cell, Game, ItemKind, Map, RoundOutcome, TILE_SIZE, TileKind};

const BACKGROUND: Color = Color { r: 0.06, g: 0.06, b: 0.08, a: 1.0 };
const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const HUD_FONT_SIZE: f32 = 32.0;
const LOG_FONT_SIZE: f32 = 18.0;
const MESSAGE_FONT_SIZE: f32 = 24.0;
const MENU_FONT_SIZE: f32 = 36.0;
/// Cell whose top-left corner anchors transient messages.
const MESSAGE_ANCHOR: Cell = Cell::new(10, 11);
/// Items are drawn a little smaller than their tile.
const ITEM_INSET: f32 = 6.0;

pub fn draw_frame(app_state: &AppState, layout: &FrameLayout) {
    clear_background(BACKGROUND);
    match (app_state.mode, app_state.game()) {
        (AppMode::Menu, _) | (_, None) => draw_menu(layout),
        (mode, Some(game)) => {
            draw_map(game, layout.map);
            draw_hud(game, &mode, layout.hud);
            if game.outcome() == Some(RoundOutcome::Won) {
                draw_win_overlay(game, layout.map);
            }
        }
    }
}

fn draw_menu(layout: &FrameLayout) {
    let x = layout.map.x + layout.map.width * 0.3;
    let mut y = layout.map.y + layout.map.height * 0.3;
    for (index, line) in menu_lines().iter().enumerate() {
        let color = if index == 0 { YELLOW } else { WHITE };
        draw_text(line, x, y, MENU_FONT_SIZE, color);
        y += MENU_FONT_SIZE * 1.2;
    }
}

fn draw_hud(game: &Game, mode: &AppMode, panel: PanelRect) {
    draw_rectangle_lines(
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        BORDER_THICKNESS,
        BORDER_COLOR,
    );
    let baseline = panel.y + HUD_FONT_SIZE;
    draw_text(&hud_score_text(game.score()), panel.x + 12.0, baseline, HUD_FONT_SIZE, WHITE);
    draw_text(
        &hud_time_text(game.elapsed_seconds()),
        panel.x + panel.width * 0.3,
        baseline,
        HUD_FONT_SIZE,
        WHITE,
    );

    let detail = match game.log().last() {
        Some(event) if matches!(mode, AppMode::Playing) => event_log_line(event),
        _ => status_text(mode),
    };
    draw_text(&detail, panel.x + panel.width * 0.55, baseline, LOG_FONT_SIZE, LIGHTGRAY);
}

fn draw_map(game: &Game, panel: PanelRect) {
    let state = game.state();
    let map = &state.map;
    let tile = tile_extent(panel, map.width(), map.height());
    let scale = tile_scale(tile);

    for row in 0..map.height() {
        for col in 0..map.width() {
            let cell = Cell::new(col as i32, row as i32);
            draw_rectangle(
                panel.x + col as f32 * tile,
                panel.y + row as f32 * tile,
                tile,
                tile,
                tile_color(map, map.tile_at(cell)),
            );
        }
    }

    let mut items: Vec<_> = state.items.values().collect();
    items.sort_by_key(|item| (item.cell.row, item.cell.col));
    for item in items {
        let x = panel.x + item.cell.col as f32 * tile + ITEM_INSET * scale;
        let y = panel.y + item.cell.row as f32 * tile + ITEM_INSET * scale;
        let side = (tile - 2.0 * ITEM_INSET * scale).max(0.0);
        draw_rectangle(x, y, side, side, item_color(item.kind));
        draw_text(item_letter(item.kind), x + side * 0.3, y + side * 0.75, side * 0.7, BLACK);
    }

    // Pursuers first so the hero stays visible when they overlap.
    for id in &state.pursuers {
        if let Some(actor) = state.actors.get(*id) {
            draw_actor(actor.kind, actor.body.pos.x, actor.body.pos.y, panel, scale);
        }
    }
    let hero = state.hero();
    draw_actor(hero.kind, hero.body.pos.x, hero.body.pos.y, panel, scale);

    if let Some(message) = game.message() {
        let anchor = MESSAGE_ANCHOR.top_left();
        draw_text(
            message,
            panel.x + anchor.x as f32 * scale,
            panel.y + anchor.y as f32 * scale,
            MESSAGE_FONT_SIZE,
            WHITE,
        );
    }
}

fn draw_actor(kind: ActorKind, x: i32, y: i32, panel: PanelRect, scale: f32) {
    let side = TILE_SIZE as f32 * scale;
    draw_rectangle(
        panel.x + x as f32 * scale,
        panel.y + y as f32 * scale,
        side,
        side,
        actor_color(kind),
    );
}

fn draw_win_overlay(game: &Game, panel: PanelRect) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, Color::new(0.0, 0.0, 0.0, 0.6));
    let colors = [YELLOW, ORANGE, GREEN];
    let center_y = panel.y + panel.height / 2.0;
    let offsets = [-2.0, 0.5, 2.0];
    for ((line, color), offset) in
        win_lines(game.score(), game.elapsed_seconds()).iter().zip(colors).zip(offsets)
    {
        let dims = measure_text(line, None, 40, 1.0);
        draw_text(
            line,
            panel.x + (panel.width - dims.width) / 2.0,
            center_y + offset * 48.0,
            40.0,
            color,
        );
    }
}

/// Pixel scale from simulation units to a tile of side `tile` on screen.
fn tile_scale(tile: f32) -> f32 {
    tile / TILE_SIZE as f32
}

fn tile_color(map: &Map, tile: TileKind) -> Color {
    match tile {
        TileKind::Smoke if !map.hazard_revealed() => tile_color(map, TileKind::Floor),
        TileKind::Floor => Color { r: 0.55, g: 0.5, b: 0.42, a: 1.0 },
        TileKind::Door => Color { r: 0.45, g: 0.27, b: 0.12, a: 1.0 },
        TileKind::Locker => Color { r: 0.35, g: 0.45, b: 0.55, a: 1.0 },
        TileKind::Bricks => Color { r: 0.5, g: 0.2, b: 0.16, a: 1.0 },
        TileKind::End => Color { r: 0.15, g: 0.6, b: 0.25, a: 1.0 },
        TileKind::Smoke => Color { r: 0.7, g: 0.7, b: 0.72, a: 1.0 },
    }
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Bed => Color { r: 0.3, g: 0.45, b: 0.9, a: 1.0 },
        ItemKind::APlusPaper => Color { r: 0.95, g: 0.95, b: 0.9, a: 1.0 },
        ItemKind::Coffee => Color { r: 0.55, g: 0.35, b: 0.2, a: 1.0 },
        ItemKind::PileOfBooks => Color { r: 0.8, g: 0.3, b: 0.3, a: 1.0 },
        ItemKind::Vortex => Color { r: 0.6, g: 0.2, b: 0.8, a: 1.0 },
    }
}

fn item_letter(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Bed => "B",
        ItemKind::APlusPaper => "A",
        ItemKind::Coffee => "C",
        ItemKind::PileOfBooks => "P",
        ItemKind::Vortex => "V",
    }
}

fn actor_color(kind: ActorKind) -> Color {
    match kind {
        ActorKind::Hero => GREEN,
        ActorKind::ZombieProfessor => Color { r: 0.4, g: 0.6, b: 0.3, a: 1.0 },
        ActorKind::Bear => Color { r: 0.45, g: 0.3, b: 0.15, a: 1.0 },
        ActorKind::FailedExam => RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_smoke_looks_like_floor() {
        let mut map = Map::new(6, 6);
        let floor = tile_color(&map, TileKind::Floor);
        assert_eq!(tile_color(&map, TileKind::Smoke), floor);

        map.reveal_hazard();
        assert_ne!(tile_color(&map, TileKind::Smoke), floor);
    }

    #[test]
    fn tile_scale_maps_a_full_tile_to_its_extent() {
        assert_eq!(tile_scale(48.0), 1.0);
        assert_eq!(tile_scale(24.0), 0.5);
    }

    #[test]
    fn every_item_has_a_distinct_color_and_letter() {
        let kinds = [
            ItemKind::Bed,
            ItemKind::APlusPaper,
            ItemKind::Coffee,
            ItemKind::PileOfBooks,
            ItemKind::Vortex,
        ];
        for (index, a) in kinds.iter().enumerate() {
            for b in &kinds[index + 1..] {
                assert_ne!(item_color(*a), item_color(*b));
                assert_ne!(item_letter(*a), item_letter(*b));
            }
        }
    }

    #[test]
    fn hero_stands_out_from_pursuers() {
        let hero = actor_color(ActorKind::Hero);
        for kind in [ActorKind::ZombieProfessor, ActorKind::Bear, ActorKind::FailedExam] {
            assert_ne!(actor_color(kind), hero);
        }
    }
}
