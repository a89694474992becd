//! Layout model for the HUD strip above the map.

use taffy::{TaffyResult, TaffyTree};
use taffy::prelude::*;

const OUTER_PADDING: f32 = 12.0;
const HUD_HEIGHT: f32 = 48.0;
const HUD_GAP: f32 = 8.0;

pub struct LayoutNodes {
    root: NodeId,
    hud: NodeId,
    map: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct FrameLayout {
    pub hud: PanelRect,
    pub map: PanelRect,
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> TaffyResult<LayoutNodes> {
    let hud = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(HUD_HEIGHT) },
        flex_shrink: 0.0,
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(HUD_GAP) },
        ..Default::default()
    })?;
    let map = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(OUTER_PADDING),
                right: length(OUTER_PADDING),
                top: length(OUTER_PADDING),
                bottom: length(OUTER_PADDING),
            },
            ..Default::default()
        },
        &[hud, map],
    )?;
    Ok(LayoutNodes { root, hud, map })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> TaffyResult<FrameLayout> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_hud = taffy.layout(nodes.hud)?;
    let l_map = taffy.layout(nodes.map)?;

    Ok(FrameLayout { hud: panel_rect(l_hud, &[l_root]), map: panel_rect(l_map, &[l_root]) })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

/// Side length of one map tile so a `cols` x `rows` grid fits inside `panel`.
pub fn tile_extent(panel: PanelRect, cols: usize, rows: usize) -> f32 {
    if cols == 0 || rows == 0 {
        return 0.0;
    }
    (panel.width / cols as f32).min(panel.height / rows as f32).max(0.0)
}
