//! Grid A* used by pursuers to chase the hero.
//! This module exists so search state lives in one reusable arena instead of
//! per-call allocations. It does not own steering or movement decisions.
//!
//! Costs are Manhattan distances recomputed over the whole grid on every call:
//! `g` from the start, `h` to the goal. The best open node is picked by a linear
//! scan with a strict `<`, so among equal `f` costs the earliest-opened node wins.
//! Neighbors open in up, left, down, right order.

use crate::state::Map;
use crate::types::Cell;

pub const DEFAULT_STEP_BUDGET: u32 = 8000;

#[derive(Clone, Copy, Debug, Default)]
struct NodeRecord {
    solid: bool,
    open: bool,
    checked: bool,
    g_cost: u32,
    h_cost: u32,
    f_cost: u32,
    parent: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct PathFinder {
    cols: usize,
    rows: usize,
    nodes: Vec<NodeRecord>,
    open_list: Vec<usize>,
    path: Vec<Cell>,
    step_budget: u32,
    last_steps: u32,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::with_step_budget(DEFAULT_STEP_BUDGET)
    }
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_budget(step_budget: u32) -> Self {
        Self {
            cols: 0,
            rows: 0,
            nodes: Vec::new(),
            open_list: Vec::new(),
            path: Vec::new(),
            step_budget,
            last_steps: 0,
        }
    }

    /// Expansions performed by the most recent search.
    pub fn last_steps(&self) -> u32 {
        self.last_steps
    }

    /// Searches from `start` to `goal` over the map's traversable tiles.
    ///
    /// Returns the cells after `start` up to and including `goal`, or `None` when
    /// the goal is unreachable, the step budget runs out, or `start == goal`
    /// (the start is closed before any selection, so it is never "reached").
    pub fn find_path(&mut self, map: &Map, start: Cell, goal: Cell) -> Option<&[Cell]> {
        self.reset(map);
        debug_assert!(map.in_bounds(start), "path start out of bounds: {start:?}");
        debug_assert!(map.in_bounds(goal), "path goal out of bounds: {goal:?}");
        if !map.in_bounds(start) || !map.in_bounds(goal) || start == goal {
            return None;
        }

        self.assign_costs(start, goal);
        let start_idx = self.index(start);
        let goal_idx = self.index(goal);

        let mut current = start_idx;
        self.open_list.push(current);

        while self.last_steps < self.step_budget {
            self.nodes[current].checked = true;
            if let Some(pos) = self.open_list.iter().position(|&idx| idx == current) {
                self.open_list.remove(pos);
            }

            for neighbor in self.neighbors(current).into_iter().flatten() {
                self.open_node(neighbor, current);
            }

            let Some(best) = self.best_open() else {
                break;
            };
            current = best;

            if current == goal_idx {
                self.track_path(start_idx, goal_idx);
                return Some(&self.path);
            }
            self.last_steps += 1;
        }
        None
    }

    fn reset(&mut self, map: &Map) {
        self.cols = map.width();
        self.rows = map.height();
        self.nodes.clear();
        self.nodes.resize(self.cols * self.rows, NodeRecord::default());
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            let cell = Cell::new((idx % self.cols) as i32, (idx / self.cols) as i32);
            node.solid = !map.is_traversable(cell);
        }
        self.open_list.clear();
        self.path.clear();
        self.last_steps = 0;
    }

    fn assign_costs(&mut self, start: Cell, goal: Cell) {
        let cols = self.cols;
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            let cell = Cell::new((idx % cols) as i32, (idx / cols) as i32);
            node.g_cost = cell.manhattan(start);
            node.h_cost = cell.manhattan(goal);
            node.f_cost = node.g_cost + node.h_cost;
        }
    }

    fn neighbors(&self, idx: usize) -> [Option<usize>; 4] {
        let col = idx % self.cols;
        let row = idx / self.cols;
        [
            (row > 0).then(|| idx - self.cols),
            (col > 0).then(|| idx - 1),
            (row + 1 < self.rows).then(|| idx + self.cols),
            (col + 1 < self.cols).then(|| idx + 1),
        ]
    }

    fn open_node(&mut self, idx: usize, parent: usize) {
        let node = &mut self.nodes[idx];
        if node.open || node.checked || node.solid {
            return;
        }
        node.open = true;
        node.parent = Some(parent);
        self.open_list.push(idx);
    }

    fn best_open(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for &idx in &self.open_list {
            let f_cost = self.nodes[idx].f_cost;
            if best.is_none_or(|(_, best_f)| f_cost < best_f) {
                best = Some((idx, f_cost));
            }
        }
        best.map(|(idx, _)| idx)
    }

    fn track_path(&mut self, start_idx: usize, goal_idx: usize) {
        let mut current = goal_idx;
        while current != start_idx {
            self.path.push(Cell::new((current % self.cols) as i32, (current / self.cols) as i32));
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        self.path.reverse();
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols + cell.col as usize
    }
}
