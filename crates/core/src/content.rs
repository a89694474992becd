use crate::geometry::SolidArea;
use crate::types::{
    ActorKind, Cell, Difficulty, ItemCategory, ItemEffect, ItemKind, PixelPos, TICKS_PER_SECOND,
};

pub const HERO_SPEED: i32 = 4;
pub const HERO_START: PixelPos = PixelPos { x: 50, y: 50 };
pub const HERO_SOLID: SolidArea = SolidArea::tile_inset(5);
pub const STARTING_SCORE: i32 = 20;

pub const PURSUER_SOLID: SolidArea = SolidArea::tile_inset(3);
pub const ITEM_SOLID: SolidArea = SolidArea::tile_inset(0);

pub const HAZARD_SPEED: i32 = 2;
pub const HAZARD_SECONDS: u64 = 5;

pub const RELOCATE_INTERVAL_TICKS: u64 = 10 * TICKS_PER_SECOND;
pub const WIN_DELAY_TICKS: u64 = 2 * TICKS_PER_SECOND;
pub const MESSAGE_DURATION_TICKS: u32 = 45;

/// Upper bound on random draws when looking for a free spawn cell.
pub const SPAWN_ATTEMPTS: u32 = 4096;

pub const INCOMPLETE_REWARDS_MESSAGE: &str = "You haven't collected all reward items!";
pub const HAZARD_MESSAGE: &str = "Mysterious smoke tile hit!";

pub fn pickup_message(kind: ItemKind) -> String {
    format!("{} item collected!", kind.name())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuerPreset {
    pub kind: ActorKind,
    pub speed: i32,
    pub spawn: Cell,
}

pub fn pursuer_preset(difficulty: Difficulty) -> PursuerPreset {
    match difficulty {
        Difficulty::Easy => {
            PursuerPreset { kind: ActorKind::ZombieProfessor, speed: 2, spawn: Cell::new(5, 14) }
        }
        Difficulty::Medium => {
            PursuerPreset { kind: ActorKind::Bear, speed: 3, spawn: Cell::new(13, 11) }
        }
        Difficulty::Hard => {
            PursuerPreset { kind: ActorKind::FailedExam, speed: 4, spawn: Cell::new(5, 11) }
        }
    }
}

pub fn item_effect(kind: ItemKind) -> ItemEffect {
    match kind {
        ItemKind::Bed => ItemEffect::Reward(5),
        ItemKind::APlusPaper => ItemEffect::Reward(10),
        ItemKind::Coffee => ItemEffect::SpeedBoost { delta: 5, speed: 6, seconds: 5 },
        ItemKind::PileOfBooks => ItemEffect::Punishment(5),
        ItemKind::Vortex => ItemEffect::Teleport { penalty: 5 },
    }
}

pub fn item_category(kind: ItemKind) -> ItemCategory {
    match kind {
        ItemKind::Bed | ItemKind::APlusPaper | ItemKind::Coffee => ItemCategory::Reward,
        ItemKind::PileOfBooks | ItemKind::Vortex => ItemCategory::Punishment,
    }
}

pub fn hazard_effect() -> ItemEffect {
    ItemEffect::SpeedDebuff { speed: HAZARD_SPEED, seconds: HAZARD_SECONDS }
}

const EASY_ITEMS: &[(ItemKind, Cell)] = &[
    (ItemKind::Bed, Cell::new(22, 1)),
    (ItemKind::Bed, Cell::new(5, 1)),
    (ItemKind::Bed, Cell::new(1, 10)),
    (ItemKind::APlusPaper, Cell::new(2, 11)),
    (ItemKind::APlusPaper, Cell::new(17, 16)),
    (ItemKind::APlusPaper, Cell::new(26, 1)),
    (ItemKind::Coffee, Cell::new(2, 3)),
    (ItemKind::Coffee, Cell::new(14, 5)),
    (ItemKind::Coffee, Cell::new(19, 11)),
    (ItemKind::PileOfBooks, Cell::new(4, 6)),
    (ItemKind::PileOfBooks, Cell::new(19, 5)),
    (ItemKind::PileOfBooks, Cell::new(16, 11)),
    (ItemKind::Vortex, Cell::new(22, 6)),
    (ItemKind::Vortex, Cell::new(25, 14)),
    (ItemKind::Vortex, Cell::new(6, 15)),
];

const MEDIUM_ITEMS: &[(ItemKind, Cell)] = &[
    (ItemKind::Bed, Cell::new(6, 4)),
    (ItemKind::Bed, Cell::new(13, 15)),
    (ItemKind::Bed, Cell::new(22, 1)),
    (ItemKind::APlusPaper, Cell::new(1, 7)),
    (ItemKind::APlusPaper, Cell::new(11, 2)),
    (ItemKind::APlusPaper, Cell::new(20, 16)),
    (ItemKind::Coffee, Cell::new(8, 10)),
    (ItemKind::Coffee, Cell::new(1, 15)),
    (ItemKind::Coffee, Cell::new(24, 6)),
    (ItemKind::PileOfBooks, Cell::new(2, 4)),
    (ItemKind::PileOfBooks, Cell::new(16, 5)),
    (ItemKind::PileOfBooks, Cell::new(7, 14)),
    (ItemKind::PileOfBooks, Cell::new(24, 11)),
    (ItemKind::Vortex, Cell::new(5, 11)),
    (ItemKind::Vortex, Cell::new(8, 2)),
    (ItemKind::Vortex, Cell::new(15, 10)),
    (ItemKind::Vortex, Cell::new(26, 14)),
];

const HARD_ITEMS: &[(ItemKind, Cell)] = &[
    (ItemKind::Bed, Cell::new(20, 4)),
    (ItemKind::Bed, Cell::new(6, 13)),
    (ItemKind::APlusPaper, Cell::new(18, 16)),
    (ItemKind::APlusPaper, Cell::new(26, 8)),
    (ItemKind::Coffee, Cell::new(4, 5)),
    (ItemKind::Coffee, Cell::new(14, 8)),
    (ItemKind::PileOfBooks, Cell::new(1, 3)),
    (ItemKind::PileOfBooks, Cell::new(5, 7)),
    (ItemKind::PileOfBooks, Cell::new(15, 11)),
    (ItemKind::PileOfBooks, Cell::new(23, 6)),
    (ItemKind::PileOfBooks, Cell::new(22, 12)),
    (ItemKind::Vortex, Cell::new(10, 7)),
    (ItemKind::Vortex, Cell::new(4, 11)),
    (ItemKind::Vortex, Cell::new(12, 15)),
    (ItemKind::Vortex, Cell::new(14, 5)),
    (ItemKind::Vortex, Cell::new(26, 15)),
];

pub fn item_layout(difficulty: Difficulty) -> &'static [(ItemKind, Cell)] {
    match difficulty {
        Difficulty::Easy => EASY_ITEMS,
        Difficulty::Medium => MEDIUM_ITEMS,
        Difficulty::Hard => HARD_ITEMS,
    }
}

pub fn map_file_name(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "map01.txt",
        Difficulty::Medium => "map02.txt",
        Difficulty::Hard => "map03.txt",
    }
}

pub fn default_map_text(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => include_str!("../../../assets/maps/map01.txt"),
        Difficulty::Medium => include_str!("../../../assets/maps/map02.txt"),
        Difficulty::Hard => include_str!("../../../assets/maps/map03.txt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_expected_item_counts() {
        assert_eq!(item_layout(Difficulty::Easy).len(), 15);
        assert_eq!(item_layout(Difficulty::Medium).len(), 17);
        assert_eq!(item_layout(Difficulty::Hard).len(), 16);
    }

    #[test]
    fn every_layout_has_at_least_one_reward() {
        for difficulty in Difficulty::ALL {
            assert!(
                item_layout(difficulty)
                    .iter()
                    .any(|(kind, _)| item_category(*kind) == ItemCategory::Reward),
                "{difficulty} has no reward items"
            );
        }
    }

    #[test]
    fn pursuer_speed_rises_with_difficulty() {
        let speeds: Vec<i32> = Difficulty::ALL.iter().map(|d| pursuer_preset(*d).speed).collect();
        assert_eq!(speeds, vec![2, 3, 4]);
    }
}
