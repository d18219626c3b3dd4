//! Built-in levels

use crate::sim::{Level, LevelDef, LevelError, Spawn, SpawnKind};

/// Coins needed for three stars on every built-in level
const COIN_TARGET: u32 = 8;

const LEVEL_1_ROWS: [&str; 17] = [
    "000000000000000000000000000000000000000000000000000000000000",
    "000000000000000000000000000000000000000000000000000000000000",
    "000000000000000000000000000000000000000000000000000067000000",
    "000000000000000000000000000000000000000000000000001117000000",
    "000000000000000000000000000000000000000000000055501112000000",
    "000000000000000000000000000000000000000000000000001112000000",
    "000000000000000000000000000000000005550000055555501112000000",
    "000000000000000000000000000000000000000000000000001112000000",
    "000000000000000000000555000000000000000005550055501112000000",
    "000000000000000000000000000005550000000000000000001112000000",
    "000000000000055500000000000000000000000000000055501112000000",
    "000000000000000000000000000000000000040000000000001112000000",
    "000000000000000000000000001110000000000000000055501112000000",
    "000000000000000000000000000000000001110000000000001112000000",
    "000000000000000000000011100000011000000011111111111112000000",
    "111111111111111111111111211111111111111112222222222222000000",
    "222222222222222222222222222222222222222222222222222222000000",
];

const LEVEL_1_SPAWNS: [Spawn; 17] = [
    Spawn::new(SpawnKind::Player, 2, 14),
    Spawn::new(SpawnKind::Coin, 8, 14),
    Spawn::new(SpawnKind::Coin, 10, 14),
    Spawn::new(SpawnKind::Coin, 14, 9),
    Spawn::new(SpawnKind::Coin, 22, 7),
    Spawn::new(SpawnKind::Coin, 24, 7),
    Spawn::new(SpawnKind::Coin, 30, 8),
    Spawn::new(SpawnKind::Coin, 36, 5),
    Spawn::new(SpawnKind::Coin, 37, 5),
    Spawn::new(SpawnKind::Coin, 42, 7),
    Spawn::new(SpawnKind::Coin, 47, 3),
    Spawn::new(SpawnKind::Coin, 48, 3),
    Spawn::new(SpawnKind::Heart, 43, 7),
    Spawn::new(SpawnKind::Key, 52, 1),
    Spawn::new(SpawnKind::Slime, 16, 14),
    Spawn::new(SpawnKind::Slime, 30, 14),
    Spawn::new(SpawnKind::Slime, 37, 14),
];

const LEVEL_2_ROWS: [&str; 17] = [
    "333333333333333333333333333333333333333333333333333333333333",
    "300000000000000000000000000000000000000000000000000000000033",
    "300000000000000000000000000000000000000000000000000006700033",
    "300000000000000000000000000000000000000000000000000011700033",
    "300000000000000000000000000000000000000000000005550111200033",
    "300000000000000000000000000000000000000000000000001111200033",
    "300000000000000000000000000000000000055000005550001111200033",
    "300000000000000000005550000000000000000000000000001111200033",
    "300000000000000000000000000005500000000005550005551111200033",
    "300000000000555000000000000000000000000000000000001111200033",
    "300000000000000000000000003110000000000000000005551111200033",
    "300000000000000000000000000000000000000000000000001111200033",
    "300000005500000000000000000000005500000000000005551111200033",
    "300000000000000000000000000000000000000000000000001111200033",
    "300000000000000033311330000011100331133000011100001111200033",
    "311111111331111133311113333111133311113333111133311111200033",
    "322222222332222233322223333222233322223333222233322222200033",
];

const LEVEL_2_SPAWNS: [Spawn; 20] = [
    Spawn::new(SpawnKind::Player, 2, 14),
    Spawn::new(SpawnKind::Coin, 6, 14),
    Spawn::new(SpawnKind::Coin, 8, 14),
    Spawn::new(SpawnKind::Coin, 12, 8),
    Spawn::new(SpawnKind::Coin, 22, 6),
    Spawn::new(SpawnKind::Coin, 23, 6),
    Spawn::new(SpawnKind::Coin, 30, 7),
    Spawn::new(SpawnKind::Coin, 38, 7),
    Spawn::new(SpawnKind::Coin, 39, 7),
    Spawn::new(SpawnKind::Coin, 43, 5),
    Spawn::new(SpawnKind::Coin, 49, 3),
    Spawn::new(SpawnKind::Coin, 50, 3),
    Spawn::new(SpawnKind::Heart, 10, 11),
    Spawn::new(SpawnKind::Key, 53, 1),
    Spawn::new(SpawnKind::Slime, 15, 14),
    Spawn::new(SpawnKind::Slime, 25, 14),
    Spawn::new(SpawnKind::Slime, 41, 14),
    Spawn::new(SpawnKind::Bat, 20, 5),
    Spawn::new(SpawnKind::Bat, 35, 4),
    Spawn::new(SpawnKind::Bat, 48, 3),
];

const LEVEL_3_ROWS: [&str; 17] = [
    "888888888888888888888888888888888888888888888888888888888888",
    "800000000000000000000000000000000000000000000000000000000088",
    "800000000000000000000000000000000000000000000000000067000088",
    "800000000000000000000000000000000000000000000000001117000088",
    "800000000000000000000000000000000000000000000555011120000088",
    "800000000000000000000000000000000000000000000000011120000088",
    "800000000000000000000000000000000005500005550555011120000088",
    "800000000000000000000000000000000000000000000000011120000088",
    "800000000000000000005500000055000000000555000555011120000088",
    "800000000000000000000000000000008800000000000000011120000088",
    "800000000000000000000000000000000000000000000555011120000088",
    "800000000000005500000000000000000000000000000000011120000088",
    "800000005500000000000000088800000055000000000555011120000088",
    "800000000000000000000000000000000000000000000000011120000088",
    "800000000000000088111880008800000011100088800000011120000088",
    "811111111881111188111118888118888111111888111888811120000088",
    "822222222882222288222228888228888222222888222888822220000088",
];

const LEVEL_3_SPAWNS: [Spawn; 21] = [
    Spawn::new(SpawnKind::Player, 2, 14),
    Spawn::new(SpawnKind::Coin, 6, 14),
    Spawn::new(SpawnKind::Coin, 8, 14),
    Spawn::new(SpawnKind::Coin, 14, 10),
    Spawn::new(SpawnKind::Coin, 21, 7),
    Spawn::new(SpawnKind::Coin, 27, 7),
    Spawn::new(SpawnKind::Coin, 36, 5),
    Spawn::new(SpawnKind::Coin, 37, 5),
    Spawn::new(SpawnKind::Coin, 42, 7),
    Spawn::new(SpawnKind::Coin, 47, 2),
    Spawn::new(SpawnKind::Coin, 48, 2),
    Spawn::new(SpawnKind::Heart, 15, 10),
    Spawn::new(SpawnKind::Heart, 37, 7),
    Spawn::new(SpawnKind::Key, 53, 1),
    Spawn::new(SpawnKind::Slime, 15, 14),
    Spawn::new(SpawnKind::Slime, 32, 14),
    Spawn::new(SpawnKind::Bat, 10, 5),
    Spawn::new(SpawnKind::Bat, 25, 4),
    Spawn::new(SpawnKind::Bat, 40, 3),
    Spawn::new(SpawnKind::Bat, 47, 1),
    Spawn::new(SpawnKind::Boss, 38, 14),
];
fn def(name: &str, background: &str, rows: &[&str], spawns: &[Spawn]) -> LevelDef {
    LevelDef {
        name: name.to_string(),
        background: background.to_string(),
        coin_target: COIN_TARGET,
        rows: rows.iter().map(|r| r.to_string()).collect(),
        spawns: spawns.to_vec(),
    }
}

/// Authored definitions in play order
pub fn builtin_defs() -> Vec<LevelDef> {
    vec![
        def("Grasslands", "#87ceeb", &LEVEL_1_ROWS, &LEVEL_1_SPAWNS),
        def("Dark Cave", "#1a1a2e", &LEVEL_2_ROWS, &LEVEL_2_SPAWNS),
        def("Castle", "#2c1810", &LEVEL_3_ROWS, &LEVEL_3_SPAWNS),
    ]
}

/// Validate a list of definitions, failing on the first bad one
pub fn load_all(defs: &[LevelDef]) -> Result<Vec<Level>, LevelError> {
    if defs.is_empty() {
        return Err(LevelError::NoLevels);
    }
    defs.iter().map(Level::from_def).collect()
}

pub fn builtin_levels() -> Result<Vec<Level>, LevelError> {
    load_all(&builtin_defs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TileCategory;

    #[test]
    fn test_builtin_levels_validate() {
        let levels = builtin_levels().unwrap();
        assert_eq!(levels.len(), 3);
        for level in &levels {
            assert_eq!(level.grid.cols(), 60);
            assert_eq!(level.grid.rows(), 17);
            assert_eq!(level.coin_target, COIN_TARGET);
            assert!(level.grid.doors().next().is_some(), "{} has no door", level.name);
            assert_eq!(
                level.spawns.iter().filter(|s| s.kind == SpawnKind::Key).count(),
                1
            );
        }
    }

    #[test]
    fn test_only_the_castle_has_a_boss() {
        let levels = builtin_levels().unwrap();
        let bosses: Vec<usize> = levels
            .iter()
            .map(|l| l.spawns.iter().filter(|s| s.kind == SpawnKind::Boss).count())
            .collect();
        assert_eq!(bosses, vec![0, 0, 1]);
    }

    #[test]
    fn test_enough_coins_for_three_stars() {
        for level in builtin_levels().unwrap() {
            let coins = level.spawns.iter().filter(|s| s.kind == SpawnKind::Coin).count() as u32;
            assert!(coins >= level.coin_target, "{}", level.name);
        }
    }

    #[test]
    fn test_grasslands_has_a_spike() {
        let levels = builtin_levels().unwrap();
        assert_eq!(levels[0].grid.get(37, 11).category(), TileCategory::Deadly);
    }

    #[test]
    fn test_load_all_rejects_empty() {
        assert!(matches!(load_all(&[]), Err(LevelError::NoLevels)));
    }
}
