//! Obstacle and collectible type tables
//!
//! Each table is ordered by the enum discriminant so a kind can index its own
//! row. Weights in a table sum to 1.

use serde::{Deserialize, Serialize};

/// Things that cost a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock = 0,
    Log = 1,
    Crocodile = 2,
}

/// Things that score points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Fish = 0,
    Shell = 1,
    GoldenFish = 2,
}

/// One row of a type table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec<K> {
    pub kind: K,
    /// Display color (linear RGB)
    pub color: [f32; 3],
    /// Points awarded on pickup (collectibles only)
    pub points: Option<u32>,
    /// Multiplier on the river current
    pub speed_mult: f32,
    /// Visual radius scale
    pub scale: f32,
    /// Spawn probability weight
    pub weight: f32,
}

pub const OBSTACLE_TABLE: [KindSpec<ObstacleKind>; 3] = [
    KindSpec {
        kind: ObstacleKind::Rock,
        color: [0.45, 0.45, 0.5],
        points: None,
        speed_mult: 1.0,
        scale: 1.2,
        weight: 0.45,
    },
    KindSpec {
        kind: ObstacleKind::Log,
        color: [0.45, 0.28, 0.12],
        points: None,
        speed_mult: 1.15,
        scale: 1.6,
        weight: 0.35,
    },
    KindSpec {
        kind: ObstacleKind::Crocodile,
        color: [0.2, 0.5, 0.2],
        points: None,
        speed_mult: 1.4,
        scale: 1.3,
        weight: 0.20,
    },
];

pub const COLLECTIBLE_TABLE: [KindSpec<CollectibleKind>; 3] = [
    KindSpec {
        kind: CollectibleKind::Fish,
        color: [0.6, 0.75, 0.9],
        points: Some(10),
        speed_mult: 1.0,
        scale: 0.8,
        weight: 0.60,
    },
    KindSpec {
        kind: CollectibleKind::Shell,
        color: [1.0, 0.6, 0.7],
        points: Some(25),
        speed_mult: 0.9,
        scale: 0.7,
        weight: 0.30,
    },
    KindSpec {
        kind: CollectibleKind::GoldenFish,
        color: [1.0, 0.82, 0.2],
        points: Some(100),
        speed_mult: 1.3,
        scale: 0.9,
        weight: 0.10,
    },
];

impl ObstacleKind {
    pub fn spec(self) -> &'static KindSpec<ObstacleKind> {
        &OBSTACLE_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Rock => "rock",
            ObstacleKind::Log => "log",
            ObstacleKind::Crocodile => "crocodile",
        }
    }
}

impl CollectibleKind {
    pub fn spec(self) -> &'static KindSpec<CollectibleKind> {
        &COLLECTIBLE_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectibleKind::Fish => "fish",
            CollectibleKind::Shell => "shell",
            CollectibleKind::GoldenFish => "golden_fish",
        }
    }

    pub fn points(self) -> u32 {
        self.spec().points.unwrap_or(0)
    }
}

/// Kind tag carried by a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    Collectible(CollectibleKind),
}

impl EntityKind {
    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Obstacle(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Obstacle(k) => k.as_str(),
            EntityKind::Collectible(k) => k.as_str(),
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            EntityKind::Obstacle(k) => k.spec().color,
            EntityKind::Collectible(k) => k.spec().color,
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            EntityKind::Obstacle(k) => k.spec().scale,
            EntityKind::Collectible(k) => k.spec().scale,
        }
    }

    pub fn speed_mult(&self) -> f32 {
        match self {
            EntityKind::Obstacle(k) => k.spec().speed_mult,
            EntityKind::Collectible(k) => k.spec().speed_mult,
        }
    }
}

/// Weighted pick by walking the cumulative distribution.
///
/// `draw` is a uniform sample in [0, 1). If the weights sum to less than the
/// draw the last row wins. Only an empty table yields `None`.
pub fn pick_weighted<K: Copy>(table: &[KindSpec<K>], draw: f32) -> Option<K> {
    let mut cumulative = 0.0;
    for spec in table {
        cumulative += spec.weight;
        if draw < cumulative {
            return Some(spec.kind);
        }
    }
    table.last().map(|spec| spec.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tables_are_indexed_by_kind() {
        for (i, spec) in OBSTACLE_TABLE.iter().enumerate() {
            assert_eq!(spec.kind as usize, i);
            assert!(spec.points.is_none());
        }
        for (i, spec) in COLLECTIBLE_TABLE.iter().enumerate() {
            assert_eq!(spec.kind as usize, i);
            assert!(spec.points.is_some_and(|p| p > 0));
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let obstacles: f32 = OBSTACLE_TABLE.iter().map(|s| s.weight).sum();
        let collectibles: f32 = COLLECTIBLE_TABLE.iter().map(|s| s.weight).sum();
        assert!((obstacles - 1.0).abs() < 1e-5);
        assert!((collectibles - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pick_walks_cumulative_weights() {
        assert_eq!(pick_weighted(&OBSTACLE_TABLE, 0.0), Some(ObstacleKind::Rock));
        assert_eq!(pick_weighted(&OBSTACLE_TABLE, 0.44), Some(ObstacleKind::Rock));
        assert_eq!(pick_weighted(&OBSTACLE_TABLE, 0.5), Some(ObstacleKind::Log));
        assert_eq!(
            pick_weighted(&OBSTACLE_TABLE, 0.95),
            Some(ObstacleKind::Crocodile)
        );
    }

    #[test]
    fn test_pick_falls_back_to_last_row() {
        let short = [
            KindSpec {
                weight: 0.2,
                ..OBSTACLE_TABLE[0]
            },
            KindSpec {
                weight: 0.2,
                ..OBSTACLE_TABLE[1]
            },
        ];
        assert_eq!(pick_weighted(&short, 0.9), Some(ObstacleKind::Log));
        assert_eq!(pick_weighted::<ObstacleKind>(&[], 0.5), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(EntityKind::Obstacle(ObstacleKind::Log).type_name(), "log");
        assert_eq!(
            EntityKind::Collectible(CollectibleKind::GoldenFish).type_name(),
            "golden_fish"
        );
        assert_eq!(CollectibleKind::Shell.points(), 25);
    }

    proptest! {
        #[test]
        fn prop_pick_always_returns_table_kind(draw in 0.0f32..1.0) {
            let obstacle = pick_weighted(&OBSTACLE_TABLE, draw);
            prop_assert!(obstacle.is_some_and(|k| OBSTACLE_TABLE.iter().any(|s| s.kind == k)));
            let collectible = pick_weighted(&COLLECTIBLE_TABLE, draw);
            prop_assert!(
                collectible.is_some_and(|k| COLLECTIBLE_TABLE.iter().any(|s| s.kind == k))
            );
        }
    }
}
