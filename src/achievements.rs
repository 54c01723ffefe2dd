//! Achievement catalog and evaluation
//!
//! The catalog is static data: each entry pairs display text with a pure
//! predicate over [`GameStats`]. Unlocked ids are stored as strings so ids
//! persisted by older builds survive even if they leave the catalog.

use crate::sim::GameStats;

/// A single achievement definition
#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub condition: fn(&GameStats) -> bool,
}

impl Achievement {
    pub fn is_met(&self, stats: &GameStats) -> bool {
        (self.condition)(stats)
    }
}

fn first_blood(s: &GameStats) -> bool {
    s.bricks_broken >= 1
}

fn novice(s: &GameStats) -> bool {
    s.bricks_broken >= 10
}

fn master(s: &GameStats) -> bool {
    s.bricks_broken >= 100
}

fn survivor(s: &GameStats) -> bool {
    s.max_level >= 3
}

fn scorer(s: &GameStats) -> bool {
    s.total_score >= 1000
}

/// Every achievement, in display order
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_blood",
        title: "First Blood",
        description: "Break your first brick",
        condition: first_blood,
    },
    Achievement {
        id: "novice",
        title: "Novice Breaker",
        description: "Break 10 bricks",
        condition: novice,
    },
    Achievement {
        id: "master",
        title: "Brick Master",
        description: "Break 100 bricks",
        condition: master,
    },
    Achievement {
        id: "survivor",
        title: "Survivor",
        description: "Reach Level 3",
        condition: survivor,
    },
    Achievement {
        id: "scorer",
        title: "High Scorer",
        description: "Score 1000 points",
        condition: scorer,
    },
];

/// Ids whose predicate holds and that are not unlocked yet, in catalog order
pub fn evaluate(stats: &GameStats, unlocked: &[String]) -> Vec<&'static str> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.iter().any(|id| id == a.id))
        .filter(|a| a.is_met(stats))
        .map(|a| a.id)
        .collect()
}

/// Look up a catalog entry by id
pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Catalog entries paired with their unlocked flag (for the achievements list)
pub fn listing(unlocked: &[String]) -> Vec<(&'static Achievement, bool)> {
    ACHIEVEMENTS
        .iter()
        .map(|a| (a, unlocked.iter().any(|id| id == a.id)))
        .collect()
}
