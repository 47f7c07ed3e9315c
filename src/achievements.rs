//! Fixed, ordered achievement rules evaluated after every recorded saving.

use crate::types::Stats;

#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&Stats) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule {
        id: "first_save",
        name: "First Steps",
        description: "Saved your first item",
        condition: |s| s.items_saved >= 1,
    },
    Rule {
        id: "streak_3",
        name: "On Fire",
        description: "3 Day Streak",
        condition: |s| s.current_streak >= 3,
    },
    Rule {
        id: "streak_7",
        name: "Unstoppable",
        description: "7 Day Streak",
        condition: |s| s.current_streak >= 7,
    },
    Rule {
        id: "saver_100",
        name: "Big Saver",
        description: "Earned 100 Points",
        condition: |s| s.total_points >= 100,
    },
    Rule {
        id: "saver_1000",
        name: "Vault Keeper",
        description: "Earned 1000 Points",
        condition: |s| s.total_points >= 1000,
    },
];

pub fn find(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.id == id)
}

/// Unlock every rule whose condition holds and is not yet in the unlocked
/// set, in table order. Returns the newly unlocked rules; re-running against
/// unchanged stats returns nothing.
pub fn evaluate(stats: &mut Stats) -> Vec<&'static Rule> {
    let mut newly_unlocked = Vec::new();
    for rule in RULES {
        if !stats.achievements.iter().any(|id| id == rule.id) && (rule.condition)(stats) {
            stats.achievements.push(rule.id.to_string());
            newly_unlocked.push(rule);
        }
    }
    newly_unlocked
}
