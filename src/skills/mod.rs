use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of skill areas a finding or goal can point at.
/// Serialized with the camelCase spelling the report tooling emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillCategory {
    Tactics,
    Endgames,
    Openings,
    Calculation,
    TimeManagement,
}

impl SkillCategory {
    /// Fixed iteration order. Daily minute allocation walks this array front
    /// to back, so earlier categories win scarce remaining minutes and task
    /// output keeps this order within a day. Never iterate a map instead.
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Tactics,
        SkillCategory::Endgames,
        SkillCategory::Openings,
        SkillCategory::Calculation,
        SkillCategory::TimeManagement,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::Tactics => "tactics",
            SkillCategory::Endgames => "endgames",
            SkillCategory::Openings => "openings",
            SkillCategory::Calculation => "calculation",
            SkillCategory::TimeManagement => "timeManagement",
        }
    }

    /// Capitalized form used in task titles.
    pub fn title(self) -> &'static str {
        match self {
            SkillCategory::Tactics => "Tactics",
            SkillCategory::Endgames => "Endgames",
            SkillCategory::Openings => "Openings",
            SkillCategory::Calculation => "Calculation",
            SkillCategory::TimeManagement => "TimeManagement",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Additive weights per category, as computed from findings and goals.
pub type PriorityMap = HashMap<SkillCategory, u32>;

/// Percentage shares per category. Values are advisory and are not
/// guaranteed to sum to exactly 100.
pub type PercentMap = HashMap<SkillCategory, f64>;

/// A complete priority map with every category present at zero.
pub fn zeroed_priorities() -> PriorityMap {
    SkillCategory::ALL.iter().map(|&s| (s, 0)).collect()
}
