pub mod store;

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use crate::skills::SkillCategory;

/// Short random record id, lowercase alphanumeric.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// How urgent a finding is, as judged upstream by the report analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Additive weight a finding contributes to each tagged category.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<Priority> for Difficulty {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => Difficulty::Hard,
            Priority::Medium => Difficulty::Medium,
            Priority::Low => Difficulty::Easy,
        }
    }
}

/// A weakness observation extracted from one report. Immutable once created;
/// the planner only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub report_id: String,
    pub description: String,
    pub skill_tags: Vec<SkillCategory>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Finding {
    pub fn new<S: Into<String>>(
        report_id: S,
        description: S,
        skill_tags: Vec<SkillCategory>,
        priority: Priority,
    ) -> Self {
        Finding {
            id: generate_id(),
            report_id: report_id.into(),
            description: description.into(),
            skill_tags,
            priority,
            created_at: Utc::now(),
        }
    }
}

/// A target the student is working toward in exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub student_id: String,
    pub skill: SkillCategory,
    pub description: String,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new<S: Into<String>>(student_id: S, skill: SkillCategory, description: S) -> Self {
        let now = Utc::now();
        Goal {
            id: generate_id(),
            student_id: student_id.into(),
            skill,
            description: description.into(),
            target_value: None,
            current_value: None,
            deadline: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-student practice minutes plus advisory percentage shares per
/// category. The shares need not sum to 100 and may hold junk from manual
/// edits; consumers treat missing or negative entries as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBudget {
    pub id: String,
    pub student_id: String,
    pub daily_minutes: u32,
    pub weekly_minutes: u32,
    pub skill_distribution: HashMap<SkillCategory, f64>,
}

impl TimeBudget {
    pub fn new<S: Into<String>>(
        student_id: S,
        daily_minutes: u32,
        weekly_minutes: u32,
        skill_distribution: HashMap<SkillCategory, f64>,
    ) -> Self {
        TimeBudget {
            id: generate_id(),
            student_id: student_id.into(),
            daily_minutes,
            weekly_minutes,
            skill_distribution,
        }
    }
}

/// One dated practice unit. Produced in bulk by the planner, mutated only
/// when the student completes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingTask {
    pub id: String,
    pub plan_id: String,
    pub title: String,
    pub description: String,
    pub skill: SkillCategory,
    pub duration_minutes: u32,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub repetition_count: u32,
    pub next_repetition_date: Option<DateTime<Utc>>,
}

/// A dated range of tasks plus the goal list and budget snapshot they were
/// generated from. Composition is fixed after generation; only task
/// completion fields change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub id: String,
    pub student_id: String,
    pub report_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub tasks: Vec<TrainingTask>,
    pub goals: Vec<Goal>,
    pub time_budget: TimeBudget,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrainingPlan {
    /// New empty plan shell. Tasks come from the planner afterwards.
    pub fn new<S: Into<String>>(
        student_id: S,
        report_id: S,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        goals: Vec<Goal>,
        time_budget: TimeBudget,
    ) -> Self {
        let now = Utc::now();
        TrainingPlan {
            id: generate_id(),
            student_id: student_id.into(),
            report_id: report_id.into(),
            start_date,
            end_date,
            tasks: Vec::new(),
            goals,
            time_budget,
            created_at: now,
            updated_at: now,
        }
    }
}
