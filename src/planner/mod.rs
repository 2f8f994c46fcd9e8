pub mod store;

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use crate::config::ScheduleConfig;
use crate::skills::{zeroed_priorities, PercentMap, PriorityMap, SkillCategory};
use crate::training::{Difficulty, Finding, Goal, TimeBudget, TrainingTask};

/// Weight added per goal when suggesting a distribution.
const GOAL_WEIGHT: u32 = 2;

/// Per-category weights from findings alone. Every category is present in
/// the result; untagged categories stay at zero.
pub fn compute_skill_priorities(findings: &[Finding]) -> PriorityMap {
    let mut priorities = zeroed_priorities();

    for finding in findings {
        let weight = finding.priority.weight();
        for skill in &finding.skill_tags {
            *priorities.entry(*skill).or_insert(0) += weight;
        }
    }

    priorities
}

/// Suggest percentage shares per category from findings and goals.
/// Each share is rounded independently, so the five values may not sum to
/// exactly 100; callers tolerate the drift. With no findings and no goals
/// the hardcoded default split is returned instead.
pub fn suggest_time_distribution(findings: &[Finding], goals: &[Goal]) -> PercentMap {
    let mut priorities = compute_skill_priorities(findings);

    // Add goal weights
    for goal in goals {
        *priorities.entry(goal.skill).or_insert(0) += GOAL_WEIGHT;
    }

    let total: u32 = priorities.values().sum();

    if total == 0 {
        return default_distribution();
    }

    SkillCategory::ALL
        .iter()
        .map(|&skill| {
            let weight = priorities.get(&skill).copied().unwrap_or(0);
            (skill, (f64::from(weight) / f64::from(total) * 100.0).round())
        })
        .collect()
}

/// Default split used when nothing is known about the student. The only
/// distribution in the crate guaranteed to sum to 100.
fn default_distribution() -> PercentMap {
    let mut distribution = HashMap::new();
    distribution.insert(SkillCategory::Tactics, 30.0);
    distribution.insert(SkillCategory::Endgames, 20.0);
    distribution.insert(SkillCategory::Openings, 20.0);
    distribution.insert(SkillCategory::Calculation, 20.0);
    distribution.insert(SkillCategory::TimeManagement, 10.0);
    distribution
}

/// Whole days covered by the range, rounding partial days up.
fn days_in_plan(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> i64 {
    let span_ms = (end_date - start_date).num_milliseconds();
    (span_ms as f64 / 86_400_000.0).ceil() as i64
}

/// Expand findings, goals and a time budget into dated tasks covering the
/// plan range, using the crate-wide schedule configuration.
pub fn generate_training_tasks(
    plan_id: &str,
    findings: &[Finding],
    goals: &[Goal],
    time_budget: &TimeBudget,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Vec<TrainingTask> {
    generate_training_tasks_with(
        crate::config::get_schedule_config(),
        plan_id,
        findings,
        goals,
        time_budget,
        start_date,
        end_date,
    )
}

/// Expansion algorithm, explicit configuration.
///
/// Per day, categories are visited in SkillCategory::ALL order. A category
/// gets floor(daily * share / 100) minutes; a task is emitted only when the
/// category has at least one finding or goal and both the category minutes
/// and the day's remaining minutes are positive. The remainder is reduced by
/// the category's full allocation, not the clamped task duration, so a
/// clamped task still "spends" its whole share. Categories without findings
/// or goals leave their minutes unused rather than passing them on.
pub fn generate_training_tasks_with(
    config: &ScheduleConfig,
    plan_id: &str,
    findings: &[Finding],
    goals: &[Goal],
    time_budget: &TimeBudget,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Vec<TrainingTask> {
    let mut tasks = Vec::new();

    if start_date > end_date {
        tracing::warn!(
            plan_id = plan_id,
            start = %start_date,
            end = %end_date,
            "Plan range ends before it starts, producing no tasks"
        );
        return tasks;
    }

    let mut days_in_plan = days_in_plan(start_date, end_date);
    if days_in_plan == 0 && config.zero_day_plan_single_day {
        days_in_plan = 1;
    }

    let daily_minutes = time_budget.daily_minutes;

    // Group findings by tagged category; a finding with several tags lands
    // in several buckets.
    let mut findings_by_skill: HashMap<SkillCategory, Vec<&Finding>> =
        SkillCategory::ALL.iter().map(|&s| (s, Vec::new())).collect();
    for finding in findings {
        for skill in &finding.skill_tags {
            findings_by_skill.entry(*skill).or_default().push(finding);
        }
    }

    for day in 0..days_in_plan {
        let current_date = start_date + Duration::days(day);
        let mut remaining_minutes = i64::from(daily_minutes);

        for skill in SkillCategory::ALL {
            let distribution = time_budget
                .skill_distribution
                .get(&skill)
                .copied()
                .unwrap_or(0.0);
            let skill_minutes = (f64::from(daily_minutes) * distribution / 100.0).floor() as i64;

            if skill_minutes <= 0 || remaining_minutes <= 0 {
                continue;
            }

            let skill_findings = &findings_by_skill[&skill];
            let goal = goals.iter().find(|g| g.skill == skill);

            if skill_findings.is_empty() && goal.is_none() {
                continue;
            }

            // Cycle through the category's findings across days.
            let finding = if skill_findings.is_empty() {
                None
            } else {
                Some(skill_findings[day as usize % skill_findings.len()])
            };

            let description = finding
                .map(|f| f.description.clone())
                .or_else(|| goal.map(|g| g.description.clone()))
                .unwrap_or_else(|| format!("Practice {}", skill));

            let difficulty = finding
                .map(|f| Difficulty::from(f.priority))
                .unwrap_or(Difficulty::Easy);

            tasks.push(TrainingTask {
                // Ids are assigned by the plan store at persist time.
                id: String::new(),
                plan_id: plan_id.to_string(),
                title: format!("{} Practice", skill.title()),
                description,
                skill,
                duration_minutes: skill_minutes.min(remaining_minutes) as u32,
                scheduled_date: current_date,
                completed: false,
                completed_at: None,
                difficulty: Some(difficulty),
                repetition_count: 0,
                next_repetition_date: None,
            });

            remaining_minutes -= skill_minutes;
        }
    }

    tasks
}
