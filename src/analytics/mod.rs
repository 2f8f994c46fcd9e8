use std::collections::HashMap;
use chrono::{Duration, Utc};
use serde::{Serialize, Deserialize};
use crate::progress::ProgressEntry;
use crate::skills::SkillCategory;
use crate::training::TrainingPlan;

/// Per-skill aggregates over plans and logged progress, shaped for charting.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyticsPayload {
    pub score_history: HashMap<SkillCategory, Vec<(i64, f32)>>, // timestamp → score
    pub completed_counts: HashMap<SkillCategory, usize>,
    pub planned_minutes: HashMap<SkillCategory, u64>,
    pub completed_minutes: HashMap<SkillCategory, u64>,
    pub avg_score: HashMap<SkillCategory, f32>,
    pub weekly_trends: HashMap<SkillCategory, f32>,
}

/// Pure aggregation over the caller's loaded plans and progress. Nothing is
/// read from disk here.
pub fn compute_analytics(plans: &[TrainingPlan], progress: &[ProgressEntry]) -> AnalyticsPayload {
    let mut score_history: HashMap<SkillCategory, Vec<(i64, f32)>> = HashMap::new();
    let mut completed_counts: HashMap<SkillCategory, usize> = HashMap::new();
    let mut planned_minutes: HashMap<SkillCategory, u64> = HashMap::new();
    let mut completed_minutes: HashMap<SkillCategory, u64> = HashMap::new();
    let mut score_sums: HashMap<SkillCategory, f32> = HashMap::new();
    let mut score_counts: HashMap<SkillCategory, usize> = HashMap::new();

    for plan in plans {
        for task in &plan.tasks {
            *planned_minutes.entry(task.skill).or_insert(0) += u64::from(task.duration_minutes);
            if task.completed {
                *completed_minutes.entry(task.skill).or_insert(0) +=
                    u64::from(task.duration_minutes);
                *completed_counts.entry(task.skill).or_insert(0) += 1;
            }
        }
    }

    for entry in progress {
        if let Some(score) = entry.score {
            score_history
                .entry(entry.skill)
                .or_default()
                .push((entry.date.timestamp(), score));
            *score_sums.entry(entry.skill).or_insert(0.0) += score;
            *score_counts.entry(entry.skill).or_insert(0) += 1;
        }
    }

    // Sort score history by timestamp for each skill
    for history in score_history.values_mut() {
        history.sort_by_key(|(ts, _)| *ts);
    }

    let avg_score: HashMap<SkillCategory, f32> = score_sums
        .into_iter()
        .map(|(skill, sum)| {
            let count = score_counts.get(&skill).copied().unwrap_or(1);
            (skill, if count > 0 { sum / count as f32 } else { 0.0 })
        })
        .collect();

    let weekly_trends = compute_weekly_trends(progress);

    AnalyticsPayload {
        score_history,
        completed_counts,
        planned_minutes,
        completed_minutes,
        avg_score,
        weekly_trends,
    }
}

/// 7-day score trend (Δ score) per skill.
pub fn compute_weekly_trends(progress: &[ProgressEntry]) -> HashMap<SkillCategory, f32> {
    score_trends(progress, 7)
}

/// N-day score trend (Δ score) per skill.
fn score_trends(progress: &[ProgressEntry], days: i64) -> HashMap<SkillCategory, f32> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut hist: HashMap<SkillCategory, Vec<(i64, f32)>> = HashMap::new();

    for entry in progress.iter().filter(|e| e.date > cutoff) {
        if let Some(score) = entry.score {
            hist.entry(entry.skill)
                .or_default()
                .push((entry.date.timestamp(), score));
        }
    }

    hist.into_iter()
        .map(|(skill, mut points)| {
            points.sort_by_key(|(ts, _)| *ts);
            let trend = if points.len() > 1 {
                points.last().map(|last| last.1).unwrap_or(0.0)
                    - points.first().map(|first| first.1).unwrap_or(0.0)
            } else {
                0.0
            };
            (skill, trend)
        })
        .collect()
}
