use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use crate::error::CoachError;
use crate::skills::SkillCategory;
use crate::students::store::{read_records, write_record};
use crate::training::generate_id;

/// Quality assumed for a skill with too little history to judge.
const NEUTRAL_QUALITY: f32 = 3.0;

/// One logged practice session against a task. Score is the 0-5 quality
/// rating fed back into the repetition scheduler; unscored entries only
/// track time spent.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProgressEntry {
    pub id: String,
    pub student_id: String,
    pub task_id: String,
    pub skill: SkillCategory,
    pub date: DateTime<Utc>,
    pub score: Option<f32>,
    pub notes: Option<String>,
    pub time_spent_minutes: u32,
}

impl ProgressEntry {
    pub fn new<S: Into<String>>(
        student_id: S,
        task_id: S,
        skill: SkillCategory,
        score: Option<f32>,
        time_spent_minutes: u32,
    ) -> Self {
        ProgressEntry {
            id: generate_id(),
            student_id: student_id.into(),
            task_id: task_id.into(),
            skill,
            date: Utc::now(),
            score,
            notes: None,
            time_spent_minutes,
        }
    }
}

pub fn progress_dir() -> PathBuf {
    crate::config::data_root().join("progress")
}

/// Save a progress entry asynchronously
pub async fn save_progress_entry(entry: &ProgressEntry) -> Result<(), CoachError> {
    save_progress_entry_in(&progress_dir(), entry).await
}

pub async fn save_progress_entry_in(dir: &Path, entry: &ProgressEntry) -> Result<(), CoachError> {
    write_record(dir, &entry.id, entry).await
}

/// Load all progress entries asynchronously, oldest first
pub async fn load_all_progress() -> Result<Vec<ProgressEntry>, CoachError> {
    load_all_progress_in(&progress_dir()).await
}

pub async fn load_all_progress_in(dir: &Path) -> Result<Vec<ProgressEntry>, CoachError> {
    let mut entries: Vec<ProgressEntry> = read_records(dir).await?;
    entries.sort_by_key(|e| e.date);
    Ok(entries)
}

/// Mean score of the last n scored entries for a skill. With fewer than 3
/// scored attempts there is not enough signal, so the neutral midpoint is
/// returned instead.
pub fn recent_quality(entries: &[ProgressEntry], skill: SkillCategory, n: usize) -> f32 {
    let mut relevant: Vec<&ProgressEntry> = entries
        .iter()
        .filter(|e| e.skill == skill && e.score.is_some())
        .collect();

    // Sort by date (most recent last)
    relevant.sort_by_key(|e| e.date);

    let recent: Vec<&&ProgressEntry> = relevant.iter().rev().take(n).collect();

    if recent.len() < 3 {
        return NEUTRAL_QUALITY;
    }

    let sum: f32 = recent.iter().filter_map(|e| e.score).sum();
    sum / recent.len() as f32
}
