use std::path::{Path, PathBuf};
use crate::error::CoachError;
use crate::students::store::{read_records, write_record};
use crate::training::{Goal, TimeBudget};

pub fn goals_dir() -> PathBuf {
    crate::config::data_root().join("goals")
}

pub fn budgets_dir() -> PathBuf {
    crate::config::data_root().join("budgets")
}

/// Save a goal record asynchronously
pub async fn save_goal(goal: &Goal) -> Result<(), CoachError> {
    save_goal_in(&goals_dir(), goal).await
}

pub async fn save_goal_in(dir: &Path, goal: &Goal) -> Result<(), CoachError> {
    write_record(dir, &goal.id, goal).await
}

/// Load every goal belonging to one student, oldest first
pub async fn load_goals_for(student_id: &str) -> Result<Vec<Goal>, CoachError> {
    load_goals_for_in(&goals_dir(), student_id).await
}

pub async fn load_goals_for_in(dir: &Path, student_id: &str) -> Result<Vec<Goal>, CoachError> {
    let mut goals: Vec<Goal> = read_records(dir).await?;
    goals.retain(|g| g.student_id == student_id);
    goals.sort_by_key(|g| g.created_at);
    Ok(goals)
}

pub async fn remove_goal(id: &str) -> Result<(), CoachError> {
    remove_goal_in(&goals_dir(), id).await
}

pub async fn remove_goal_in(dir: &Path, id: &str) -> Result<(), CoachError> {
    let path = dir.join(format!("{}.json", id));
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| CoachError::new(
            format!("Failed to remove goal file: {}", e),
            "io"
        ).with_context(format!("path: {:?}", path)))
}

/// Save the student's budget snapshot, replacing any previous one. Budgets
/// are keyed by student, one current budget each.
pub async fn save_time_budget(budget: &TimeBudget) -> Result<(), CoachError> {
    save_time_budget_in(&budgets_dir(), budget).await
}

pub async fn save_time_budget_in(dir: &Path, budget: &TimeBudget) -> Result<(), CoachError> {
    write_record(dir, &budget.student_id, budget).await
}

/// Load the student's current budget, None when never set
pub async fn load_time_budget(student_id: &str) -> Result<Option<TimeBudget>, CoachError> {
    load_time_budget_in(&budgets_dir(), student_id).await
}

pub async fn load_time_budget_in(
    dir: &Path,
    student_id: &str,
) -> Result<Option<TimeBudget>, CoachError> {
    let path = dir.join(format!("{}.json", student_id));
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            serde_json::from_str(&content)
                .map_err(|e| CoachError::new(
                    format!("Failed to parse budget file: {}", e),
                    "json_parse"
                ).with_context(format!("path: {:?}", path)))
                .map(Some)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => {
            Err(CoachError::new(
                format!("Failed to read budget file: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))
        }
    }
}
