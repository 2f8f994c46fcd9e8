use std::path::{Path, PathBuf};
use chrono::Utc;
use crate::error::CoachError;
use crate::students::store::{read_records, write_record};
use crate::training::{generate_id, TrainingPlan, TrainingTask};

pub fn plans_dir() -> PathBuf {
    crate::config::data_root().join("plans")
}

/// Persist a plan, assigning ids to the plan and to any tasks the planner
/// produced without one. Returns the plan as stored.
pub async fn save_plan(plan: TrainingPlan) -> Result<TrainingPlan, CoachError> {
    save_plan_in(&plans_dir(), plan).await
}

pub async fn save_plan_in(dir: &Path, mut plan: TrainingPlan) -> Result<TrainingPlan, CoachError> {
    if plan.id.is_empty() {
        plan.id = generate_id();
    }
    for task in &mut plan.tasks {
        if task.id.is_empty() {
            task.id = generate_id();
        }
        task.plan_id = plan.id.clone();
    }
    plan.updated_at = Utc::now();

    write_record(dir, &plan.id, &plan).await?;
    Ok(plan)
}

/// Load one plan by id, None when absent
pub async fn load_plan(id: &str) -> Result<Option<TrainingPlan>, CoachError> {
    load_plan_in(&plans_dir(), id).await
}

pub async fn load_plan_in(dir: &Path, id: &str) -> Result<Option<TrainingPlan>, CoachError> {
    let path = dir.join(format!("{}.json", id));
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            serde_json::from_str(&content)
                .map_err(|e| CoachError::new(
                    format!("Failed to parse plan file: {}", e),
                    "json_parse"
                ).with_context(format!("path: {:?}", path)))
                .map(Some)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => {
            Err(CoachError::new(
                format!("Failed to read plan file: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))
        }
    }
}

/// Load all plans asynchronously, oldest first
pub async fn load_all_plans() -> Result<Vec<TrainingPlan>, CoachError> {
    load_all_plans_in(&plans_dir()).await
}

pub async fn load_all_plans_in(dir: &Path) -> Result<Vec<TrainingPlan>, CoachError> {
    let mut plans: Vec<TrainingPlan> = read_records(dir).await?;
    plans.sort_by_key(|p| p.created_at);
    Ok(plans)
}

/// Mark a task complete and reschedule it. The core computes the next
/// repetition date from the task's pre-completion state; this store applies
/// the caller-side half of the contract: stamp completion, persist the
/// returned date, increment the repetition counter. Returns the updated
/// task.
pub async fn complete_task(
    plan_id: &str,
    task_id: &str,
    quality: i32,
) -> Result<TrainingTask, CoachError> {
    complete_task_in(&plans_dir(), plan_id, task_id, quality).await
}

pub async fn complete_task_in(
    dir: &Path,
    plan_id: &str,
    task_id: &str,
    quality: i32,
) -> Result<TrainingTask, CoachError> {
    let mut plan = load_plan_in(dir, plan_id)
        .await?
        .ok_or_else(|| CoachError::new("Plan not found", "plans")
            .with_context(format!("plan_id: {}", plan_id)))?;

    let task = plan
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| CoachError::new("Task not found in plan", "plans")
            .with_context(format!("task_id: {}", task_id)))?;

    let next = crate::repetition::calculate_next_repetition(task, quality);
    task.completed = true;
    task.completed_at = Some(Utc::now());
    task.next_repetition_date = Some(next);
    task.repetition_count += 1;

    let updated = task.clone();
    plan.updated_at = Utc::now();
    write_record(dir, plan_id, &plan).await?;

    tracing::info!(
        plan_id = plan_id,
        task_id = task_id,
        quality = quality,
        next_repetition = %next,
        "Task completed and rescheduled"
    );

    Ok(updated)
}

/// Append a ladder-seeded review schedule for a task to its plan. The seed
/// count comes from the schedule configuration; the first review lands on
/// the task's next repetition date when one is set. Returns the appended
/// tasks.
pub async fn schedule_review_tasks(
    plan_id: &str,
    task_id: &str,
) -> Result<Vec<TrainingTask>, CoachError> {
    schedule_review_tasks_in(
        &plans_dir(),
        plan_id,
        task_id,
        crate::config::get_schedule_config().default_repetitions,
    )
    .await
}

pub async fn schedule_review_tasks_in(
    dir: &Path,
    plan_id: &str,
    task_id: &str,
    repetitions: i32,
) -> Result<Vec<TrainingTask>, CoachError> {
    let mut plan = load_plan_in(dir, plan_id)
        .await?
        .ok_or_else(|| CoachError::new("Plan not found", "plans")
            .with_context(format!("plan_id: {}", plan_id)))?;

    let base = plan
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .cloned()
        .ok_or_else(|| CoachError::new("Task not found in plan", "plans")
            .with_context(format!("task_id: {}", task_id)))?;

    let start = base.next_repetition_date.unwrap_or_else(Utc::now);
    let mut reviews = crate::repetition::generate_spaced_repetition_schedule(&base, start, repetitions);
    for review in &mut reviews {
        review.id = generate_id();
        review.plan_id = plan.id.clone();
        review.completed = false;
        review.completed_at = None;
    }

    plan.tasks.extend(reviews.iter().cloned());
    plan.updated_at = Utc::now();
    write_record(dir, plan_id, &plan).await?;

    tracing::info!(
        plan_id = plan_id,
        task_id = task_id,
        count = reviews.len(),
        "Review schedule appended"
    );

    Ok(reviews)
}
