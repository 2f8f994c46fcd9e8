use chesscoach::planner;
use chesscoach::planner::store::{
    complete_task_in, load_all_plans_in, load_plan_in, save_plan_in, schedule_review_tasks_in,
};
use chesscoach::progress::{load_all_progress_in, save_progress_entry_in, ProgressEntry};
use chesscoach::skills::SkillCategory;
use chesscoach::students::store::{
    add_finding, load_all_students_in, load_reports_for_in, remove_student_in, save_report_in,
    save_student_in,
};
use chesscoach::students::{ChessReport, Student};
use chesscoach::training::store::{
    load_goals_for_in, load_time_budget_in, save_goal_in, save_time_budget_in,
};
use chesscoach::training::{Finding, Goal, Priority, TimeBudget, TrainingPlan};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;

fn sample_budget(student_id: &str) -> TimeBudget {
    let mut distribution = HashMap::new();
    distribution.insert(SkillCategory::Tactics, 50.0);
    distribution.insert(SkillCategory::Endgames, 30.0);
    distribution.insert(SkillCategory::Openings, 20.0);
    TimeBudget::new(student_id, 60, 420, distribution)
}

fn sample_plan(student_id: &str) -> TrainingPlan {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap();
    let findings = vec![Finding::new(
        "report1",
        "misses forks",
        vec![SkillCategory::Tactics],
        Priority::High,
    )];
    let goals = vec![Goal::new(student_id, SkillCategory::Openings, "learn the Caro-Kann")];
    let time_budget = sample_budget(student_id);

    let mut plan = TrainingPlan::new(
        student_id,
        "report1",
        start,
        end,
        goals.clone(),
        time_budget.clone(),
    );
    plan.tasks =
        planner::generate_training_tasks(&plan.id, &findings, &goals, &time_budget, start, end);
    plan
}

#[tokio::test]
async fn test_student_roundtrip_and_removal() {
    let dir = tempfile::tempdir().unwrap();
    let alice = Student::new("Alice", Some("alice@example.com".to_string()));
    let bob = Student::new("Bob", None);

    save_student_in(dir.path(), &alice).await.unwrap();
    save_student_in(dir.path(), &bob).await.unwrap();

    let loaded = load_all_students_in(dir.path()).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().any(|s| s.name == "Alice"));

    remove_student_in(dir.path(), &alice.id).await.unwrap();
    let loaded = load_all_students_in(dir.path()).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Bob");
}

#[tokio::test]
async fn test_report_findings_deduplicate() {
    let dir = tempfile::tempdir().unwrap();
    let mut report = ChessReport::new("student1");

    let added = add_finding(
        &mut report,
        Finding::new("r", "misses forks", vec![SkillCategory::Tactics], Priority::High),
    );
    assert!(added);

    // Same description and tags, fresh id: still a duplicate
    let added = add_finding(
        &mut report,
        Finding::new("r", "misses forks", vec![SkillCategory::Tactics], Priority::High),
    );
    assert!(!added);

    // Same description, different tags: a distinct finding
    let added = add_finding(
        &mut report,
        Finding::new("r", "misses forks", vec![SkillCategory::Calculation], Priority::High),
    );
    assert!(added);

    assert_eq!(report.findings.len(), 2);

    save_report_in(dir.path(), &report).await.unwrap();
    let loaded = load_reports_for_in(dir.path(), "student1").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].findings.len(), 2);
}

#[tokio::test]
async fn test_goals_filtered_by_student() {
    let dir = tempfile::tempdir().unwrap();
    let g1 = Goal::new("student1", SkillCategory::Tactics, "spot forks faster");
    let g2 = Goal::new("student2", SkillCategory::Endgames, "convert rook endings");
    save_goal_in(dir.path(), &g1).await.unwrap();
    save_goal_in(dir.path(), &g2).await.unwrap();

    let loaded = load_goals_for_in(dir.path(), "student1").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, g1.id);
}

#[tokio::test]
async fn test_budget_roundtrip_and_absence() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_time_budget_in(dir.path(), "student1").await.unwrap().is_none());

    let budget = sample_budget("student1");
    save_time_budget_in(dir.path(), &budget).await.unwrap();

    let loaded = load_time_budget_in(dir.path(), "student1").await.unwrap().unwrap();
    assert_eq!(loaded.daily_minutes, 60);
    assert_eq!(loaded.skill_distribution[&SkillCategory::Tactics], 50.0);
}

#[tokio::test]
async fn test_save_plan_assigns_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut plan = sample_plan("student1");
    plan.id = String::new();

    let saved = save_plan_in(dir.path(), plan).await.unwrap();
    assert!(!saved.id.is_empty());
    assert!(!saved.tasks.is_empty());
    for task in &saved.tasks {
        assert!(!task.id.is_empty());
        assert_eq!(task.plan_id, saved.id);
    }

    let loaded = load_all_plans_in(dir.path()).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].tasks.len(), saved.tasks.len());
}

#[tokio::test]
async fn test_missing_plan_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_plan_in(dir.path(), "nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_complete_task_applies_repetition_contract() {
    let dir = tempfile::tempdir().unwrap();
    let saved = save_plan_in(dir.path(), sample_plan("student1")).await.unwrap();
    let task_id = saved.tasks[0].id.clone();

    let before = Utc::now();
    let updated = complete_task_in(dir.path(), &saved.id, &task_id, 4).await.unwrap();

    assert!(updated.completed);
    assert!(updated.completed_at.is_some());
    assert_eq!(updated.repetition_count, 1);
    // First completion: the follow-up lands one day out
    let next = updated.next_repetition_date.unwrap();
    assert_eq!((next - before).num_days(), 1);

    // The mutation is persisted, not just returned
    let reloaded = load_plan_in(dir.path(), &saved.id).await.unwrap().unwrap();
    let task = reloaded.tasks.iter().find(|t| t.id == task_id).unwrap();
    assert!(task.completed);
    assert_eq!(task.repetition_count, 1);
    assert!(task.next_repetition_date.is_some());
}

#[tokio::test]
async fn test_complete_task_unknown_ids_error() {
    let dir = tempfile::tempdir().unwrap();
    let saved = save_plan_in(dir.path(), sample_plan("student1")).await.unwrap();

    assert!(complete_task_in(dir.path(), "nope", "nope", 3).await.is_err());
    assert!(complete_task_in(dir.path(), &saved.id, "nope", 3).await.is_err());
}

#[tokio::test]
async fn test_schedule_review_tasks_appends_ladder() {
    let dir = tempfile::tempdir().unwrap();
    let saved = save_plan_in(dir.path(), sample_plan("student1")).await.unwrap();
    let task_id = saved.tasks[0].id.clone();
    let count_before = saved.tasks.len();

    let reviews = schedule_review_tasks_in(dir.path(), &saved.id, &task_id, 5).await.unwrap();
    assert_eq!(reviews.len(), 5);
    for (i, review) in reviews.iter().enumerate() {
        assert!(!review.id.is_empty());
        assert_eq!(review.plan_id, saved.id);
        assert_eq!(review.repetition_count, i as u32);
        assert!(!review.completed);
    }

    let reloaded = load_plan_in(dir.path(), &saved.id).await.unwrap().unwrap();
    assert_eq!(reloaded.tasks.len(), count_before + 5);
}

#[tokio::test]
async fn test_progress_entries_sorted_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut early = ProgressEntry::new("student1", "task1", SkillCategory::Tactics, Some(3.0), 20);
    early.date = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let mut late = ProgressEntry::new("student1", "task2", SkillCategory::Tactics, Some(4.0), 25);
    late.date = Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap();

    // Saved newest first; loaded oldest first
    save_progress_entry_in(dir.path(), &late).await.unwrap();
    save_progress_entry_in(dir.path(), &early).await.unwrap();

    let loaded = load_all_progress_in(dir.path()).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, early.id);
    assert_eq!(loaded[1].id, late.id);
}
