use chesscoach::repetition::{calculate_next_repetition, generate_spaced_repetition_schedule};
use chesscoach::skills::SkillCategory;
use chesscoach::training::{Difficulty, TrainingTask};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn base_task(repetition_count: u32) -> TrainingTask {
    TrainingTask {
        id: "task1".to_string(),
        plan_id: "plan1".to_string(),
        title: "Tactics Practice".to_string(),
        description: "misses forks".to_string(),
        skill: SkillCategory::Tactics,
        duration_minutes: 30,
        scheduled_date: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        completed: false,
        completed_at: None,
        difficulty: Some(Difficulty::Hard),
        repetition_count,
        next_repetition_date: None,
    }
}

/// Whole days between just-before-the-call and the returned date.
fn days_out(next: DateTime<Utc>, before: DateTime<Utc>) -> i64 {
    (next - before).num_days()
}

#[test]
fn test_first_repetition_is_one_day_out() {
    let task = base_task(0);
    for quality in [0, 3, 5] {
        let before = Utc::now();
        let next = calculate_next_repetition(&task, quality);
        assert_eq!(days_out(next, before), 1);
    }
}

#[test]
fn test_second_repetition_is_six_days_out() {
    let task = base_task(1);
    for quality in [0, 3, 5] {
        let before = Utc::now();
        let next = calculate_next_repetition(&task, quality);
        assert_eq!(days_out(next, before), 6);
    }
}

#[test]
fn test_perfect_quality_stretches_default_interval() {
    // No previous next date: the previous interval defaults to 6 days.
    // quality 5 gives an easiness factor of 2.6, so round(6 * 2.6) = 16.
    let task = base_task(2);
    let before = Utc::now();
    let next = calculate_next_repetition(&task, 5);
    assert_eq!(days_out(next, before), 16);
}

#[test]
fn test_worst_in_range_quality_still_grows_interval() {
    // quality 0 evaluates the factor to 1.7, above the 1.3 floor, so the
    // interval still grows: round(6 * 1.7) = 10.
    let task = base_task(2);
    let before = Utc::now();
    let next = calculate_next_repetition(&task, 0);
    assert_eq!(days_out(next, before), 10);
}

#[test]
fn test_out_of_range_quality_hits_easiness_floor() {
    // quality -2 pushes the formula to 1.06, which clamps to 1.3:
    // round(6 * 1.3) = 8. Out-of-range input must not panic.
    let task = base_task(2);
    let before = Utc::now();
    let next = calculate_next_repetition(&task, -2);
    assert_eq!(days_out(next, before), 8);
}

#[test]
fn test_above_range_quality_flows_through() {
    // quality 7: factor 2.68, round(6 * 2.68) = 16.
    let task = base_task(2);
    let before = Utc::now();
    let next = calculate_next_repetition(&task, 7);
    assert_eq!(days_out(next, before), 16);
}

#[test]
fn test_previous_interval_derived_from_task_dates() {
    // scheduled → next span of 10 days, quality 4: factor 2.5, so 25 days.
    let mut task = base_task(2);
    task.next_repetition_date = Some(task.scheduled_date + Duration::days(10));
    let before = Utc::now();
    let next = calculate_next_repetition(&task, 4);
    assert_eq!(days_out(next, before), 25);
}

#[test]
fn test_previous_interval_never_below_one_day() {
    // next date before the scheduled date clamps the previous interval to 1.
    // quality 5: round(1 * 2.6) = 3.
    let mut task = base_task(2);
    task.next_repetition_date = Some(task.scheduled_date - Duration::days(4));
    let before = Utc::now();
    let next = calculate_next_repetition(&task, 5);
    assert_eq!(days_out(next, before), 3);
}

#[test]
fn test_ladder_offsets_and_counts() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let tasks = generate_spaced_repetition_schedule(&base_task(0), start, 7);

    let expected_offsets = [0, 1, 4, 11, 25, 55, 85];
    assert_eq!(tasks.len(), 7);
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task.scheduled_date, start + Duration::days(expected_offsets[i]));
        assert_eq!(task.repetition_count, i as u32);
        assert!(task.next_repetition_date.is_none());
        assert!(task.id.is_empty());
    }
}

#[test]
fn test_ladder_preserves_base_task_content() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let tasks = generate_spaced_repetition_schedule(&base_task(0), start, 3);

    for task in &tasks {
        assert_eq!(task.skill, SkillCategory::Tactics);
        assert_eq!(task.title, "Tactics Practice");
        assert_eq!(task.duration_minutes, 30);
        assert_eq!(task.difficulty, Some(Difficulty::Hard));
    }
}

#[test]
fn test_non_positive_repetitions_seed_nothing() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    assert!(generate_spaced_repetition_schedule(&base_task(0), start, 0).is_empty());
    assert!(generate_spaced_repetition_schedule(&base_task(0), start, -3).is_empty());
}
