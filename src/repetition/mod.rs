use chrono::{DateTime, Duration, Utc};
use crate::training::TrainingTask;

/// Fixed day gaps used when seeding a review schedule. Repetitions past the
/// last rung keep reusing it.
const REPETITION_INTERVALS: [i64; 5] = [1, 3, 7, 14, 30];

/// When the task should resurface, given how well it went (quality,
/// conventionally 0-5). Simplified SM-2: the first two repetitions use fixed
/// 1- and 6-day intervals; afterwards the previous interval is stretched by
/// an easiness factor floored at 1.3. The result is anchored at wall-clock
/// now, not at the task's scheduled date.
///
/// Out-of-range quality is not rejected; it flows through the easiness
/// formula. The task itself is never mutated here: the caller persists the
/// returned date and increments repetition_count.
pub fn calculate_next_repetition(task: &TrainingTask, quality: i32) -> DateTime<Utc> {
    let now = Utc::now();

    let interval: i64 = if task.repetition_count == 0 {
        1
    } else if task.repetition_count == 1 {
        6
    } else {
        let previous_interval = match task.next_repetition_date {
            Some(next) => (next - task.scheduled_date).num_days().max(1),
            None => 6,
        };

        let lapse = f64::from(5 - quality);
        let easiness_factor = (2.5 + (0.1 - lapse * (0.08 + lapse * 0.02))).max(1.3);
        (previous_interval as f64 * easiness_factor).round() as i64
    };

    now + Duration::days(interval)
}

/// Seed `repetitions` copies of a task along the fixed interval ladder,
/// starting at `start_date`. Entry i carries repetition_count = i and an
/// unset next_repetition_date; adaptive rescheduling happens per completion
/// via calculate_next_repetition, not here. A non-positive count seeds
/// nothing.
pub fn generate_spaced_repetition_schedule(
    base_task: &TrainingTask,
    start_date: DateTime<Utc>,
    repetitions: i32,
) -> Vec<TrainingTask> {
    let mut tasks = Vec::new();
    let mut current_date = start_date;

    if repetitions <= 0 {
        return tasks;
    }

    for i in 0..repetitions {
        let mut task = base_task.clone();
        // Ids are assigned by the plan store at persist time.
        task.id = String::new();
        task.scheduled_date = current_date;
        task.repetition_count = i as u32;
        task.next_repetition_date = None;
        tasks.push(task);

        let interval = REPETITION_INTERVALS[(i as usize).min(REPETITION_INTERVALS.len() - 1)];
        current_date = current_date + Duration::days(interval);
    }

    tasks
}
