use std::sync::Arc;
use parking_lot::RwLock;
use crate::cache::CachedDistribution;
use crate::students::Student;
use crate::training::TrainingPlan;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::collections::VecDeque;

/// Application-wide state container for embedding applications.
/// All mutable state is centralized here and passed explicitly to functions.
/// This eliminates global mutable state and lock-ordering hazards.
#[derive(Clone)]
pub struct AppState {
    /// Student currently being coached, if any
    pub current_student: Arc<RwLock<Option<Student>>>,
    /// In-memory cache of persisted plans
    pub plans: Arc<RwLock<Option<Vec<TrainingPlan>>>>,
    /// Suggested-distribution cache (LRU with bounded size)
    pub distribution_cache: Arc<RwLock<LruCache<u64, CachedDistribution>>>,
    /// Recently completed task ids (newest first, for quick display)
    pub recently_completed: Arc<RwLock<VecDeque<String>>>,
}

impl AppState {
    /// Create a new AppState with default values
    pub fn new() -> Self {
        AppState {
            current_student: Arc::new(RwLock::new(None)),
            plans: Arc::new(RwLock::new(None)),
            distribution_cache: Arc::new(RwLock::new(
                LruCache::new(NonZeroUsize::new(100).expect("100 > 0"))
            )),
            recently_completed: Arc::new(RwLock::new(VecDeque::with_capacity(5))),
        }
    }

    pub fn get_current_student(&self) -> Option<Student> {
        self.current_student.read().clone()
    }

    pub fn set_current_student(&self, student: Option<Student>) {
        *self.current_student.write() = student;
    }

    /// Get cached plans (requires plans to already be loaded)
    pub fn get_plans(&self) -> Result<Vec<TrainingPlan>, crate::error::CoachError> {
        let guard = self.plans.read();
        guard.as_ref()
            .ok_or_else(|| crate::error::CoachError::new(
                "Plans not loaded - use planner::store::load_all_plans() to load from disk",
                "state"
            ))
            .map(|p| p.clone())
    }

    /// Update cached plans with a closure (requires plans to already be loaded)
    pub fn update_plans<F>(&self, f: F) -> Result<(), crate::error::CoachError>
    where
        F: FnOnce(&mut Vec<TrainingPlan>),
    {
        let mut guard = self.plans.write();
        let plans = guard.as_mut()
            .ok_or_else(|| crate::error::CoachError::new(
                "Plans not loaded - use planner::store::load_all_plans() to load from disk first",
                "state"
            ))?;
        f(plans);
        Ok(())
    }

    /// Set cached plans directly (for initialization from async load)
    pub fn set_plans(&self, plans: Vec<TrainingPlan>) {
        *self.plans.write() = Some(plans);
    }

    /// Record that a task was just completed (for quick display)
    pub fn record_task_completed(&self, task_id: String) {
        let mut recent = self.recently_completed.write();
        // Remove if already present (to avoid duplicates)
        recent.retain(|id| id != &task_id);
        // Add to front
        recent.push_front(task_id);
        // Keep only last 5
        if recent.len() > 5 {
            recent.pop_back();
        }
    }

    /// Get recently completed task ids
    pub fn get_recently_completed(&self) -> Vec<String> {
        self.recently_completed.read().iter().cloned().collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
