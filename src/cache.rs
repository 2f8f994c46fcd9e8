use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};
use crate::error::CoachError;
use crate::skills::PercentMap;
use crate::state::app::AppState;
use crate::training::{Finding, Goal};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedDistribution {
    pub data: String,
    pub timestamp: i64,
}

/// Content fingerprint of a findings + goals input set. Re-analyzed reports
/// produce new finding ids, so two identical suggestion requests share a
/// fingerprint only while their inputs are literally the same records.
pub fn fingerprint(findings: &[Finding], goals: &[Goal]) -> String {
    let mut hasher = Sha256::new();
    for finding in findings {
        hasher.update(finding.id.as_bytes());
        hasher.update([finding.priority.weight() as u8]);
        for skill in &finding.skill_tags {
            hasher.update(skill.key().as_bytes());
        }
    }
    for goal in goals {
        hasher.update(goal.id.as_bytes());
        hasher.update(goal.skill.key().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Generate a hash key from student id and input fingerprint
fn cache_key(student_id: &str, fingerprint: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    student_id.hash(&mut hasher);
    fingerprint.hash(&mut hasher);
    hasher.finish()
}

/// Check cache and return the distribution if found
pub fn get_cached_distribution(
    state: &AppState,
    student_id: &str,
    fingerprint: &str,
) -> Option<PercentMap> {
    let key = cache_key(student_id, fingerprint);
    let cache = state.distribution_cache.read();

    if let Some(cached) = cache.peek(&key) {
        tracing::debug!(
            student_id = student_id,
            "Distribution cache hit"
        );
        match serde_json::from_str::<PercentMap>(&cached.data) {
            Ok(parsed) => return Some(parsed),
            Err(e) => {
                tracing::warn!(
                    student_id = student_id,
                    error = %e,
                    "Failed to parse cached distribution"
                );
            }
        }
    }

    tracing::debug!(
        student_id = student_id,
        "Distribution cache miss"
    );
    None
}

/// Store a suggested distribution in the cache
pub fn cache_distribution(
    state: &AppState,
    student_id: &str,
    fingerprint: &str,
    distribution: &PercentMap,
) -> Result<(), CoachError> {
    let key = cache_key(student_id, fingerprint);
    let data = serde_json::to_string(distribution)
        .map_err(|e| CoachError::new(
            format!("Failed to serialize distribution for cache: {}", e),
            "json_serialize"
        ))?;

    let cached = CachedDistribution {
        data,
        timestamp: chrono::Utc::now().timestamp(),
    };

    let mut cache = state.distribution_cache.write();
    cache.put(key, cached);
    Ok(())
}
