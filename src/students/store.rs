use sha2::{Sha256, Digest};
use std::path::{Path, PathBuf};
use chrono::Utc;
use crate::error::CoachError;
use crate::students::{ChessReport, Student};
use crate::training::Finding;

pub fn students_dir() -> PathBuf {
    crate::config::data_root().join("students")
}

pub fn reports_dir() -> PathBuf {
    crate::config::data_root().join("reports")
}

/// Content hash used to de-duplicate findings within a report. The upstream
/// analysis re-runs on re-uploaded screenshots and happily repeats itself.
pub fn finding_hash(finding: &Finding) -> String {
    let mut hasher = Sha256::new();
    hasher.update(finding.description.as_bytes());
    for skill in &finding.skill_tags {
        hasher.update(skill.key().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Attach a finding to a report unless an identical one is already there.
/// Returns whether the finding was added.
pub fn add_finding(report: &mut ChessReport, finding: Finding) -> bool {
    let hash = finding_hash(&finding);
    if report.findings.iter().any(|f| finding_hash(f) == hash) {
        tracing::debug!(
            report_id = %report.id,
            description = %finding.description,
            "Skipping duplicate finding"
        );
        return false;
    }

    report.findings.push(finding);
    report.updated_at = Utc::now();
    true
}

/// Save a student record asynchronously
pub async fn save_student(student: &Student) -> Result<(), CoachError> {
    save_student_in(&students_dir(), student).await
}

pub async fn save_student_in(dir: &Path, student: &Student) -> Result<(), CoachError> {
    write_record(dir, &student.id, student).await
}

/// Load all student records asynchronously, oldest first
pub async fn load_all_students() -> Result<Vec<Student>, CoachError> {
    load_all_students_in(&students_dir()).await
}

pub async fn load_all_students_in(dir: &Path) -> Result<Vec<Student>, CoachError> {
    let mut students: Vec<Student> = read_records(dir).await?;
    students.sort_by_key(|s| s.created_at);
    Ok(students)
}

pub async fn remove_student(id: &str) -> Result<(), CoachError> {
    remove_student_in(&students_dir(), id).await
}

pub async fn remove_student_in(dir: &Path, id: &str) -> Result<(), CoachError> {
    let path = dir.join(format!("{}.json", id));
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| CoachError::new(
            format!("Failed to remove student file: {}", e),
            "io"
        ).with_context(format!("path: {:?}", path)))
}

/// Save a report (and its findings) asynchronously
pub async fn save_report(report: &ChessReport) -> Result<(), CoachError> {
    save_report_in(&reports_dir(), report).await
}

pub async fn save_report_in(dir: &Path, report: &ChessReport) -> Result<(), CoachError> {
    write_record(dir, &report.id, report).await
}

/// Load every report belonging to one student, oldest first
pub async fn load_reports_for(student_id: &str) -> Result<Vec<ChessReport>, CoachError> {
    load_reports_for_in(&reports_dir(), student_id).await
}

pub async fn load_reports_for_in(dir: &Path, student_id: &str) -> Result<Vec<ChessReport>, CoachError> {
    let mut reports: Vec<ChessReport> = read_records(dir).await?;
    reports.retain(|r| r.student_id == student_id);
    reports.sort_by_key(|r| r.created_at);
    Ok(reports)
}

/// Write one record as pretty JSON, creating the directory if needed.
pub(crate) async fn write_record<T: serde::Serialize>(
    dir: &Path,
    id: &str,
    record: &T,
) -> Result<(), CoachError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CoachError::new(
            format!("Failed to create record directory: {}", e),
            "io"
        ).with_context(format!("path: {:?}", dir)))?;

    let path = dir.join(format!("{}.json", id));
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| CoachError::new(
            format!("Failed to serialize record: {}", e),
            "json_serialize"
        ))?;

    tokio::fs::write(&path, json)
        .await
        .map_err(|e| CoachError::new(
            format!("Failed to write record file: {}", e),
            "io"
        ).with_context(format!("path: {:?}", path)))
}

/// Read every parseable record in a directory. A missing directory is an
/// empty store; unreadable files are logged and skipped.
pub(crate) async fn read_records<T: serde::de::DeserializeOwned>(
    dir: &Path,
) -> Result<Vec<T>, CoachError> {
    let mut records = Vec::new();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(records);
        }
        Err(e) => {
            return Err(CoachError::new(
                format!("Failed to read record directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", dir)));
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                match serde_json::from_str::<T>(&text) {
                    Ok(rec) => records.push(rec),
                    Err(e) => {
                        tracing::warn!(
                            path = ?path,
                            error = %e,
                            "Failed to parse record file"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = ?path,
                    error = %e,
                    "Failed to read record file"
                );
            }
        }
    }

    Ok(records)
}
