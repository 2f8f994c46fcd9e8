pub mod store;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::training::{generate_id, Finding};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn new<S: Into<String>>(name: S, email: Option<String>) -> Self {
        let now = Utc::now();
        Student {
            id: generate_id(),
            name: name.into(),
            email,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One analyzed report for a student, carrying the findings the upstream
/// analysis extracted from it. Screenshot payloads stay with the upload
/// service; the scheduler only ever sees the findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessReport {
    pub id: String,
    pub student_id: String,
    pub findings: Vec<Finding>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChessReport {
    pub fn new<S: Into<String>>(student_id: S) -> Self {
        let now = Utc::now();
        ChessReport {
            id: generate_id(),
            student_id: student_id.into(),
            findings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
