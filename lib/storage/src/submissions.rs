//! Community submissions awaiting moderation

use crate::json_file::{read_json, write_json_atomic};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use peptalk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Slug used for stacks submitted from the builder
pub const BUILDER_SLUG: &str = "__builder__";
pub const MAX_USERNAME_CHARS: usize = 40;
pub const MAX_TEXT_CHARS: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    Archived,
    Trash,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Archived => "archived",
            SubmissionStatus::Trash => "trash",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" | "denied" => Ok(SubmissionStatus::Rejected),
            "archived" => Ok(SubmissionStatus::Archived),
            "trash" => Ok(SubmissionStatus::Trash),
            other => Err(Error::InvalidSubmission(format!("unknown status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Peptide,
    Blend,
    Stack,
}

/// Body of a submit request
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionInput {
    #[serde(rename = "type", alias = "entity_type")]
    pub entity_type: EntityType,
    #[serde(default, alias = "entity_slug")]
    pub slug: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ack_no_dosing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub entity_type: EntityType,
    pub entity_slug: String,
    pub username: String,
    pub text: String,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct SubmissionQueue {
    path: PathBuf,
    submissions: RwLock<Vec<Submission>>,
}

impl SubmissionQueue {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let submissions: Vec<Submission> = read_json(&path)
            .map_err(|e| Error::Storage(format!("{:#}", e)))?
            .unwrap_or_default();

        info!("Loaded {} submissions", submissions.len());
        Ok(Self {
            path,
            submissions: RwLock::new(submissions),
        })
    }

    /// Validate and enqueue as `pending`
    pub fn submit(&self, input: SubmissionInput) -> Result<Submission> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(Error::InvalidSubmission("username is required".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(Error::InvalidSubmission("username is too long".to_string()));
        }
        let text = input.text.trim();
        if text.is_empty() {
            return Err(Error::InvalidSubmission("text is required".to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(Error::InvalidSubmission("text is too long".to_string()));
        }
        if !input.ack_no_dosing {
            return Err(Error::InvalidSubmission(
                "the no-dosing rule must be acknowledged".to_string(),
            ));
        }

        let slug = match (input.entity_type, input.slug.trim()) {
            (EntityType::Stack, "") => BUILDER_SLUG.to_string(),
            (_, "") => return Err(Error::InvalidSubmission("slug is required".to_string())),
            (_, slug) => slug.to_string(),
        };

        let now = Utc::now();
        let submission = Submission {
            id: format!("ugc_{}", uuid::Uuid::new_v4().simple()),
            entity_type: input.entity_type,
            entity_slug: slug,
            username: username.to_string(),
            text: text.to_string(),
            status: SubmissionStatus::Pending,
            reason: None,
            created_at: now,
            updated_at: now,
        };

        let mut submissions = self.submissions.write();
        let mut next = submissions.clone();
        next.push(submission.clone());
        self.persist(&next)?;
        *submissions = next;
        info!("Queued submission {} for {}", submission.id, submission.entity_slug);
        Ok(submission)
    }

    /// Submissions in `status`, newest first
    pub fn list(&self, status: SubmissionStatus) -> Vec<Submission> {
        let mut out: Vec<Submission> = self
            .submissions
            .read()
            .iter()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn get(&self, id: &str) -> Option<Submission> {
        self.submissions.read().iter().find(|s| s.id == id).cloned()
    }

    /// Move a submission to a new moderation state
    pub fn set_status(&self, id: &str, status: SubmissionStatus, reason: Option<String>) -> Result<Submission> {
        let mut submissions = self.submissions.write();
        let idx = submissions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::InvalidSubmission(format!("no submission '{}'", id)))?;

        let mut next = submissions.clone();
        let entry = &mut next[idx];
        entry.status = status;
        entry.reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        self.persist(&next)?;
        *submissions = next;
        info!("Submission {} is now {}", id, status);
        Ok(updated)
    }

    pub fn len(&self) -> usize {
        self.submissions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.read().is_empty()
    }

    fn persist(&self, submissions: &[Submission]) -> Result<()> {
        write_json_atomic(&self.path, &submissions).map_err(|e| Error::Storage(format!("{:#}", e)))
    }
}
