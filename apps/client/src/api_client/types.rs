use serde::{Deserialize, Serialize};

use crate::models::wire::null_as_default;
use crate::models::{
    Availability, JobRecord, MatchResult, Principal, SkillGap, VolunteerProfile,
};

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RetrieveRequest {
    pub limit: u32,
}

/// Multipart payload for `POST /api/volunteers/upload-cv`, validated before construction.
#[derive(Debug, Clone)]
pub struct CvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub uploaded_by: String,
    pub availability: Availability,
}

impl CvUpload {
    /// Best-effort MIME type from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "doc" => "application/msword",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }

    /// The `availability` form field, JSON tagged with its `type`.
    pub fn availability_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.availability)
    }
}

/// Query for `GET /api/jobs`. Blank filters are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPageRequest {
    pub skip: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub location: Option<String>,
    pub skill: Option<String>,
    pub organization: Option<String>,
}

impl JobPageRequest {
    pub fn first(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let filters = [
            ("search", &self.search),
            ("location", &self.location),
            ("skill", &self.skill),
            ("organization", &self.organization),
        ];
        for (key, value) in filters {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        pairs
    }
}

// Response bodies

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<Principal>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub profile_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGapReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_gaps: Vec<SkillGap>,
    #[serde(default)]
    pub total_jobs_analyzed: u64,
    #[serde(default)]
    pub total_unique_required_skills: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VolunteersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profiles: Vec<VolunteerProfile>,
}

/// Outcome of `POST /api/jobs/retrieve`. `errors` may be non-empty on success; those
/// are warnings, not failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRetrieval {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub jobs_retrieved: u64,
    #[serde(default)]
    pub jobs_stored: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobCountResponse {
    pub total_jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
