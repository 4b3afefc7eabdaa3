//! API client: the single point of entry for every call to the volunteer platform.
//!
//! ARCHITECTURAL RULE: no view or core module talks HTTP directly. Views depend on the
//! [`PortalApi`] trait so they can be driven by a fake in tests.
//!
//! Nothing here retries. A failed call surfaces once and the user re-triggers it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::access::VolunteerScope;
use crate::errors::{extract_server_message, AppError};
use crate::models::{MatchResult, Principal, VolunteerProfile};

pub mod types;

pub use types::{
    CvUpload, HealthStatus, JobPage, JobPageRequest, JobRetrieval, SkillGapReport, UploadOutcome,
};
use types::{
    AckResponse, Credentials, JobCountResponse, LoginResponse, MatchesResponse, RetrieveRequest,
    SignupRequest, VolunteersResponse,
};

/// Remote collaborators consumed by the views. Every method is a suspension point.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Principal, AppError>;
    async fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), AppError>;
    async fn upload_cv(&self, upload: &CvUpload) -> Result<UploadOutcome, AppError>;
    async fn matches(&self, profile_id: &str) -> Result<Vec<MatchResult>, AppError>;
    async fn skill_gaps(
        &self,
        profile_id: &str,
        limit: u32,
    ) -> Result<SkillGapReport, AppError>;
    async fn volunteers(
        &self,
        scope: &VolunteerScope,
    ) -> Result<Vec<VolunteerProfile>, AppError>;
    async fn delete_volunteer(&self, id: &str) -> Result<(), AppError>;
    async fn retrieve_jobs(&self, limit: u32) -> Result<JobRetrieval, AppError>;
    async fn jobs(&self, request: &JobPageRequest) -> Result<JobPage, AppError>;
    async fn job_count(&self) -> Result<u64, AppError>;
    async fn health(&self) -> Result<HealthStatus, AppError>;
}

/// reqwest-backed [`PortalApi`] talking JSON to the platform backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            AppError::validation(format!("Invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::validation(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends `request` and decodes a JSON body.
    ///
    /// Non-2xx responses become [`AppError::Remote`] carrying the server's message when the
    /// body has one, otherwise `fallback`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, AppError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {e}");
            AppError::Http(e)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("API returned {} for {}: {}", status, url, body);
            let message = extract_server_message(&body).unwrap_or_else(|| fallback.to_string());
            return Err(AppError::remote(Some(status.as_u16()), message));
        }

        debug!("API call succeeded: {} {}", status, url);

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected response body from {url}: {e}");
            AppError::remote(Some(status.as_u16()), fallback)
        })
    }
}

#[async_trait]
impl PortalApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        debug!("POST /api/auth/login as {username}");
        let request = self
            .client
            .post(self.endpoint(&["api", "auth", "login"]))
            .json(&Credentials { username, password });

        let response: LoginResponse = self.send(request, "Login failed").await?;
        match response {
            LoginResponse {
                success: true,
                user: Some(user),
                ..
            } => Ok(user),
            LoginResponse { message, .. } => Err(AppError::remote(
                Some(200),
                message.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    async fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), AppError> {
        debug!("POST /api/auth/signup for {username}");
        let request = self
            .client
            .post(self.endpoint(&["api", "auth", "signup"]))
            .json(&SignupRequest {
                username,
                password,
                email,
            });

        let response: AckResponse = self.send(request, "Signup failed").await?;
        if response.success {
            Ok(())
        } else {
            Err(AppError::remote(
                Some(200),
                response.message.unwrap_or_else(|| "Signup failed".to_string()),
            ))
        }
    }

    async fn upload_cv(&self, upload: &CvUpload) -> Result<UploadOutcome, AppError> {
        debug!(
            "POST /api/volunteers/upload-cv ({}, {} bytes)",
            upload.file_name,
            upload.bytes.len()
        );
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type())?;
        let availability = upload
            .availability_json()
            .map_err(|e| AppError::Internal(e.into()))?;

        let form = Form::new()
            .part("file", file)
            .text("name", upload.name.clone())
            .text("email", upload.email.clone())
            .text("phone", upload.phone.clone())
            .text("location", upload.location.clone())
            .text("uploaded_by", upload.uploaded_by.clone())
            .text("availability", availability);

        let request = self
            .client
            .post(self.endpoint(&["api", "volunteers", "upload-cv"]))
            .multipart(form);

        self.send(request, "Error uploading CV").await
    }

    async fn matches(&self, profile_id: &str) -> Result<Vec<MatchResult>, AppError> {
        debug!("GET /api/volunteers/{profile_id}/matches");
        let request = self
            .client
            .get(self.endpoint(&["api", "volunteers", profile_id, "matches"]));

        let response: MatchesResponse = self.send(request, "Error finding matches").await?;
        Ok(response.matches)
    }

    async fn skill_gaps(
        &self,
        profile_id: &str,
        limit: u32,
    ) -> Result<SkillGapReport, AppError> {
        debug!("GET /api/recommendations/skills for {profile_id}");
        let request = self
            .client
            .get(self.endpoint(&["api", "recommendations", "skills"]))
            .query(&[("profile_id", profile_id.to_string()), ("limit", limit.to_string())]);

        self.send(request, "Error fetching skill recommendations")
            .await
    }

    async fn volunteers(
        &self,
        scope: &VolunteerScope,
    ) -> Result<Vec<VolunteerProfile>, AppError> {
        debug!(
            "GET /api/volunteers/all as {} ({})",
            scope.username, scope.user_role
        );
        let request = self
            .client
            .get(self.endpoint(&["api", "volunteers", "all"]))
            .query(&scope.query_pairs());

        let response: VolunteersResponse =
            self.send(request, "Error fetching volunteers").await?;
        Ok(response.profiles)
    }

    async fn delete_volunteer(&self, id: &str) -> Result<(), AppError> {
        debug!("DELETE /api/volunteers/{id}");
        let request = self.client.delete(self.endpoint(&["api", "volunteers", id]));

        let response: AckResponse = self.send(request, "Error deleting volunteer").await?;
        if response.success {
            Ok(())
        } else {
            Err(AppError::remote(
                Some(200),
                response
                    .message
                    .unwrap_or_else(|| "Error deleting volunteer".to_string()),
            ))
        }
    }

    async fn retrieve_jobs(&self, limit: u32) -> Result<JobRetrieval, AppError> {
        debug!("POST /api/jobs/retrieve (limit {limit})");
        let request = self
            .client
            .post(self.endpoint(&["api", "jobs", "retrieve"]))
            .json(&RetrieveRequest { limit });

        self.send(request, "Failed to retrieve jobs").await
    }

    async fn jobs(&self, request: &JobPageRequest) -> Result<JobPage, AppError> {
        debug!("GET /api/jobs {:?}", request);
        let http = self
            .client
            .get(self.endpoint(&["api", "jobs"]))
            .query(&request.query_pairs());

        self.send(http, "Failed to fetch jobs").await
    }

    async fn job_count(&self) -> Result<u64, AppError> {
        debug!("GET /api/jobs/count");
        let request = self.client.get(self.endpoint(&["api", "jobs", "count"]));

        let response: JobCountResponse = self.send(request, "Failed to get jobs count").await?;
        Ok(response.total_jobs)
    }

    async fn health(&self) -> Result<HealthStatus, AppError> {
        let request = self.client.get(self.endpoint(&["health"]));
        self.send(request, "Service is unreachable").await
    }
}
