//! View controllers. Each one is thin glue between the access gate, the remote API and the
//! pure core, and is handed its collaborators explicitly.

pub mod auth;
pub mod gaps;
pub mod jobs;
pub mod latest;
pub mod matcher;
pub mod render;
pub mod retriever;
pub mod upload;
pub mod volunteers;

use std::fmt;

use tracing::debug;

use crate::errors::AppError;

pub use latest::{Latest, RequestSequencer, RequestTicket};

/// A dismissible message shown at the view boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn from_error(error: &AppError) -> Self {
        Notice::Error(error.user_message())
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Success(s) | Notice::Info(s) | Notice::Warning(s) | Notice::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Notice::Success(_) => "ok",
            Notice::Info(_) => "info",
            Notice::Warning(_) => "warning",
            Notice::Error(_) => "error",
        };
        write!(f, "[{prefix}] {}", self.text())
    }
}

/// Applies a finished fetch to `slot`.
///
/// Superseded outcomes are dropped, failures included, and reported as `Ok(false)`.
pub(crate) fn settle<T>(
    slot: &mut Latest<T>,
    ticket: RequestTicket,
    result: Result<T, AppError>,
) -> Result<bool, AppError> {
    if !slot.is_current(ticket) {
        debug!("Dropping outcome of superseded request #{}", ticket.seq());
        return Ok(false);
    }
    let value = result?;
    Ok(slot.complete(ticket, value))
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-process [`PortalApi`] with canned responses and a call log.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::access::VolunteerScope;
    use crate::api_client::{
        CvUpload, HealthStatus, JobPage, JobPageRequest, JobRetrieval, PortalApi,
        SkillGapReport, UploadOutcome,
    };
    use crate::errors::AppError;
    use crate::models::{MatchResult, Principal, VolunteerProfile};

    #[derive(Default)]
    pub struct FakeApi {
        pub principal: Option<Principal>,
        pub page: JobPage,
        pub matches: Vec<MatchResult>,
        pub gaps: SkillGapReport,
        pub profiles: Vec<VolunteerProfile>,
        pub retrieval: JobRetrieval,
        pub upload: Option<UploadOutcome>,
        pub fail_with: Option<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn record(&self, call: impl Into<String>) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(call.into());
            match &self.fail_with {
                Some(message) => Err(AppError::remote(Some(500), message.clone())),
                None => Ok(()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PortalApi for FakeApi {
        async fn login(&self, username: &str, _password: &str) -> Result<Principal, AppError> {
            self.record(format!("login {username}"))?;
            self.principal
                .clone()
                .ok_or_else(|| AppError::remote(Some(200), "Invalid credentials"))
        }

        async fn signup(
            &self,
            username: &str,
            _password: &str,
            _email: &str,
        ) -> Result<(), AppError> {
            self.record(format!("signup {username}"))
        }

        async fn upload_cv(&self, upload: &CvUpload) -> Result<UploadOutcome, AppError> {
            self.record(format!("upload {}", upload.file_name))?;
            self.upload
                .clone()
                .ok_or_else(|| AppError::remote(Some(500), "Error uploading CV"))
        }

        async fn matches(&self, profile_id: &str) -> Result<Vec<MatchResult>, AppError> {
            self.record(format!("matches {profile_id}"))?;
            Ok(self.matches.clone())
        }

        async fn skill_gaps(
            &self,
            profile_id: &str,
            limit: u32,
        ) -> Result<SkillGapReport, AppError> {
            self.record(format!("gaps {profile_id} {limit}"))?;
            Ok(self.gaps.clone())
        }

        async fn volunteers(
            &self,
            scope: &VolunteerScope,
        ) -> Result<Vec<VolunteerProfile>, AppError> {
            self.record(format!("volunteers {} {}", scope.user_role, scope.username))?;
            Ok(self.profiles.clone())
        }

        async fn delete_volunteer(&self, id: &str) -> Result<(), AppError> {
            self.record(format!("delete {id}"))
        }

        async fn retrieve_jobs(&self, limit: u32) -> Result<JobRetrieval, AppError> {
            self.record(format!("retrieve {limit}"))?;
            Ok(self.retrieval.clone())
        }

        async fn jobs(&self, request: &JobPageRequest) -> Result<JobPage, AppError> {
            self.record(format!("jobs {}", request.limit))?;
            Ok(self.page.clone())
        }

        async fn job_count(&self) -> Result<u64, AppError> {
            self.record("count")?;
            Ok(self.page.total)
        }

        async fn health(&self) -> Result<HealthStatus, AppError> {
            self.record("health")?;
            Ok(HealthStatus {
                status: "healthy".to_string(),
                details: Default::default(),
            })
        }
    }
}
