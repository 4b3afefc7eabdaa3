//! Job retrieval from the external feed (operator view).

use tracing::{info, warn};

use crate::api_client::{JobRetrieval, PortalApi};
use crate::errors::AppError;
use crate::views::Notice;

pub struct JobRetriever {
    limit: u32,
}

impl JobRetriever {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// Runs one retrieval. A successful run may still carry per-item errors; those come
    /// back as warnings next to the success notice.
    pub async fn run(&self, api: &dyn PortalApi) -> Result<(JobRetrieval, Vec<Notice>), AppError> {
        let retrieval = api.retrieve_jobs(self.limit).await?;
        if !retrieval.success {
            let message = if retrieval.message.trim().is_empty() {
                "Failed to retrieve jobs".to_string()
            } else {
                retrieval.message.clone()
            };
            return Err(AppError::remote(None, message));
        }

        info!(
            "Retrieved {} jobs, stored {} ({} warnings)",
            retrieval.jobs_retrieved,
            retrieval.jobs_stored,
            retrieval.errors.len()
        );
        let notices = notices_for(&retrieval);
        Ok((retrieval, notices))
    }
}

pub fn notices_for(retrieval: &JobRetrieval) -> Vec<Notice> {
    let headline = if retrieval.message.trim().is_empty() {
        format!(
            "Retrieved {} jobs, stored {}",
            retrieval.jobs_retrieved, retrieval.jobs_stored
        )
    } else {
        retrieval.message.clone()
    };

    let mut notices = vec![Notice::Success(headline)];
    for error in &retrieval.errors {
        warn!("Retrieval reported: {error}");
        notices.push(Notice::Info(error.clone()));
    }
    notices
}
