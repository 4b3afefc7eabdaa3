//! CV upload form. Everything is checked locally before the file is read or sent.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::api_client::{CvUpload, PortalApi, UploadOutcome};
use crate::errors::AppError;
use crate::models::{Availability, Principal};

const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

#[derive(Debug, Clone, Default)]
pub struct CvUploadForm {
    pub file: Option<PathBuf>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub availability: Availability,
}

impl CvUploadForm {
    /// Checks the form against the current session. Returns the uploader's username.
    pub fn validate<'p>(&self, principal: Option<&'p Principal>) -> Result<&'p str, AppError> {
        let Some(file) = self.file.as_deref() else {
            return Err(AppError::validation("Please select a CV file"));
        };
        let Some(principal) = principal else {
            return Err(AppError::validation("Please login to upload CV"));
        };
        if !has_accepted_extension(file) {
            return Err(AppError::validation(
                "Only PDF, DOCX and TXT files are supported",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Please enter your name"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        if !phone_is_plausible(&self.phone) {
            return Err(AppError::validation(
                "Please enter a valid phone number (10-15 digits)",
            ));
        }
        Ok(principal.username.as_str())
    }

    /// Validates, reads the file and builds the multipart payload.
    pub async fn prepare(&self, principal: Option<&Principal>) -> Result<CvUpload, AppError> {
        let uploaded_by = self.validate(principal)?;
        let Some(path) = self.file.as_deref() else {
            return Err(AppError::validation("Please select a CV file"));
        };

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::validation(format!("Could not read {}: {e}", path.display()))
        })?;
        if bytes.is_empty() {
            return Err(AppError::validation("The selected CV file is empty"));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv".to_string());

        Ok(CvUpload {
            file_name,
            bytes,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            location: self.location.trim().to_string(),
            uploaded_by: uploaded_by.to_string(),
            availability: self.availability.clone(),
        })
    }

    pub async fn submit(
        &self,
        api: &dyn PortalApi,
        principal: Option<&Principal>,
    ) -> Result<UploadOutcome, AppError> {
        let upload = self.prepare(principal).await?;
        let outcome = api.upload_cv(&upload).await?;
        info!(
            "Uploaded {} as profile {} ({} skills extracted)",
            upload.file_name,
            outcome.profile_id,
            outcome.extracted_skills.len()
        );
        Ok(outcome)
    }
}

fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Blank is fine; otherwise 10 to 15 characters of digits and phone punctuation.
fn phone_is_plausible(phone: &str) -> bool {
    let phone = phone.trim();
    phone.is_empty()
        || ((10..=15).contains(&phone.chars().count())
            && phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')')))
}
