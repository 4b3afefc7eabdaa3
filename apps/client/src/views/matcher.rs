//! Job matcher: scored matches for one profile, presented by tier.

use tracing::warn;

use crate::api_client::PortalApi;
use crate::errors::AppError;
use crate::matching::{rank_for_display, summarize, MatchSummary};
use crate::models::MatchResult;
use crate::views::{settle, Latest};

#[derive(Default)]
pub struct JobMatcher {
    results: Latest<(String, Vec<MatchResult>)>,
}

impl JobMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find(&mut self, api: &dyn PortalApi, profile_id: &str) -> Result<bool, AppError> {
        let profile_id = required_profile_id(profile_id)?;
        let ticket = self.results.begin();
        let result = api.matches(profile_id).await.map(|matches| {
            let outside = matches.iter().filter(|m| !m.scores_in_range()).count();
            if outside > 0 {
                warn!("{outside} matches for {profile_id} have scores outside 0..=1");
            }
            (profile_id.to_string(), matches)
        });
        settle(&mut self.results, ticket, result)
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.results.get().map(|(id, _)| id.as_str())
    }

    pub fn results(&self) -> &[MatchResult] {
        self.results
            .get()
            .map(|(_, matches)| matches.as_slice())
            .unwrap_or_default()
    }

    pub fn ranked(&self) -> Vec<&MatchResult> {
        rank_for_display(self.results())
    }

    pub fn summary(&self) -> MatchSummary {
        summarize(self.results())
    }
}

pub(crate) fn required_profile_id(raw: &str) -> Result<&str, AppError> {
    let id = raw.trim();
    if id.is_empty() {
        Err(AppError::validation("Please enter a profile ID"))
    } else {
        Ok(id)
    }
}
