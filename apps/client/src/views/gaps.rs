//! Skill-gap recommendations for one profile.

use crate::api_client::{PortalApi, SkillGapReport};
use crate::errors::AppError;
use crate::matching::{rank_skill_gaps, RankedGap};
use crate::views::matcher::required_profile_id;
use crate::views::{settle, Latest};

pub struct SkillGapView {
    report: Latest<SkillGapReport>,
    limit: u32,
}

impl SkillGapView {
    pub fn new(limit: u32) -> Self {
        Self {
            report: Latest::new(),
            limit,
        }
    }

    pub async fn load(&mut self, api: &dyn PortalApi, profile_id: &str) -> Result<bool, AppError> {
        let profile_id = required_profile_id(profile_id)?;
        let ticket = self.report.begin();
        let result = api.skill_gaps(profile_id, self.limit).await;
        settle(&mut self.report, ticket, result)
    }

    pub fn report(&self) -> Option<&SkillGapReport> {
        self.report.get()
    }

    pub fn ranked(&self) -> Vec<RankedGap> {
        self.report
            .get()
            .map(|report| rank_skill_gaps(&report.top_gaps))
            .unwrap_or_default()
    }
}
