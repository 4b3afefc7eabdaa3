use serde::{Deserialize, Serialize};

use crate::models::job::JobRecord;
use crate::models::wire::null_as_default;

/// A scored (profile, job) pairing produced by the remote matching service.
/// All five scores are expected in [0, 1]; the weighting behind `match_score` is not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: JobRecord,
    pub match_score: f64,
    #[serde(default)]
    pub skill_match: f64,
    #[serde(default)]
    pub location_match: f64,
    #[serde(default)]
    pub availability_match: f64,
    #[serde(default)]
    pub interest_match: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: Vec<String>,
}

impl MatchResult {
    pub fn dimensions(&self) -> [(&'static str, f64); 4] {
        [
            ("Skills", self.skill_match),
            ("Location", self.location_match),
            ("Availability", self.availability_match),
            ("Interest", self.interest_match),
        ]
    }

    pub fn scores_in_range(&self) -> bool {
        std::iter::once(self.match_score)
            .chain(self.dimensions().into_iter().map(|(_, v)| v))
            .all(|v| (0.0..=1.0).contains(&v))
    }
}

/// A skill in demand across jobs but absent from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub demand: u32,
    #[serde(default)]
    pub suggestion: Option<String>,
}
