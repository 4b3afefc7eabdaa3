//! Aggregation engine: one pass over a record collection producing coverage counts,
//! top-N frequency rankings and quality percentages. Results are derived on demand and
//! never cached across a refresh of the underlying collection.

pub mod frequency;
pub mod quality;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{JobRecord, VolunteerProfile};

pub use frequency::{top_n, FrequencyTable};
pub use quality::{percentage, score_percent, QualityMetrics};

/// Size of the `top_skills` / `top_organizations` rankings.
pub const TOP_N: usize = 5;

/// How repeated values inside a single record feed the frequency tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Every occurrence counts, duplicates within one record included.
    #[default]
    EveryOccurrence,
    /// At most one count per (record, value).
    PerRecord,
}

/// Read access to the fields the aggregation engine inspects.
pub trait StatsSource {
    fn skill_values(&self) -> Vec<&str>;
    fn location(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn organization(&self) -> Option<&str>;
}

impl StatsSource for JobRecord {
    fn skill_values(&self) -> Vec<&str> {
        self.skills_required.iter().map(String::as_str).collect()
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }
}

/// Profiles carry no description or organization; those metrics read as zero.
impl StatsSource for VolunteerProfile {
    fn skill_values(&self) -> Vec<&str> {
        self.skill_names().collect()
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn organization(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub total: usize,
    pub with_skills: usize,
    pub with_location: usize,
    pub with_description: usize,
    pub top_skills: Vec<(String, usize)>,
    pub top_organizations: Vec<(String, usize)>,
}

impl DerivedStats {
    pub fn without_skills(&self) -> usize {
        self.total - self.with_skills
    }

    pub fn quality(&self) -> QualityMetrics {
        QualityMetrics {
            skills_pct: percentage(self.with_skills, self.total),
            location_pct: percentage(self.with_location, self.total),
            description_pct: percentage(self.with_description, self.total),
        }
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn aggregate<'a, T, I>(records: I, mode: CountMode) -> DerivedStats
where
    T: StatsSource + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut stats = DerivedStats::default();
    let mut skills = FrequencyTable::new();
    let mut organizations = FrequencyTable::new();

    for record in records {
        stats.total += 1;

        let values = record.skill_values();
        if !values.is_empty() {
            stats.with_skills += 1;
        }
        if has_text(record.location()) {
            stats.with_location += 1;
        }
        if has_text(record.description()) {
            stats.with_description += 1;
        }

        let mut seen = HashSet::new();
        for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
            if mode == CountMode::PerRecord && !seen.insert(value) {
                continue;
            }
            skills.record(value);
        }

        if let Some(org) = record.organization().map(str::trim).filter(|o| !o.is_empty()) {
            organizations.record(org);
        }
    }

    stats.top_skills = top_n(&skills, TOP_N);
    stats.top_organizations = top_n(&organizations, TOP_N);
    stats
}

/// Volunteer-specific coverage on top of the shared [`DerivedStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolunteerStats {
    pub base: DerivedStats,
    pub with_cv: usize,
    pub with_availability: usize,
}

pub fn aggregate_volunteers<'a, I>(profiles: I, mode: CountMode) -> VolunteerStats
where
    I: IntoIterator<Item = &'a VolunteerProfile>,
{
    let profiles: Vec<&VolunteerProfile> = profiles.into_iter().collect();
    VolunteerStats {
        base: aggregate(profiles.iter().copied(), mode),
        with_cv: profiles
            .iter()
            .filter(|p| has_text(p.cv_filename.as_deref()))
            .count(),
        with_availability: profiles.iter().filter(|p| !p.availability.is_empty()).count(),
    }
}
