use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::JobRecord;

/// Distinct, sorted values for populating filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub skills: Vec<String>,
    pub organizations: Vec<String>,
}

impl FilterOptions {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let mut locations = BTreeSet::new();
        let mut skills = BTreeSet::new();
        let mut organizations = BTreeSet::new();

        for job in jobs {
            insert_trimmed(&mut locations, job.location.as_deref());
            insert_trimmed(&mut organizations, job.organization.as_deref());
            for skill in &job.skills_required {
                insert_trimmed(&mut skills, Some(skill));
            }
        }

        Self {
            locations: locations.into_iter().collect(),
            skills: skills.into_iter().collect(),
            organizations: organizations.into_iter().collect(),
        }
    }
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        set.insert(v.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_are_distinct_sorted_and_skip_blanks() {
        let jobs: Vec<JobRecord> = serde_json::from_value(json!([
            {"_id": "1", "title": "a", "location": "Paris", "organization": "Red Cross",
             "skills_required": ["SQL", "Python", " "]},
            {"_id": "2", "title": "b", "location": " Berlin ", "organization": "",
             "skills_required": ["Python"]},
            {"_id": "3", "title": "c", "location": null},
        ]))
        .unwrap();

        let options = FilterOptions::from_jobs(&jobs);
        assert_eq!(options.locations, vec!["Berlin", "Paris"]);
        assert_eq!(options.skills, vec!["Python", "SQL"]);
        assert_eq!(options.organizations, vec!["Red Cross"]);
    }
}
