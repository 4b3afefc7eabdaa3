use crate::filter::{Criterion, FilterPipeline, Selector};
use crate::models::{JobRecord, VolunteerProfile};

/// Job board criteria. `search` spans title, organization and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub search: String,
    pub location: String,
    pub skill: String,
    pub organization: String,
}

impl JobQuery {
    pub fn pipeline(&self) -> FilterPipeline<JobRecord> {
        FilterPipeline::new()
            .with(
                Criterion::new("search", &self.search)
                    .on(Selector::Text(|j: &JobRecord| Some(j.title.as_str())))
                    .on(Selector::Text(|j: &JobRecord| j.organization.as_deref()))
                    .on(Selector::Text(|j: &JobRecord| j.description.as_deref())),
            )
            .with(
                Criterion::new("location", &self.location)
                    .on(Selector::Text(|j: &JobRecord| j.location.as_deref())),
            )
            .with(Criterion::new("skill", &self.skill).on(Selector::Each(|j: &JobRecord| {
                j.skills_required.iter().map(String::as_str).collect()
            })))
            .with(
                Criterion::new("organization", &self.organization)
                    .on(Selector::Text(|j: &JobRecord| j.organization.as_deref())),
            )
    }

    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        self.pipeline().apply(jobs)
    }
}

/// Volunteer listing criteria. `search` spans name and email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerQuery {
    pub search: String,
    pub location: String,
    pub skill: String,
    pub interest: String,
}

impl VolunteerQuery {
    pub fn pipeline(&self) -> FilterPipeline<VolunteerProfile> {
        FilterPipeline::new()
            .with(
                Criterion::new("search", &self.search)
                    .on(Selector::Text(|v: &VolunteerProfile| Some(v.name.as_str())))
                    .on(Selector::Text(|v: &VolunteerProfile| Some(v.email.as_str()))),
            )
            .with(
                Criterion::new("location", &self.location)
                    .on(Selector::Text(|v: &VolunteerProfile| v.location.as_deref())),
            )
            .with(
                Criterion::new("skill", &self.skill)
                    .on(Selector::Each(|v: &VolunteerProfile| v.skill_names().collect())),
            )
            .with(
                Criterion::new("interest", &self.interest).on(Selector::Each(
                    |v: &VolunteerProfile| v.interests.iter().map(String::as_str).collect(),
                )),
            )
    }

    pub fn apply<'a>(&self, profiles: &'a [VolunteerProfile]) -> Vec<&'a VolunteerProfile> {
        self.pipeline().apply(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job(title: &str, org: Option<&str>, location: Option<&str>, skills: &[&str]) -> JobRecord {
        serde_json::from_value(json!({
            "_id": title,
            "title": title,
            "organization": org,
            "location": location,
            "skills_required": skills,
        }))
        .unwrap()
    }

    fn jobs() -> Vec<JobRecord> {
        vec![
            job("Teacher Assistant", Some("City School"), Some("Berlin"), &["Teaching"]),
            job("Data Entry", Some("Food Bank"), Some("Hamburg"), &["Excel", "Typing"]),
            job("Tutor", Some("Teach For All"), None, &[]),
        ]
    }

    #[test]
    fn test_search_teach_scenario() {
        let jobs = vec![
            job("Teacher Assistant", None, None, &[]),
            job("Data Entry", None, None, &[]),
        ];
        let query = JobQuery {
            search: "teach".to_string(),
            ..Default::default()
        };
        let out = query.apply(&jobs);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Teacher Assistant");
    }

    #[test]
    fn test_search_spans_organization() {
        let jobs = jobs();
        let query = JobQuery {
            search: "TEACH".to_string(),
            ..Default::default()
        };
        let titles: Vec<_> = query.apply(&jobs).iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Teacher Assistant", "Tutor"]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let jobs = jobs();
        let out = JobQuery::default().apply(&jobs);
        assert_eq!(out.len(), jobs.len());
        assert!(out.iter().zip(&jobs).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let jobs = jobs();
        let query = JobQuery {
            location: "berlin".to_string(),
            skill: "excel".to_string(),
            ..Default::default()
        };
        assert!(query.apply(&jobs).is_empty());

        let query = JobQuery {
            location: "ham".to_string(),
            skill: "typ".to_string(),
            ..Default::default()
        };
        assert_eq!(query.apply(&jobs).len(), 1);
    }

    #[test]
    fn test_location_criterion_drops_jobs_without_location() {
        let jobs = jobs();
        let query = JobQuery {
            location: "r".to_string(),
            ..Default::default()
        };
        let titles: Vec<_> = query.apply(&jobs).iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Teacher Assistant", "Data Entry"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let jobs = jobs();
        let query = JobQuery {
            search: "a".to_string(),
            skill: "t".to_string(),
            ..Default::default()
        };
        let once: Vec<JobRecord> = query.apply(&jobs).into_iter().cloned().collect();
        let twice: Vec<JobRecord> = query.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_volunteer_query_matches_skills_and_interests() {
        let profiles: Vec<VolunteerProfile> = serde_json::from_value(json!([
            {"_id": "1", "name": "Ada", "email": "ada@example.org",
             "skills": [{"name": "Python", "level": "expert"}], "interests": ["education"]},
            {"_id": "2", "name": "Bob", "email": "bob@example.org",
             "skills": [], "interests": ["health"], "location": "Berlin"},
        ]))
        .unwrap();

        let by_skill = VolunteerQuery {
            skill: "py".to_string(),
            ..Default::default()
        };
        assert_eq!(by_skill.apply(&profiles)[0].name, "Ada");

        let by_interest_and_location = VolunteerQuery {
            interest: "heal".to_string(),
            location: "berl".to_string(),
            ..Default::default()
        };
        assert_eq!(by_interest_and_location.apply(&profiles)[0].name, "Bob");

        let by_email = VolunteerQuery {
            search: "ADA@".to_string(),
            ..Default::default()
        };
        assert_eq!(by_email.apply(&profiles).len(), 1);
    }
}
