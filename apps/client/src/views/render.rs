//! Plain-text presentation helpers shared by the CLI views.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::api_client::UploadOutcome;
use crate::matching::{breakdown, tier_of, DimensionScore, MatchSummary, MatchTier, RankedGap};
use crate::models::{JobRecord, MatchResult, VolunteerProfile};
use crate::stats::{score_percent, DerivedStats, VolunteerStats};

pub const LISTING_EXCERPT: usize = 120;
pub const DETAIL_EXCERPT: usize = 200;
pub const NOT_SPECIFIED: &str = "Not specified";

const BAR_WIDTH: usize = 20;

/// Cuts `text` to `max` characters and marks the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn or_not_specified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map_or_else(
        || NOT_SPECIFIED.to_string(),
        |d| d.format("%b %-d, %Y").to_string(),
    )
}

/// Horizontal bar for a proportion in [0, 1].
pub fn bar(proportion: f64) -> String {
    let filled = if proportion.is_nan() {
        0
    } else {
        (proportion.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    };
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn tier_badge(tier: MatchTier) -> String {
    format!("{} ({})", tier.label(), tier.color())
}

pub fn dimension_line(score: &DimensionScore) -> String {
    format!(
        "{:<13}{} {:>3}%",
        score.label,
        bar(f64::from(score.percent) / 100.0),
        score.percent
    )
}

// Cards. Writing into a String is infallible.

pub fn job_card(job: &JobRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", job.display_title());
    let _ = writeln!(
        out,
        "  Organization: {}",
        or_not_specified(job.organization.as_deref())
    );
    let _ = writeln!(out, "  Location: {}", or_not_specified(job.location.as_deref()));
    if let Some(commitment) = job.time_commitment.as_deref().filter(|c| !c.trim().is_empty()) {
        let _ = writeln!(out, "  Commitment: {}", commitment.trim());
    }
    if !job.skills_required.is_empty() {
        let _ = writeln!(out, "  Skills: {}", job.skills_required.join(", "));
    }
    if let Some(description) = job.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "  {}", truncate(description.trim(), LISTING_EXCERPT));
    }
    if let Some(website) = job.website.as_deref() {
        let _ = writeln!(out, "  {website}");
    }
    out
}

pub fn ranking(title: &str, entries: &[(String, usize)]) -> String {
    let mut out = format!("{title}:");
    if entries.is_empty() {
        out.push_str(" none");
    }
    for (value, count) in entries {
        let _ = write!(out, "\n  {value} ({count})");
    }
    out
}

pub fn job_stats(stats: &DerivedStats, total_on_server: u64) -> String {
    let quality = stats.quality();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Showing {} jobs ({} stored). {} with skills, {} without.",
        stats.total,
        total_on_server,
        stats.with_skills,
        stats.without_skills()
    );
    let _ = writeln!(
        out,
        "Data quality: skills {}%, location {}%, description {}%",
        quality.skills_pct, quality.location_pct, quality.description_pct
    );
    let _ = writeln!(out, "{}", ranking("Top skills", &stats.top_skills));
    let _ = writeln!(
        out,
        "{}",
        ranking("Top organizations", &stats.top_organizations)
    );
    out
}

pub fn match_summary(summary: &MatchSummary) -> String {
    format!(
        "{} matches, average {}%. Excellent: {}. Below good: {}.",
        summary.count, summary.average_percent, summary.excellent_count, summary.below_good_count
    )
}

pub fn match_card(result: &MatchResult) -> String {
    let mut out = String::new();
    let job = &result.job;
    let _ = writeln!(
        out,
        "{}  {}% {}",
        job.display_title(),
        score_percent(result.match_score),
        tier_badge(tier_of(result))
    );
    let _ = writeln!(
        out,
        "  {} | {}",
        or_not_specified(job.organization.as_deref()),
        or_not_specified(job.location.as_deref())
    );
    for dimension in breakdown(result) {
        let _ = writeln!(out, "  {}", dimension_line(&dimension));
    }
    for reason in &result.reasons {
        let _ = writeln!(out, "  - {reason}");
    }
    if let Some(description) = job.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "  {}", truncate(description.trim(), DETAIL_EXCERPT));
    }
    out
}

pub fn gap_line(gap: &RankedGap) -> String {
    let mut line = format!("{:<24}{} {}", gap.skill, bar(gap.proportion), gap.demand);
    if let Some(suggestion) = gap.suggestion.as_deref() {
        let _ = write!(line, "\n    {suggestion}");
    }
    line
}

pub fn volunteer_card(profile: &VolunteerProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>  [{}]", profile.name, profile.email, profile.id);
    let _ = writeln!(
        out,
        "  Location: {}",
        or_not_specified(profile.location.as_deref())
    );
    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        let _ = writeln!(out, "  Phone: {}", phone.trim());
    }
    let skills: Vec<&str> = profile.skill_names().collect();
    if !skills.is_empty() {
        let _ = writeln!(out, "  Skills: {}", skills.join(", "));
    }
    if !profile.interests.is_empty() {
        let interests: Vec<&str> = profile.interests.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  Interests: {}", interests.join(", "));
    }
    for slot in &profile.availability {
        let _ = writeln!(out, "  Available: {slot}");
    }
    let _ = writeln!(
        out,
        "  Uploaded by {} on {}",
        or_not_specified(profile.uploaded_by.as_deref()),
        format_date(profile.created_at.as_ref())
    );
    out
}

pub fn volunteer_stats(stats: &VolunteerStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} volunteers. {} with skills, {} with a CV, {} with availability.",
        stats.base.total, stats.base.with_skills, stats.with_cv, stats.with_availability
    );
    let _ = writeln!(out, "{}", ranking("Top skills", &stats.base.top_skills));
    out
}

pub fn upload_outcome(outcome: &UploadOutcome) -> String {
    let mut out = format!("Profile ID: {}", outcome.profile_id);
    if !outcome.message.is_empty() {
        let _ = write!(out, "\n{}", outcome.message);
    }
    if !outcome.extracted_skills.is_empty() {
        let _ = write!(
            out,
            "\nExtracted skills: {}",
            outcome.extracted_skills.join(", ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 120), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("éléphant", 2), "él...");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(or_not_specified(None), "Not specified");
        assert_eq!(or_not_specified(Some("  ")), "Not specified");
        assert_eq!(or_not_specified(Some(" Berlin ")), "Berlin");
        assert_eq!(format_date(None), "Not specified");
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(format_date(Some(&date)), "Mar 5, 2024");
    }

    #[test]
    fn test_job_card_uses_fallbacks_and_excerpt() {
        let job: JobRecord = serde_json::from_value(serde_json::json!({
            "_id": "1",
            "title": "",
            "description": "x".repeat(300),
        }))
        .unwrap();
        let card = job_card(&job);
        assert!(card.starts_with("Untitled Position\n"));
        assert!(card.contains("Organization: Not specified"));
        assert!(card.contains(&format!("{}...", "x".repeat(120))));
        assert!(!card.contains(&"x".repeat(121)));
    }

    #[test]
    fn test_ranking_lists_entries_in_order() {
        let entries = vec![("Python".to_string(), 2), ("SQL".to_string(), 1)];
        assert_eq!(
            ranking("Top skills", &entries),
            "Top skills:\n  Python (2)\n  SQL (1)"
        );
        assert_eq!(ranking("Top skills", &[]), "Top skills: none");
    }

    #[test]
    fn test_bar_width_is_fixed() {
        assert_eq!(bar(0.0), "....................");
        assert_eq!(bar(1.0), "####################");
        assert_eq!(bar(0.5).matches('#').count(), 10);
        assert_eq!(bar(f64::NAN).len(), 20);
        assert_eq!(bar(3.0).len(), 20);
    }
}
