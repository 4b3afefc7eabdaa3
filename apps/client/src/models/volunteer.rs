use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::wire::{lenient_timestamp, null_as_default};

/// Day names indexed by `day_of_week` (0 = Monday).
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default)]
    pub years_experience: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    Available,
    Tentative,
    Busy,
    /// Any status this client does not know yet. Keeps the rest of the listing readable.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: SlotStatus,
}

impl AvailabilitySlot {
    /// Builds a validated slot: day in 0..=6, `HH:MM` times, start strictly before end.
    pub fn new(
        day_of_week: u8,
        start_time: &str,
        end_time: &str,
        status: SlotStatus,
    ) -> Result<Self, AppError> {
        if usize::from(day_of_week) >= WEEKDAYS.len() {
            return Err(AppError::validation(format!(
                "Day of week must be between 0 and 6, got {day_of_week}"
            )));
        }
        let start = parse_clock(start_time)?;
        let end = parse_clock(end_time)?;
        if start >= end {
            return Err(AppError::validation(format!(
                "Availability must end after it starts ({start_time}-{end_time})"
            )));
        }
        Ok(Self {
            day_of_week,
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            status,
        })
    }

    pub fn weekday(&self) -> &'static str {
        WEEKDAYS
            .get(usize::from(self.day_of_week))
            .copied()
            .unwrap_or("Unknown")
    }
}

fn parse_clock(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| AppError::validation(format!("'{raw}' is not a valid HH:MM time")))
}

fn parse_weekday(raw: &str) -> Option<u8> {
    let raw = raw.trim().to_ascii_lowercase();
    if let Ok(index) = raw.parse::<u8>() {
        return Some(index);
    }
    if raw.len() < 3 {
        return None;
    }
    WEEKDAYS
        .iter()
        .position(|day| day.to_ascii_lowercase().starts_with(&raw))
        .and_then(|i| u8::try_from(i).ok())
}

/// Parses `DAY=HH:MM-HH:MM[/tentative|/busy]`, e.g. `sat=10:00-14:00` or
/// `2=09:00-12:00/tentative`.
impl FromStr for AvailabilitySlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("Invalid availability '{s}'"));

        let (day, rest) = s.split_once('=').ok_or_else(invalid)?;
        let (range, status) = match rest.split_once('/') {
            Some((range, "tentative")) => (range, SlotStatus::Tentative),
            Some((range, "available")) => (range, SlotStatus::Available),
            Some((range, "busy")) => (range, SlotStatus::Busy),
            Some(_) => return Err(invalid()),
            None => (rest, SlotStatus::Available),
        };
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let day = parse_weekday(day).ok_or_else(invalid)?;

        AvailabilitySlot::new(day, start, end, status)
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.weekday(), self.start_time, self.end_time)?;
        match self.status {
            SlotStatus::Available => Ok(()),
            SlotStatus::Tentative => f.write_str(" (tentative)"),
            SlotStatus::Busy => f.write_str(" (busy)"),
            SlotStatus::Unknown => f.write_str(" (status unknown)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPreference {
    Weekdays,
    #[default]
    Weekends,
    Flexible,
}

impl FromStr for DayPreference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekdays" => Ok(DayPreference::Weekdays),
            "weekends" => Ok(DayPreference::Weekends),
            "flexible" => Ok(DayPreference::Flexible),
            other => Err(AppError::validation(format!(
                "Preferred days must be weekdays, weekends or flexible, got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Flexible,
}

impl FromStr for TimePreference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "evening" => Ok(TimePreference::Evening),
            "flexible" => Ok(TimePreference::Flexible),
            other => Err(AppError::validation(format!(
                "Time preference must be morning, afternoon, evening or flexible, got '{other}'"
            ))),
        }
    }
}

pub const DEFAULT_HOURS_PER_WEEK: u32 = 10;
const HOURS_IN_WEEK: u32 = 168;

/// Availability submitted with a CV: an explicit weekly schedule, or a rough monthly commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Availability {
    Weekly {
        schedule: Vec<AvailabilitySlot>,
    },
    #[serde(rename_all = "camelCase")]
    Monthly {
        hours_per_week: u32,
        preferred_days: DayPreference,
        time_preference: TimePreference,
    },
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Weekly {
            schedule: Vec::new(),
        }
    }
}

impl Availability {
    pub fn weekly(schedule: Vec<AvailabilitySlot>) -> Self {
        Availability::Weekly { schedule }
    }

    pub fn monthly(
        hours_per_week: u32,
        preferred_days: DayPreference,
        time_preference: TimePreference,
    ) -> Result<Self, AppError> {
        if hours_per_week == 0 || hours_per_week > HOURS_IN_WEEK {
            return Err(AppError::validation(format!(
                "Hours per week must be between 1 and {HOURS_IN_WEEK}, got {hours_per_week}"
            )));
        }
        Ok(Availability::Monthly {
            hours_per_week,
            preferred_days,
            time_preference,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub cv_filename: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VolunteerProfile {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.uploaded_by.as_deref() == Some(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_slot_by_day_name() {
        let slot: AvailabilitySlot = "sat=10:00-14:00".parse().unwrap();
        assert_eq!(slot.day_of_week, 5);
        assert_eq!(slot.start_time, "10:00");
        assert_eq!(slot.status, SlotStatus::Available);
    }

    #[test]
    fn test_parse_slot_by_index_tentative() {
        let slot: AvailabilitySlot = "2=9:00-12:30/tentative".parse().unwrap();
        assert_eq!(slot.weekday(), "Wednesday");
        assert_eq!(slot.start_time, "09:00");
        assert_eq!(slot.status, SlotStatus::Tentative);
    }

    #[test]
    fn test_parse_slot_rejects_bad_input() {
        assert!("funday=10:00-11:00".parse::<AvailabilitySlot>().is_err());
        assert!("7=10:00-11:00".parse::<AvailabilitySlot>().is_err());
        assert!("mon=12:00-11:00".parse::<AvailabilitySlot>().is_err());
        assert!("mon=25:00-26:00".parse::<AvailabilitySlot>().is_err());
        assert!("mon 10:00-11:00".parse::<AvailabilitySlot>().is_err());
    }

    #[test]
    fn test_listing_survives_unfamiliar_slot_status() {
        let profiles: Vec<VolunteerProfile> = serde_json::from_value(json!([
            {
                "_id": "a",
                "name": "Ana",
                "availability": [
                    {
                        "day_of_week": 0,
                        "start_time": "09:00",
                        "end_time": "12:00",
                        "status": "busy"
                    },
                    {
                        "day_of_week": 1,
                        "start_time": "09:00",
                        "end_time": "12:00",
                        "status": "on_leave"
                    }
                ]
            },
            { "_id": "b", "name": "Ben" }
        ]))
        .unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].availability[0].status, SlotStatus::Busy);
        assert_eq!(profiles[0].availability[1].status, SlotStatus::Unknown);
        assert_eq!(profiles[0].availability[0].to_string(), "Monday 09:00-12:00 (busy)");
        assert_eq!(profiles[1].name, "Ben");
    }

    #[test]
    fn test_availability_wire_shapes() {
        let weekly = Availability::weekly(vec!["mon=09:00-12:00".parse().unwrap()]);
        let value = serde_json::to_value(&weekly).unwrap();
        assert_eq!(value["type"], "weekly");
        assert_eq!(value["schedule"][0]["day_of_week"], 0);

        let monthly =
            Availability::monthly(15, DayPreference::Weekdays, TimePreference::Evening).unwrap();
        assert_eq!(
            serde_json::to_value(&monthly).unwrap(),
            json!({
                "type": "monthly",
                "hoursPerWeek": 15,
                "preferredDays": "weekdays",
                "timePreference": "evening",
            })
        );
    }

    #[test]
    fn test_monthly_hours_are_bounded() {
        let (days, time) = (DayPreference::Flexible, TimePreference::Flexible);
        assert!(Availability::monthly(0, days, time).is_err());
        assert!(Availability::monthly(169, days, time).is_err());
        assert!(Availability::monthly(168, days, time).is_ok());
        assert_eq!("Weekends".parse::<DayPreference>().unwrap(), DayPreference::Weekends);
        assert!("sometimes".parse::<TimePreference>().is_err());
    }

    #[test]
    fn test_profile_tolerates_nulls() {
        let profile: VolunteerProfile = serde_json::from_value(json!({
            "_id": "abc",
            "name": "Ada",
            "email": "ada@example.org",
            "skills": [{"name": "Python", "level": "advanced"}],
            "interests": ["education", "education", "health"],
            "availability": null,
            "uploaded_by": "ada"
        }))
        .unwrap();

        assert_eq!(profile.interests.len(), 2);
        assert!(profile.availability.is_empty());
        assert!(profile.is_owned_by("ada"));
        assert!(!profile.is_owned_by("admin"));
        assert_eq!(profile.skill_names().collect::<Vec<_>>(), vec!["Python"]);
    }
}
