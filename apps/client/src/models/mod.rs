pub mod job;
pub mod matching;
pub mod user;
pub mod volunteer;
pub mod wire;

pub use job::JobRecord;
pub use matching::{MatchResult, SkillGap};
pub use user::{Principal, Role};
pub use volunteer::{
    Availability, AvailabilitySlot, DayPreference, SkillEntry, SlotStatus, TimePreference,
    VolunteerProfile, DEFAULT_HOURS_PER_WEEK,
};
