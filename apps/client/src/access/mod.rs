//! Access gate: decides which views a principal may open and which volunteer records a
//! listing may request. Pure functions of (view, principal); nothing here fails loudly.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Principal, Role, VolunteerProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    JobBoard,
    JobRetriever,
    CvUpload,
    JobMatcher,
    SkillGaps,
    Volunteers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTag {
    UserOnly,
    AdminOnly,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Login,
        View::JobBoard,
        View::JobRetriever,
        View::CvUpload,
        View::JobMatcher,
        View::SkillGaps,
        View::Volunteers,
    ];

    pub fn id(self) -> &'static str {
        match self {
            View::Login => "login",
            View::JobBoard => "jobs",
            View::JobRetriever => "retrieve",
            View::CvUpload => "upload",
            View::JobMatcher => "matches",
            View::SkillGaps => "gaps",
            View::Volunteers => "volunteers",
        }
    }

    pub fn from_id(id: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Login / Sign up",
            View::JobBoard => "Volunteer Opportunities",
            View::JobRetriever => "Job Management",
            View::CvUpload => "Upload CV",
            View::JobMatcher => "AI Job Matcher",
            View::SkillGaps => "Skill Gap Recommendations",
            View::Volunteers => "Volunteer Details",
        }
    }

    /// Retrieval from the external feed is an operator task; CV upload is a volunteer task.
    pub fn tag(self) -> Option<ViewTag> {
        match self {
            View::JobRetriever => Some(ViewTag::AdminOnly),
            View::CvUpload => Some(ViewTag::UserOnly),
            _ => None,
        }
    }
}

pub fn is_visible(view: View, principal: Option<&Principal>) -> bool {
    let Some(principal) = principal else {
        return view == View::Login;
    };
    if view == View::Login {
        return false;
    }
    match view.tag() {
        None => true,
        Some(ViewTag::UserOnly) => principal.role == Role::User,
        Some(ViewTag::AdminOnly) => principal.role == Role::Admin,
    }
}

/// Same as [`is_visible`] for a raw view id; unknown ids are never visible.
pub fn is_visible_id(id: &str, principal: Option<&Principal>) -> bool {
    View::from_id(id).is_some_and(|view| is_visible(view, principal))
}

/// Whether `view` must be narrowed to records the principal uploaded.
pub fn owned_records_only(view: View, principal: Option<&Principal>) -> bool {
    match view {
        View::Volunteers => principal.map_or(true, |p| p.role != Role::Admin),
        _ => false,
    }
}

pub fn visible_views(principal: Option<&Principal>) -> Vec<View> {
    View::ALL
        .into_iter()
        .filter(|view| is_visible(*view, principal))
        .collect()
}

/// Gate check for code paths that need a `Result`. Callers turn `Forbidden` into
/// "not rendered"; it is never shown as an error to the principal.
pub fn authorize(view: View, principal: Option<&Principal>) -> Result<(), AppError> {
    if is_visible(view, principal) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Record scope for the volunteer listing, forwarded to the store as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerScope {
    pub user_role: Role,
    pub username: String,
    owned_only: bool,
}

impl VolunteerScope {
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            user_role: principal.role,
            username: principal.username.clone(),
            owned_only: owned_records_only(View::Volunteers, Some(principal)),
        }
    }

    /// Decided once by [`owned_records_only`] when the scope is built.
    pub fn owned_only(&self) -> bool {
        self.owned_only
    }

    pub fn permits(&self, profile: &VolunteerProfile) -> bool {
        !self.owned_only || profile.is_owned_by(&self.username)
    }

    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("user_role", self.user_role.as_str()),
            ("username", self.username.as_str()),
        ]
    }
}
