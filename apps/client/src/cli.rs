//! Command-line surface. Each command maps onto one view and is gated before it runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::access::{visible_views, View};
use crate::errors::AppError;
use crate::filter::{JobQuery, VolunteerQuery};
use crate::models::{
    Availability, AvailabilitySlot, DayPreference, TimePreference, DEFAULT_HOURS_PER_WEEK,
};
use crate::state::AppContext;
use crate::views::gaps::SkillGapView;
use crate::views::jobs::JobBoard;
use crate::views::matcher::JobMatcher;
use crate::views::retriever::JobRetriever;
use crate::views::upload::CvUploadForm;
use crate::views::volunteers::VolunteerDirectory;
use crate::views::{auth, render, Notice};

pub const NOT_AVAILABLE: &str = "This option is not available";

/// Volunteer portal client: browse opportunities, upload CVs and review matches.
#[derive(Parser, Debug)]
#[command(name = "volunteer-portal", version, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and remember the session on this device
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        email: String,
    },

    /// Forget the current session
    Logout,

    /// Show the current principal
    Whoami,

    /// List the views available to the current principal
    Menu,

    /// Browse stored opportunities with filters and statistics
    Jobs {
        /// Matches title, organization or description
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        skill: String,
        #[arg(long, default_value = "")]
        organization: String,
        /// Number of jobs to fetch (default: JOB_FETCH_LIMIT)
        #[arg(long)]
        limit: Option<u32>,
        /// Print the available filter values instead of the listing
        #[arg(long)]
        options: bool,
    },

    /// Pull new opportunities from the external feed (admin)
    Retrieve {
        /// Maximum jobs to retrieve (default: JOB_RETRIEVE_LIMIT)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Count stored opportunities
    Count,

    /// Upload a CV (.pdf, .docx or .txt) and create a volunteer profile
    Upload {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Weekly slot as DAY=HH:MM-HH:MM[/tentative|/busy]; repeatable
        #[arg(long = "available")]
        availability: Vec<AvailabilitySlot>,
        /// Monthly commitment in hours per week (1-168)
        #[arg(long, conflicts_with = "availability")]
        hours_per_week: Option<u32>,
        /// Monthly day preference: weekdays, weekends or flexible
        #[arg(long, conflicts_with = "availability")]
        preferred_days: Option<DayPreference>,
        /// Monthly time preference: morning, afternoon, evening or flexible
        #[arg(long, conflicts_with = "availability")]
        time_preference: Option<TimePreference>,
    },

    /// Show job matches for a volunteer profile
    Matches { profile_id: String },

    /// Show skill-gap recommendations for a volunteer profile
    Gaps {
        profile_id: String,
        /// Number of gaps to request (default: SKILL_GAP_LIMIT)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List volunteer profiles visible to you
    Volunteers {
        /// Matches name or email
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        skill: String,
        #[arg(long, default_value = "")]
        interest: String,
    },

    /// Delete a volunteer profile from your listing
    DeleteVolunteer { id: String },

    /// Check that the backend is reachable
    Status,
}

impl Command {
    /// The gated view behind this command, if any.
    pub fn view(&self) -> Option<View> {
        match self {
            Command::Login { .. } | Command::Signup { .. } => Some(View::Login),
            Command::Jobs { .. } | Command::Count => Some(View::JobBoard),
            Command::Retrieve { .. } => Some(View::JobRetriever),
            Command::Upload { .. } => Some(View::CvUpload),
            Command::Matches { .. } => Some(View::JobMatcher),
            Command::Gaps { .. } => Some(View::SkillGaps),
            Command::Volunteers { .. } | Command::DeleteVolunteer { .. } => {
                Some(View::Volunteers)
            }
            Command::Logout | Command::Whoami | Command::Menu | Command::Status => None,
        }
    }
}

/// Runs one command and renders its outcome. Returns `false` when an error was shown.
pub async fn run(ctx: &mut AppContext, command: Command) -> bool {
    if let Some(view) = command.view() {
        if !ctx.can_open(view) {
            debug!("{} hidden for current principal", view.id());
            println!("{NOT_AVAILABLE}");
            return true;
        }
    }

    match dispatch(ctx, command).await {
        Ok(()) => true,
        Err(AppError::Forbidden) => {
            println!("{NOT_AVAILABLE}");
            true
        }
        Err(e) => {
            if e.is_network_or_server() {
                warn!("Command failed talking to the backend: {e}");
            } else {
                debug!("Command rejected: {e}");
            }
            eprintln!("{}", Notice::from_error(&e));
            false
        }
    }
}

async fn dispatch(ctx: &mut AppContext, command: Command) -> Result<(), AppError> {
    let api = ctx.api.clone();
    let count_mode = ctx.config.stats_count_mode;

    match command {
        Command::Login { username, password } => {
            let notice = auth::login(&mut ctx.session, api.as_ref(), &username, &password).await?;
            println!("{notice}");
        }
        Command::Signup {
            username,
            password,
            email,
        } => {
            let notice = auth::signup(&ctx.session, api.as_ref(), &username, &password, &email)
                .await?;
            println!("{notice}");
        }
        Command::Logout => println!("{}", auth::logout(&mut ctx.session)?),
        Command::Whoami => match ctx.principal() {
            Some(p) => println!("{} ({})", p.username, p.role),
            None => println!("Not logged in"),
        },
        Command::Menu => {
            for view in visible_views(ctx.principal()) {
                println!("{:<12}{}", view.id(), view.title());
            }
        }
        Command::Jobs {
            search,
            location,
            skill,
            organization,
            limit,
            options,
        } => {
            let mut board =
                JobBoard::new(limit.unwrap_or(ctx.config.job_fetch_limit), count_mode);
            board.query = JobQuery {
                search,
                location,
                skill,
                organization,
            };
            board.refresh(api.as_ref()).await?;

            if options {
                let options = board.options();
                println!("Locations: {}", options.locations.join(", "));
                println!("Skills: {}", options.skills.join(", "));
                println!("Organizations: {}", options.organizations.join(", "));
                return Ok(());
            }

            let filtered = board.filtered();
            if filtered.is_empty() {
                println!("No jobs match the current filters");
            }
            for job in &filtered {
                print!("{}", render::job_card(job));
            }
            println!();
            print!("{}", render::job_stats(&board.stats(), board.total()));
        }
        Command::Retrieve { limit } => {
            let retriever = JobRetriever::new(limit.unwrap_or(ctx.config.job_retrieve_limit));
            let (_, notices) = retriever.run(api.as_ref()).await?;
            for notice in notices {
                println!("{notice}");
            }
        }
        Command::Count => println!("{} jobs stored", api.job_count().await?),
        Command::Upload {
            file,
            name,
            email,
            phone,
            location,
            availability,
            hours_per_week,
            preferred_days,
            time_preference,
        } => {
            let monthly = hours_per_week.is_some()
                || preferred_days.is_some()
                || time_preference.is_some();
            let availability = if monthly {
                Availability::monthly(
                    hours_per_week.unwrap_or(DEFAULT_HOURS_PER_WEEK),
                    preferred_days.unwrap_or_default(),
                    time_preference.unwrap_or_default(),
                )?
            } else {
                Availability::weekly(availability)
            };
            let form = CvUploadForm {
                file: Some(file),
                name,
                email,
                phone,
                location,
                availability,
            };
            let outcome = form.submit(api.as_ref(), ctx.principal()).await?;
            println!("{}", Notice::Success("CV uploaded".to_string()));
            println!("{}", render::upload_outcome(&outcome));
        }
        Command::Matches { profile_id } => {
            let mut matcher = JobMatcher::new();
            matcher.find(api.as_ref(), &profile_id).await?;
            if matcher.results().is_empty() {
                println!("No matches found for profile {}", profile_id.trim());
                return Ok(());
            }
            println!("{}", render::match_summary(&matcher.summary()));
            for result in matcher.ranked() {
                println!();
                print!("{}", render::match_card(result));
            }
        }
        Command::Gaps { profile_id, limit } => {
            let mut view = SkillGapView::new(limit.unwrap_or(ctx.config.skill_gap_limit));
            view.load(api.as_ref(), &profile_id).await?;
            if let Some(report) = view.report() {
                println!(
                    "Analyzed {} jobs, {} distinct required skills",
                    report.total_jobs_analyzed, report.total_unique_required_skills
                );
            }
            let ranked = view.ranked();
            if ranked.is_empty() {
                println!("No skill gaps found");
            }
            for gap in &ranked {
                println!("{}", render::gap_line(gap));
            }
        }
        Command::Volunteers {
            search,
            location,
            skill,
            interest,
        } => {
            let mut directory = VolunteerDirectory::new(count_mode);
            directory.query = VolunteerQuery {
                search,
                location,
                skill,
                interest,
            };
            directory.refresh(api.as_ref(), ctx.principal()).await?;

            let filtered = directory.filtered();
            if filtered.is_empty() {
                println!("No volunteers found");
            }
            for profile in &filtered {
                print!("{}", render::volunteer_card(profile));
            }
            println!();
            print!("{}", render::volunteer_stats(&directory.stats()));
        }
        Command::DeleteVolunteer { id } => {
            let mut directory = VolunteerDirectory::new(count_mode);
            directory.refresh(api.as_ref(), ctx.principal()).await?;
            let removed = directory.delete(api.as_ref(), ctx.principal(), &id).await?;
            println!(
                "{}",
                Notice::Success(format!("Deleted {} ({})", removed.name, removed.id))
            );
        }
        Command::Status => {
            let health = api.health().await?;
            println!("{} at {}", health.status, ctx.config.api_base_url);
            for (key, value) in &health.details {
                println!("  {key}: {value}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::models::{Principal, Role};
    use crate::session::{MemoryStorage, SessionStore};
    use crate::views::fake::FakeApi;

    fn context(principal: Option<Principal>, api: Arc<FakeApi>) -> AppContext {
        let storage = match principal {
            Some(p) => MemoryStorage::with(p),
            None => MemoryStorage::default(),
        };
        AppContext {
            config: Config::default(),
            session: SessionStore::restore(Box::new(storage)),
            api,
        }
    }

    #[test]
    fn test_parses_upload_with_availability() {
        let cli = Cli::try_parse_from([
            "volunteer-portal",
            "upload",
            "cv.pdf",
            "--name",
            "Ana",
            "--email",
            "ana@example.org",
            "--available",
            "mon=09:00-12:00",
            "--available",
            "sat=10:00-14:00/tentative",
        ])
        .unwrap();

        let Command::Upload { availability, .. } = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(availability.len(), 2);
        assert_eq!(availability[1].weekday(), "Saturday");
    }

    #[test]
    fn test_parses_upload_with_monthly_availability() {
        let cli = Cli::try_parse_from([
            "volunteer-portal",
            "upload",
            "cv.pdf",
            "--name",
            "Ana",
            "--email",
            "ana@example.org",
            "--hours-per-week",
            "15",
            "--preferred-days",
            "weekdays",
        ])
        .unwrap();

        let Command::Upload {
            hours_per_week,
            preferred_days,
            time_preference,
            ..
        } = cli.command
        else {
            panic!("expected upload");
        };
        assert_eq!(hours_per_week, Some(15));
        assert_eq!(preferred_days, Some(DayPreference::Weekdays));
        assert_eq!(time_preference, None);
    }

    #[test]
    fn test_weekly_and_monthly_availability_conflict() {
        let parsed = Cli::try_parse_from([
            "volunteer-portal",
            "upload",
            "cv.pdf",
            "--name",
            "Ana",
            "--email",
            "ana@example.org",
            "--available",
            "mon=09:00-12:00",
            "--hours-per-week",
            "15",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_rejects_malformed_availability() {
        let parsed = Cli::try_parse_from([
            "volunteer-portal",
            "upload",
            "cv.pdf",
            "--name",
            "Ana",
            "--email",
            "ana@example.org",
            "--available",
            "someday",
        ]);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_denied_view_is_silent_and_skips_the_api() {
        let api = Arc::new(FakeApi::default());
        let mut ctx = context(Some(Principal::new("ada", Role::User)), api.clone());

        let ok = run(&mut ctx, Command::Retrieve { limit: None }).await;

        assert!(ok);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_principal_can_only_log_in() {
        let api = Arc::new(FakeApi::default());
        let mut ctx = context(None, api.clone());

        assert!(run(&mut ctx, Command::Count).await);
        assert!(
            run(
                &mut ctx,
                Command::Matches {
                    profile_id: "p-1".to_string()
                }
            )
            .await
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_reported_not_raised() {
        let api = Arc::new(FakeApi {
            fail_with: Some("Failed to get jobs count".to_string()),
            ..Default::default()
        });
        let mut ctx = context(Some(Principal::new("root", Role::Admin)), api.clone());

        assert!(!run(&mut ctx, Command::Count).await);
        assert_eq!(api.calls(), vec!["count"]);
    }

    #[tokio::test]
    async fn test_local_validation_failure_is_reported_without_a_request() {
        let api = Arc::new(FakeApi::default());
        let mut ctx = context(Some(Principal::new("ada", Role::User)), api.clone());
        let blank = Command::Matches {
            profile_id: "  ".to_string(),
        };

        assert!(!run(&mut ctx, blank).await);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_then_logout_round_trip() {
        let api = Arc::new(FakeApi {
            principal: Some(Principal::new("ada", Role::User)),
            ..Default::default()
        });
        let mut ctx = context(None, api.clone());

        let login = Command::Login {
            username: "ada".to_string(),
            password: "pw".to_string(),
        };
        assert!(run(&mut ctx, login).await);
        assert!(ctx.can_open(View::CvUpload));

        assert!(run(&mut ctx, Command::Logout).await);
        assert!(ctx.principal().is_none());
    }
}
