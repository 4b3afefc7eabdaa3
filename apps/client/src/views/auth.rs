//! Login, signup and logout: the only paths that move the session between states.

use tracing::{info, warn};

use crate::access::{authorize, View};
use crate::api_client::PortalApi;
use crate::errors::AppError;
use crate::session::SessionStore;
use crate::views::Notice;

pub async fn login(
    session: &mut SessionStore,
    api: &dyn PortalApi,
    username: &str,
    password: &str,
) -> Result<Notice, AppError> {
    authorize(View::Login, session.current())?;

    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::validation("Please enter username and password"));
    }

    let principal = api.login(username, password).await?;
    let welcome = format!("Logged in as {} ({})", principal.username, principal.role);

    match session.set_principal(principal) {
        Ok(()) => Ok(Notice::Success(welcome)),
        Err(e) => {
            warn!("Session not persisted: {e}");
            Ok(Notice::Warning(format!(
                "{welcome}, but the session will not survive a restart"
            )))
        }
    }
}

pub async fn signup(
    session: &SessionStore,
    api: &dyn PortalApi,
    username: &str,
    password: &str,
    email: &str,
) -> Result<Notice, AppError> {
    authorize(View::Login, session.current())?;

    let (username, email) = (username.trim(), email.trim());
    if username.is_empty() || password.is_empty() || email.is_empty() {
        return Err(AppError::validation(
            "Please enter a username, password and email",
        ));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Please enter a valid email address"));
    }

    api.signup(username, password, email).await?;
    info!("Account created for {username}");
    Ok(Notice::Success(
        "Account created successfully! Please login.".to_string(),
    ))
}

pub fn logout(session: &mut SessionStore) -> Result<Notice, AppError> {
    match session.clear()? {
        Some(previous) => Ok(Notice::Info(format!("Logged out {}", previous.username))),
        None => Ok(Notice::Info("No active session".to_string())),
    }
}
