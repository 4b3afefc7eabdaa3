//! Volunteer directory: the scoped listing, its filters and record deletion.
//!
//! The server enforces ownership. The client-side scope check only keeps the listing honest
//! when a backend returns more than it should.

use tracing::{info, warn};

use crate::access::{authorize, View, VolunteerScope};
use crate::api_client::PortalApi;
use crate::errors::AppError;
use crate::filter::VolunteerQuery;
use crate::models::{Principal, VolunteerProfile};
use crate::stats::{aggregate_volunteers, CountMode, VolunteerStats};
use crate::views::{settle, Latest};

pub struct VolunteerDirectory {
    profiles: Latest<(VolunteerScope, Vec<VolunteerProfile>)>,
    pub query: VolunteerQuery,
    count_mode: CountMode,
}

impl VolunteerDirectory {
    pub fn new(count_mode: CountMode) -> Self {
        Self {
            profiles: Latest::new(),
            query: VolunteerQuery::default(),
            count_mode,
        }
    }

    pub async fn refresh(
        &mut self,
        api: &dyn PortalApi,
        principal: Option<&Principal>,
    ) -> Result<bool, AppError> {
        authorize(View::Volunteers, principal)?;
        let Some(principal) = principal else {
            return Err(AppError::Forbidden);
        };

        let scope = VolunteerScope::for_principal(principal);
        let ticket = self.profiles.begin();
        let result = api.volunteers(&scope).await.map(|profiles| {
            let (kept, dropped): (Vec<_>, Vec<_>) =
                profiles.into_iter().partition(|p| scope.permits(p));
            if !dropped.is_empty() {
                warn!(
                    "Dropped {} profiles outside the scope of {}",
                    dropped.len(),
                    scope.username
                );
            }
            (scope, kept)
        });
        settle(&mut self.profiles, ticket, result)
    }

    /// Drops the listing when it was fetched under a different principal. Returns whether
    /// anything was discarded.
    pub fn sync_principal(&mut self, principal: Option<&Principal>) -> bool {
        let current = principal.map(VolunteerScope::for_principal);
        let stale = self.scope().is_some_and(|scope| Some(scope) != current.as_ref());
        if stale {
            info!("Principal changed; discarding volunteer listing");
            self.profiles.clear();
        }
        stale
    }

    pub fn scope(&self) -> Option<&VolunteerScope> {
        self.profiles.get().map(|(scope, _)| scope)
    }

    pub fn profiles(&self) -> &[VolunteerProfile] {
        self.profiles
            .get()
            .map(|(_, profiles)| profiles.as_slice())
            .unwrap_or_default()
    }

    pub fn filtered(&self) -> Vec<&VolunteerProfile> {
        self.query.apply(self.profiles())
    }

    pub fn stats(&self) -> VolunteerStats {
        aggregate_volunteers(self.filtered(), self.count_mode)
    }

    /// Deletes a profile from the current listing. Ids outside the listing are refused
    /// without a request, and so is a listing fetched under another principal.
    pub async fn delete(
        &mut self,
        api: &dyn PortalApi,
        principal: Option<&Principal>,
        id: &str,
    ) -> Result<VolunteerProfile, AppError> {
        authorize(View::Volunteers, principal)?;
        self.sync_principal(principal);

        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::validation("Please enter a volunteer ID"));
        }
        if !self.profiles().iter().any(|p| p.id == id) {
            return Err(AppError::validation(format!(
                "No volunteer with ID {id} in your listing"
            )));
        }

        api.delete_volunteer(id).await?;

        let removed = self
            .profiles
            .get_mut()
            .and_then(|(_, profiles)| {
                let index = profiles.iter().position(|p| p.id == id)?;
                Some(profiles.remove(index))
            })
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("volunteer {id} vanished during delete"))
            })?;
        info!("Deleted volunteer {} ({})", removed.id, removed.name);
        Ok(removed)
    }
}
