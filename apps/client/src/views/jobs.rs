//! Job board: one fetched page of opportunities, narrowed client-side by a [`JobQuery`].

use crate::api_client::{JobPage, JobPageRequest, PortalApi};
use crate::errors::AppError;
use crate::filter::{FilterOptions, JobQuery};
use crate::models::JobRecord;
use crate::stats::{aggregate, CountMode, DerivedStats};
use crate::views::{settle, Latest, RequestTicket};

pub struct JobBoard {
    page: Latest<JobPage>,
    pub query: JobQuery,
    fetch_limit: u32,
    count_mode: CountMode,
}

impl JobBoard {
    pub fn new(fetch_limit: u32, count_mode: CountMode) -> Self {
        Self {
            page: Latest::new(),
            query: JobQuery::default(),
            fetch_limit,
            count_mode,
        }
    }

    pub fn request(&self) -> JobPageRequest {
        JobPageRequest::first(self.fetch_limit)
    }

    /// Fetches a fresh page. Returns `false` when a newer refresh superseded this one.
    pub async fn refresh(&mut self, api: &dyn PortalApi) -> Result<bool, AppError> {
        let request = self.request();
        let ticket = self.page.begin();
        let result = api.jobs(&request).await;
        self.accept(ticket, result)
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.page.begin()
    }

    pub fn accept(
        &mut self,
        ticket: RequestTicket,
        result: Result<JobPage, AppError>,
    ) -> Result<bool, AppError> {
        settle(&mut self.page, ticket, result)
    }

    pub fn page(&self) -> Option<&JobPage> {
        self.page.get()
    }

    pub fn jobs(&self) -> &[JobRecord] {
        self.page
            .get()
            .map(|page| page.jobs.as_slice())
            .unwrap_or_default()
    }

    /// Total on the server, which may exceed what was fetched.
    pub fn total(&self) -> u64 {
        self.page.get().map_or(0, |page| page.total)
    }

    pub fn filtered(&self) -> Vec<&JobRecord> {
        self.query.apply(self.jobs())
    }

    /// Statistics over the filtered collection.
    pub fn stats(&self) -> DerivedStats {
        aggregate(self.filtered(), self.count_mode)
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_jobs(self.jobs())
    }
}
