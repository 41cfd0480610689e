//! Storage seam for the board.

use crate::domain::{Applicant, ApplicantId, Company, CompanyId, Job, JobId};

/// Storage abstraction so the service can run against memory-backed doubles
/// and be pointed at a real database later without touching the domain.
///
/// `save_*` upserts by id and hands the stored entity back; `flush` lets a
/// write-behind implementation defer its commit when false (callers here
/// always pass true). `remove_job` and `remove_applicant` cascade the
/// application edge: the removed id disappears from every mirror set.
pub trait BoardStore: Send + Sync {
    fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;
    /// Every company, ordered by id.
    fn companies(&self) -> Result<Vec<Company>, StoreError>;
    fn save_company(&self, company: Company, flush: bool) -> Result<Company, StoreError>;
    fn remove_company(&self, id: CompanyId, flush: bool) -> Result<(), StoreError>;

    fn find_job(&self, id: JobId) -> Result<Option<Job>, StoreError>;
    /// Jobs passing the filter, ordered by title ascending.
    fn jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError>;
    /// Jobs whose foreign key points at the company, ordered by title.
    fn jobs_for_company(&self, id: CompanyId) -> Result<Vec<Job>, StoreError>;
    fn save_job(&self, job: Job, flush: bool) -> Result<Job, StoreError>;
    fn remove_job(&self, id: JobId, flush: bool) -> Result<(), StoreError>;

    fn find_applicant(&self, id: ApplicantId) -> Result<Option<Applicant>, StoreError>;
    /// Applicants passing the filter, ordered by id.
    fn applicants(&self, filter: &ApplicationFilter) -> Result<Vec<Applicant>, StoreError>;
    fn save_applicant(&self, applicant: Applicant, flush: bool) -> Result<Applicant, StoreError>;
    fn remove_applicant(&self, id: ApplicantId, flush: bool) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Query conditions for job listings. Present conditions are ANDed; company
/// name and location read through to the owning company.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job, company: Option<&Company>) -> bool {
        if let Some(title) = &self.title {
            if !like_match(job.title(), title) {
                return false;
            }
        }
        if let Some(name) = &self.company_name {
            match company {
                Some(owner) if like_match(owner.name(), name) => {}
                _ => return false,
            }
        }
        if let Some(location) = &self.location {
            match company {
                Some(owner) if like_match(owner.location(), location) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Query conditions for the applications listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationFilter {
    pub applicant: Option<ApplicantId>,
    pub job: Option<JobId>,
}

impl ApplicationFilter {
    pub fn matches(&self, applicant: &Applicant) -> bool {
        if let Some(id) = self.applicant {
            if applicant.id() != id {
                return false;
            }
        }
        if let Some(job) = self.job {
            if !applicant.jobs_applied().contains(&job) {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring containment, the `LIKE '%needle%'` contract
/// every store implementation follows.
pub fn like_match(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
