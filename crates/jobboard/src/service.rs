//! Operations over the board: entity lifecycles and the application edge.
//!
//! Every mutation validates before persisting, so an invalid entity never
//! reaches the store. Read operations load the neighborhood a response
//! context needs into an [`EntityGraph`] and hand back projected views.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Applicant, ApplicantId, ApplicantInput, Company, CompanyId, CompanyInput, EntityKind, Job,
    JobId, JobInput, JobUpdate,
};
use crate::repository::{ApplicationFilter, BoardStore, JobFilter, StoreError};
use crate::validation::{validate, Violations};
use crate::view::{ApplicantView, CompanyView, EntityGraph, ExcludeSet, JobView};

pub struct BoardService<S> {
    store: Arc<S>,
}

impl<S> BoardService<S>
where
    S: BoardStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create_company(&self, input: CompanyInput) -> Result<Company, BoardError> {
        let company = Company::new(&input);
        let violations = validate(&company);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        Ok(self.store.save_company(company, true)?)
    }

    pub fn companies(&self, exclude: &ExcludeSet) -> Result<Vec<CompanyView>, BoardError> {
        let companies = self.store.companies()?;
        let mut graph = EntityGraph::new();
        for company in &companies {
            self.load_company_neighborhood(&mut graph, company)?;
        }
        Ok(companies
            .iter()
            .map(|company| graph.company_view(company, exclude))
            .collect())
    }

    pub fn company(
        &self,
        id: CompanyId,
        exclude: &ExcludeSet,
    ) -> Result<CompanyView, BoardError> {
        let company = self.require_company(id)?;
        let mut graph = EntityGraph::new();
        self.load_company_neighborhood(&mut graph, &company)?;
        Ok(graph.company_view(&company, exclude))
    }

    pub fn update_company(
        &self,
        id: CompanyId,
        input: CompanyInput,
        exclude: &ExcludeSet,
    ) -> Result<CompanyView, BoardError> {
        let mut company = self.require_company(id)?;
        company.update_from(&input);
        let violations = validate(&company);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        let company = self.store.save_company(company, true)?;
        let mut graph = EntityGraph::new();
        self.load_company_neighborhood(&mut graph, &company)?;
        Ok(graph.company_view(&company, exclude))
    }

    /// Companies with live posts cannot be deleted; the posts must go first
    /// so no job is ever orphaned.
    pub fn delete_company(&self, id: CompanyId) -> Result<(), BoardError> {
        let company = self.require_company(id)?;
        let posts = self.store.jobs_for_company(company.id())?;
        if !posts.is_empty() {
            return Err(BoardError::ReferentialIntegrity(format!(
                "company {} still has {} job posts",
                company.id(),
                posts.len()
            )));
        }
        Ok(self.store.remove_company(id, true)?)
    }

    pub fn create_job(&self, input: JobInput) -> Result<Job, BoardError> {
        let company = self.store.find_company(input.company)?.ok_or_else(|| {
            BoardError::ReferentialIntegrity(format!(
                "job post references unknown company {}",
                input.company
            ))
        })?;

        let mut job = Job::new(&input);
        company.add_job_post(&mut job);

        let violations = validate(&job);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        Ok(self.store.save_job(job, true)?)
    }

    pub fn jobs(
        &self,
        filter: &JobFilter,
        exclude: &ExcludeSet,
    ) -> Result<Vec<JobView>, BoardError> {
        let jobs = self.store.jobs(filter)?;
        let mut graph = EntityGraph::new();
        for job in &jobs {
            self.load_job_neighborhood(&mut graph, job)?;
        }
        Ok(jobs
            .iter()
            .map(|job| graph.job_view(job, exclude))
            .collect())
    }

    pub fn job(&self, id: JobId, exclude: &ExcludeSet) -> Result<JobView, BoardError> {
        let job = self.require_job(id)?;
        let mut graph = EntityGraph::new();
        self.load_job_neighborhood(&mut graph, &job)?;
        Ok(graph.job_view(&job, exclude))
    }

    /// Scalar update only; the company reference and applicant set are
    /// managed through their own operations.
    pub fn update_job(&self, id: JobId, update: JobUpdate) -> Result<Job, BoardError> {
        let mut job = self.require_job(id)?;
        job.update_from(&update);
        let violations = validate(&job);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        Ok(self.store.save_job(job, true)?)
    }

    pub fn delete_job(&self, id: JobId) -> Result<(), BoardError> {
        self.require_job(id)?;
        Ok(self.store.remove_job(id, true)?)
    }

    pub fn create_applicant(&self, input: ApplicantInput) -> Result<Applicant, BoardError> {
        let applicant = Applicant::new(&input);
        let violations = validate(&applicant);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        Ok(self.store.save_applicant(applicant, true)?)
    }

    pub fn applicants(
        &self,
        filter: &ApplicationFilter,
        exclude: &ExcludeSet,
    ) -> Result<Vec<ApplicantView>, BoardError> {
        let applicants = self.store.applicants(filter)?;
        let mut graph = EntityGraph::new();
        for applicant in &applicants {
            self.load_applicant_neighborhood(&mut graph, applicant)?;
        }
        Ok(applicants
            .iter()
            .map(|applicant| graph.applicant_view(applicant, exclude))
            .collect())
    }

    pub fn applicant(
        &self,
        id: ApplicantId,
        exclude: &ExcludeSet,
    ) -> Result<ApplicantView, BoardError> {
        let applicant = self.require_applicant(id)?;
        let mut graph = EntityGraph::new();
        self.load_applicant_neighborhood(&mut graph, &applicant)?;
        Ok(graph.applicant_view(&applicant, exclude))
    }

    pub fn update_applicant(
        &self,
        id: ApplicantId,
        input: ApplicantInput,
        exclude: &ExcludeSet,
    ) -> Result<ApplicantView, BoardError> {
        let mut applicant = self.require_applicant(id)?;
        applicant.update_from(&input);
        let violations = validate(&applicant);
        if !violations.is_empty() {
            return Err(BoardError::Validation(violations));
        }
        let applicant = self.store.save_applicant(applicant, true)?;
        let mut graph = EntityGraph::new();
        self.load_applicant_neighborhood(&mut graph, &applicant)?;
        Ok(graph.applicant_view(&applicant, exclude))
    }

    pub fn delete_applicant(&self, id: ApplicantId) -> Result<(), BoardError> {
        self.require_applicant(id)?;
        Ok(self.store.remove_applicant(id, true)?)
    }

    /// Register an application. Re-applying to the same post is a no-op
    /// that still reports success.
    pub fn apply_to_job(
        &self,
        applicant_id: ApplicantId,
        job_id: JobId,
        exclude: &ExcludeSet,
    ) -> Result<ApplicantView, BoardError> {
        let mut applicant = self.require_applicant(applicant_id)?;
        let mut job = self.require_job(job_id)?;

        applicant.add_job_applied(&mut job);
        self.store.save_job(job, true)?;
        let applicant = self.store.save_applicant(applicant, true)?;

        let mut graph = EntityGraph::new();
        self.load_applicant_neighborhood(&mut graph, &applicant)?;
        Ok(graph.applicant_view(&applicant, exclude))
    }

    /// Withdraw an application. Withdrawing one that never existed is a
    /// no-op that still reports success.
    pub fn withdraw_application(
        &self,
        applicant_id: ApplicantId,
        job_id: JobId,
        exclude: &ExcludeSet,
    ) -> Result<ApplicantView, BoardError> {
        let mut applicant = self.require_applicant(applicant_id)?;
        let mut job = self.require_job(job_id)?;

        applicant.remove_job_applied(&mut job);
        self.store.save_job(job, true)?;
        let applicant = self.store.save_applicant(applicant, true)?;

        let mut graph = EntityGraph::new();
        self.load_applicant_neighborhood(&mut graph, &applicant)?;
        Ok(graph.applicant_view(&applicant, exclude))
    }

    fn require_company(&self, id: CompanyId) -> Result<Company, BoardError> {
        self.store.find_company(id)?.ok_or(BoardError::NotFound {
            kind: EntityKind::Company,
            id: id.0,
        })
    }

    fn require_job(&self, id: JobId) -> Result<Job, BoardError> {
        self.store.find_job(id)?.ok_or(BoardError::NotFound {
            kind: EntityKind::Job,
            id: id.0,
        })
    }

    fn require_applicant(&self, id: ApplicantId) -> Result<Applicant, BoardError> {
        self.store.find_applicant(id)?.ok_or(BoardError::NotFound {
            kind: EntityKind::Applicant,
            id: id.0,
        })
    }

    fn load_company_neighborhood(
        &self,
        graph: &mut EntityGraph,
        company: &Company,
    ) -> Result<(), BoardError> {
        for job in self.store.jobs_for_company(company.id())? {
            self.load_job_applicants(graph, &job)?;
            graph.insert_job(job);
        }
        graph.insert_company(company.clone());
        Ok(())
    }

    fn load_job_neighborhood(&self, graph: &mut EntityGraph, job: &Job) -> Result<(), BoardError> {
        if let Some(company_id) = job.company() {
            if let Some(company) = self.store.find_company(company_id)? {
                graph.insert_company(company);
            }
        }
        self.load_job_applicants(graph, job)?;
        graph.insert_job(job.clone());
        Ok(())
    }

    fn load_applicant_neighborhood(
        &self,
        graph: &mut EntityGraph,
        applicant: &Applicant,
    ) -> Result<(), BoardError> {
        for id in applicant.jobs_applied() {
            if let Some(job) = self.store.find_job(*id)? {
                if let Some(company_id) = job.company() {
                    if let Some(company) = self.store.find_company(company_id)? {
                        graph.insert_company(company);
                    }
                }
                graph.insert_job(job);
            }
        }
        graph.insert_applicant(applicant.clone());
        Ok(())
    }

    fn load_job_applicants(&self, graph: &mut EntityGraph, job: &Job) -> Result<(), BoardError> {
        for id in job.applicants() {
            if let Some(applicant) = self.store.find_applicant(*id)? {
                graph.insert_applicant(applicant);
            }
        }
        Ok(())
    }
}

/// Error raised by the board service.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("invalid input")]
    Validation(Violations),
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, id: Uuid },
    #[error("{0}")]
    ReferentialIntegrity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
