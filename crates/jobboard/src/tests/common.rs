use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::{
    Applicant, ApplicantId, ApplicantInput, Company, CompanyId, CompanyInput, Job, JobId, JobInput,
};
use crate::repository::{ApplicationFilter, BoardStore, JobFilter, StoreError};
use crate::router::board_router;
use crate::service::BoardService;

pub(super) fn company_input() -> CompanyInput {
    CompanyInput {
        name: "Acme Logistics".to_string(),
        description: "Freight and warehousing across the Baltics".to_string(),
        location: "Tallinn".to_string(),
        contact_information: "hiring@acme.example".to_string(),
    }
}

pub(super) fn job_input(company: CompanyId) -> JobInput {
    JobInput {
        title: "Backend Engineer".to_string(),
        description: "Design and operate the order routing services".to_string(),
        required_skills: "Rust, SQL, Kubernetes".to_string(),
        experience: "Three years running production services".to_string(),
        company,
    }
}

pub(super) fn applicant_input() -> ApplicantInput {
    ApplicantInput {
        name: "Maret Kask".to_string(),
        contact_information: "maret.kask@example.net".to_string(),
        job_preferences: "Remote backend roles".to_string(),
    }
}

pub(super) fn company() -> Company {
    Company::new(&company_input())
}

/// A job already attached to the given company, as the service would
/// persist it.
pub(super) fn job_for(company: &Company) -> Job {
    let mut job = Job::new(&job_input(company.id()));
    company.add_job_post(&mut job);
    job
}

pub(super) fn applicant() -> Applicant {
    Applicant::new(&applicant_input())
}

pub(super) fn build_service() -> (BoardService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = BoardService::new(store.clone());
    (service, store)
}

pub(super) fn board_router_with_service(service: BoardService<MemoryStore>) -> axum::Router {
    board_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    companies: Arc<Mutex<HashMap<CompanyId, Company>>>,
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
    applicants: Arc<Mutex<HashMap<ApplicantId, Applicant>>>,
}

impl BoardStore for MemoryStore {
    fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn companies(&self) -> Result<Vec<Company>, StoreError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        let mut companies: Vec<Company> = guard.values().cloned().collect();
        companies.sort_by_key(Company::id);
        Ok(companies)
    }

    fn save_company(&self, company: Company, _flush: bool) -> Result<Company, StoreError> {
        let mut guard = self.companies.lock().expect("company mutex poisoned");
        guard.insert(company.id(), company.clone());
        Ok(company)
    }

    fn remove_company(&self, id: CompanyId, _flush: bool) -> Result<(), StoreError> {
        let mut guard = self.companies.lock().expect("company mutex poisoned");
        guard.remove(&id);
        Ok(())
    }

    fn find_job(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        let jobs: Vec<Job> = {
            let guard = self.jobs.lock().expect("job mutex poisoned");
            guard.values().cloned().collect()
        };

        let mut matching = Vec::new();
        for job in jobs {
            let owner = match job.company() {
                Some(id) => self.find_company(id)?,
                None => None,
            };
            if filter.matches(&job, owner.as_ref()) {
                matching.push(job);
            }
        }
        matching.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(matching)
    }

    fn jobs_for_company(&self, id: CompanyId) -> Result<Vec<Job>, StoreError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        let mut jobs: Vec<Job> = guard
            .values()
            .filter(|job| job.company() == Some(id))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(jobs)
    }

    fn save_job(&self, job: Job, _flush: bool) -> Result<Job, StoreError> {
        let mut guard = self.jobs.lock().expect("job mutex poisoned");
        guard.insert(job.id(), job.clone());
        Ok(job)
    }

    fn remove_job(&self, id: JobId, _flush: bool) -> Result<(), StoreError> {
        let removed = self.jobs.lock().expect("job mutex poisoned").remove(&id);
        if let Some(mut job) = removed {
            let mut applicants = self.applicants.lock().expect("applicant mutex poisoned");
            let edges: Vec<ApplicantId> = job.applicants().iter().copied().collect();
            for applicant_id in edges {
                if let Some(applicant) = applicants.get_mut(&applicant_id) {
                    job.remove_applicant(applicant);
                }
            }
        }
        Ok(())
    }

    fn find_applicant(&self, id: ApplicantId) -> Result<Option<Applicant>, StoreError> {
        let guard = self.applicants.lock().expect("applicant mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn applicants(&self, filter: &ApplicationFilter) -> Result<Vec<Applicant>, StoreError> {
        let guard = self.applicants.lock().expect("applicant mutex poisoned");
        let mut applicants: Vec<Applicant> = guard
            .values()
            .filter(|applicant| filter.matches(applicant))
            .cloned()
            .collect();
        applicants.sort_by_key(Applicant::id);
        Ok(applicants)
    }

    fn save_applicant(&self, applicant: Applicant, _flush: bool) -> Result<Applicant, StoreError> {
        let mut guard = self.applicants.lock().expect("applicant mutex poisoned");
        guard.insert(applicant.id(), applicant.clone());
        Ok(applicant)
    }

    fn remove_applicant(&self, id: ApplicantId, _flush: bool) -> Result<(), StoreError> {
        let removed = self
            .applicants
            .lock()
            .expect("applicant mutex poisoned")
            .remove(&id);
        if let Some(mut applicant) = removed {
            let mut jobs = self.jobs.lock().expect("job mutex poisoned");
            let edges: Vec<JobId> = applicant.jobs_applied().iter().copied().collect();
            for job_id in edges {
                if let Some(job) = jobs.get_mut(&job_id) {
                    applicant.remove_job_applied(job);
                }
            }
        }
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl BoardStore for UnavailableStore {
    fn find_company(&self, _id: CompanyId) -> Result<Option<Company>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn companies(&self) -> Result<Vec<Company>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save_company(&self, _company: Company, _flush: bool) -> Result<Company, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove_company(&self, _id: CompanyId, _flush: bool) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_job(&self, _id: JobId) -> Result<Option<Job>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn jobs(&self, _filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn jobs_for_company(&self, _id: CompanyId) -> Result<Vec<Job>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save_job(&self, _job: Job, _flush: bool) -> Result<Job, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove_job(&self, _id: JobId, _flush: bool) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_applicant(&self, _id: ApplicantId) -> Result<Option<Applicant>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn applicants(&self, _filter: &ApplicationFilter) -> Result<Vec<Applicant>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save_applicant(&self, _applicant: Applicant, _flush: bool) -> Result<Applicant, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove_applicant(&self, _id: ApplicantId, _flush: bool) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
