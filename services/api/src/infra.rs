use jobboard::{
    Applicant, ApplicantId, ApplicationFilter, BoardStore, Company, CompanyId, Job, JobFilter,
    JobId, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Memory-backed store keeping one map per entity. Edges are repaired on
/// removal so a deleted id never lingers in a mirror set.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBoardStore {
    companies: Arc<Mutex<HashMap<CompanyId, Company>>>,
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
    applicants: Arc<Mutex<HashMap<ApplicantId, Applicant>>>,
}

impl BoardStore for InMemoryBoardStore {
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
