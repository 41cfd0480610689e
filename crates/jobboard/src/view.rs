//! Wire views of the entity graph.
//!
//! Responses never serialize entities directly. Handlers pick an
//! [`ExcludeSet`] for their context, the service loads the relevant
//! neighborhood into an [`EntityGraph`], and projection walks the graph into
//! view structs. The exclude set is honored by relation name at every
//! nesting depth, ids missing from the graph are skipped, and the walk
//! carries its path so a cycle (job -> applicant -> same job) terminates
//! even when nothing is excluded.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Applicant, ApplicantId, Company, CompanyId, EntityKind, Job, JobId};

/// Relationship fields a response context can omit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relation {
    /// The `company` field nested under a job.
    Company,
    /// The `applicants` list nested under a job.
    Applicants,
    /// The `jobsApplied` list nested under an applicant.
    JobsApplied,
    /// The `jobPosts` list nested under a company.
    JobPosts,
}

/// The set of relations to leave out of one response.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet(BTreeSet<Relation>);

impl ExcludeSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(relations: &[Relation]) -> Self {
        Self(relations.iter().copied().collect())
    }

    pub fn excludes(&self, relation: Relation) -> bool {
        self.0.contains(&relation)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub id: CompanyId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub contact_information: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_posts: Option<Vec<JobView>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicants: Option<Vec<ApplicantView>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    pub id: ApplicantId,
    pub name: String,
    pub contact_information: String,
    pub job_preferences: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs_applied: Option<Vec<JobView>>,
}

/// The neighborhood of companies, jobs, and applicants one response is
/// rendered from. Callers load exactly the entities their context needs;
/// relation ids pointing outside the graph are silently dropped from the
/// projection.
#[derive(Debug, Default)]
pub struct EntityGraph {
    companies: BTreeMap<CompanyId, Company>,
    jobs: BTreeMap<JobId, Job>,
    applicants: BTreeMap<ApplicantId, Applicant>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_company(&mut self, company: Company) {
        self.companies.insert(company.id(), company);
    }

    pub fn insert_job(&mut self, job: Job) {
        self.jobs.insert(job.id(), job);
    }

    pub fn insert_applicant(&mut self, applicant: Applicant) {
        self.applicants.insert(applicant.id(), applicant);
    }

    pub fn company_view(&self, company: &Company, exclude: &ExcludeSet) -> CompanyView {
        self.company_node(company, exclude, &mut Vec::new())
    }

    pub fn job_view(&self, job: &Job, exclude: &ExcludeSet) -> JobView {
        self.job_node(job, exclude, &mut Vec::new())
    }

    pub fn applicant_view(&self, applicant: &Applicant, exclude: &ExcludeSet) -> ApplicantView {
        self.applicant_node(applicant, exclude, &mut Vec::new())
    }

    fn company_node(
        &self,
        company: &Company,
        exclude: &ExcludeSet,
        path: &mut Vec<(EntityKind, Uuid)>,
    ) -> CompanyView {
        path.push((EntityKind::Company, company.id().0));

        let job_posts = if exclude.excludes(Relation::JobPosts) {
            None
        } else {
            let mut posts = Vec::new();
            for job in self.jobs.values() {
                if job.company() != Some(company.id()) {
                    continue;
                }
                if !visited(path, EntityKind::Job, job.id().0) {
                    posts.push(self.job_node(job, exclude, path));
                }
            }
            Some(posts)
        };

        path.pop();

        CompanyView {
            id: company.id(),
            name: company.name().to_string(),
            description: company.description().to_string(),
            location: company.location().to_string(),
            contact_information: company.contact_information().to_string(),
            job_posts,
        }
    }

    fn job_node(
        &self,
        job: &Job,
        exclude: &ExcludeSet,
        path: &mut Vec<(EntityKind, Uuid)>,
    ) -> JobView {
        path.push((EntityKind::Job, job.id().0));

        let company = if exclude.excludes(Relation::Company) {
            None
        } else {
            match job.company().and_then(|id| self.companies.get(&id)) {
                Some(owner) if !visited(path, EntityKind::Company, owner.id().0) => {
                    Some(self.company_node(owner, exclude, path))
                }
                _ => None,
            }
        };

        let applicants = if exclude.excludes(Relation::Applicants) {
            None
        } else {
            let mut list = Vec::new();
            for id in job.applicants() {
                if let Some(applicant) = self.applicants.get(id) {
                    if !visited(path, EntityKind::Applicant, applicant.id().0) {
                        list.push(self.applicant_node(applicant, exclude, path));
                    }
                }
            }
            Some(list)
        };

        path.pop();

        JobView {
            id: job.id(),
            title: job.title().to_string(),
            description: job.description().to_string(),
            required_skills: job.required_skills().to_string(),
            experience: job.experience().to_string(),
            company,
            applicants,
        }
    }

    fn applicant_node(
        &self,
        applicant: &Applicant,
        exclude: &ExcludeSet,
        path: &mut Vec<(EntityKind, Uuid)>,
    ) -> ApplicantView {
        path.push((EntityKind::Applicant, applicant.id().0));

        let jobs_applied = if exclude.excludes(Relation::JobsApplied) {
            None
        } else {
            let mut list = Vec::new();
            for id in applicant.jobs_applied() {
                if let Some(job) = self.jobs.get(id) {
                    if !visited(path, EntityKind::Job, job.id().0) {
                        list.push(self.job_node(job, exclude, path));
                    }
                }
            }
            Some(list)
        };

        path.pop();

        ApplicantView {
            id: applicant.id(),
            name: applicant.name().to_string(),
            contact_information: applicant.contact_information().to_string(),
            job_preferences: applicant.job_preferences().to_string(),
            jobs_applied,
        }
    }
}

fn visited(path: &[(EntityKind, Uuid)], kind: EntityKind, id: Uuid) -> bool {
    path.iter().any(|entry| *entry == (kind, id))
}
