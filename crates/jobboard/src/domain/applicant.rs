use std::collections::BTreeSet;

use serde::Deserialize;

use super::{ApplicantId, Job, JobId};

/// A job seeker. `jobs_applied` mirrors the applicant sets of the posts this
/// person applied to; the two sides are updated together by the paired
/// mutators here and on [`Job`].
#[derive(Debug, Clone)]
pub struct Applicant {
    id: ApplicantId,
    name: String,
    contact_information: String,
    job_preferences: String,
    jobs_applied: BTreeSet<JobId>,
}

/// Wire payload for creating or overwriting an applicant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInput {
    pub name: String,
    pub contact_information: String,
    pub job_preferences: String,
}

impl Applicant {
    pub fn new(input: &ApplicantInput) -> Self {
        Self {
            id: ApplicantId::generate(),
            name: input.name.clone(),
            contact_information: input.contact_information.clone(),
            job_preferences: input.job_preferences.clone(),
            jobs_applied: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> ApplicantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_information(&self) -> &str {
        &self.contact_information
    }

    pub fn job_preferences(&self) -> &str {
        &self.job_preferences
    }

    pub fn jobs_applied(&self) -> &BTreeSet<JobId> {
        &self.jobs_applied
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_contact_information(&mut self, contact_information: impl Into<String>) {
        self.contact_information = contact_information.into();
    }

    pub fn set_job_preferences(&mut self, job_preferences: impl Into<String>) {
        self.job_preferences = job_preferences.into();
    }

    /// Overwrite every scalar attribute from the payload. The identifier and
    /// the applied-jobs set are untouched.
    pub fn update_from(&mut self, input: &ApplicantInput) {
        self.set_name(&input.name);
        self.set_contact_information(&input.contact_information);
        self.set_job_preferences(&input.job_preferences);
    }

    /// Apply to a post, updating both sides of the edge. Returns false when
    /// the application already exists.
    pub fn add_job_applied(&mut self, job: &mut Job) -> bool {
        if !self.jobs_applied.insert(job.id()) {
            return false;
        }
        job.link_applicant(self.id);
        true
    }

    /// Withdraw an application from both sides of the edge. Returns false
    /// when there was no such application.
    pub fn remove_job_applied(&mut self, job: &mut Job) -> bool {
        if !self.jobs_applied.remove(&job.id()) {
            return false;
        }
        job.unlink_applicant(self.id);
        true
    }

    pub(crate) fn link_job(&mut self, job: JobId) {
        self.jobs_applied.insert(job);
    }

    pub(crate) fn unlink_job(&mut self, job: JobId) {
        self.jobs_applied.remove(&job);
    }
}

impl PartialEq for Applicant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Applicant {}
