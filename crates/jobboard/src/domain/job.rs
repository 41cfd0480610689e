use std::collections::BTreeSet;

use serde::Deserialize;

use super::{Applicant, ApplicantId, CompanyId, JobId};

/// A job post. Owns both halves of its relationships: the `company` foreign
/// key and the applicant edge set. `company` is optional at the type level so
/// a post can exist before it is attached, but validation refuses to let an
/// unattached post through and no persisted job ever lacks one.
#[derive(Debug, Clone)]
pub struct Job {
    id: JobId,
    title: String,
    description: String,
    required_skills: String,
    experience: String,
    company: Option<CompanyId>,
    applicants: BTreeSet<ApplicantId>,
}

/// Wire payload for creating a job post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub experience: String,
    pub company: CompanyId,
}

/// Wire payload for updating a job post's scalar attributes. The company
/// reference and applicant set are managed through their own operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub experience: String,
}

impl Job {
    /// Construct an unattached post from the scalar portion of the input.
    /// Callers attach it with [`super::Company::add_job_post`].
    pub fn new(input: &JobInput) -> Self {
        Self {
            id: JobId::generate(),
            title: input.title.clone(),
            description: input.description.clone(),
            required_skills: input.required_skills.clone(),
            experience: input.experience.clone(),
            company: None,
            applicants: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required_skills(&self) -> &str {
        &self.required_skills
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn company(&self) -> Option<CompanyId> {
        self.company
    }

    pub fn applicants(&self) -> &BTreeSet<ApplicantId> {
        &self.applicants
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_required_skills(&mut self, required_skills: impl Into<String>) {
        self.required_skills = required_skills.into();
    }

    pub fn set_experience(&mut self, experience: impl Into<String>) {
        self.experience = experience.into();
    }

    pub fn set_company(&mut self, company: Option<CompanyId>) {
        self.company = company;
    }

    /// Overwrite the scalar attributes from the payload, leaving the company
    /// reference and applicant set alone.
    pub fn update_from(&mut self, update: &JobUpdate) {
        self.set_title(&update.title);
        self.set_description(&update.description);
        self.set_required_skills(&update.required_skills);
        self.set_experience(&update.experience);
    }

    /// Record an application on both sides of the edge. Returns false when
    /// the applicant is already on this post, in which case nothing moves.
    pub fn add_applicant(&mut self, applicant: &mut Applicant) -> bool {
        if !self.applicants.insert(applicant.id()) {
            return false;
        }
        applicant.link_job(self.id);
        true
    }

    /// Drop an application from both sides of the edge. Returns false when
    /// the applicant was not on this post.
    pub fn remove_applicant(&mut self, applicant: &mut Applicant) -> bool {
        if !self.applicants.remove(&applicant.id()) {
            return false;
        }
        applicant.unlink_job(self.id);
        true
    }

    pub(crate) fn link_applicant(&mut self, applicant: ApplicantId) {
        self.applicants.insert(applicant);
    }

    pub(crate) fn unlink_applicant(&mut self, applicant: ApplicantId) {
        self.applicants.remove(&applicant);
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}
