use serde::Deserialize;

use super::{CompanyId, Job};

/// A company that posts jobs. The one-to-many edge to its job posts lives on
/// the job side as a foreign key; the company never stores a second copy, so
/// listing a company's posts is a store query.
#[derive(Debug, Clone)]
pub struct Company {
    id: CompanyId,
    name: String,
    description: String,
    location: String,
    contact_information: String,
}

/// Wire payload for creating or overwriting a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    pub description: String,
    pub location: String,
    pub contact_information: String,
}

impl Company {
    pub fn new(input: &CompanyInput) -> Self {
        Self {
            id: CompanyId::generate(),
            name: input.name.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            contact_information: input.contact_information.clone(),
        }
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contact_information(&self) -> &str {
        &self.contact_information
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_contact_information(&mut self, contact_information: impl Into<String>) {
        self.contact_information = contact_information.into();
    }

    /// Overwrite every scalar attribute from the payload. The identifier is
    /// untouched.
    pub fn update_from(&mut self, input: &CompanyInput) {
        self.set_name(&input.name);
        self.set_description(&input.description);
        self.set_location(&input.location);
        self.set_contact_information(&input.contact_information);
    }

    /// Point the job at this company. Returns false when the job already
    /// belongs here.
    pub fn add_job_post(&self, job: &mut Job) -> bool {
        if job.company() == Some(self.id) {
            return false;
        }
        job.set_company(Some(self.id));
        true
    }

    /// Detach the job, but only if it still points at this company. A job
    /// that was meanwhile reassigned keeps its current owner.
    pub fn remove_job_post(&self, job: &mut Job) -> bool {
        if job.company() != Some(self.id) {
            return false;
        }
        job.set_company(None);
        true
    }
}

impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Company {}
