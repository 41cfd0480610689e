//! Entities of the job board: companies, job posts, and applicants.
//!
//! Identifiers are UUIDs minted at construction time and never reassigned.
//! Equality between entities compares identifiers only, so two loads of the
//! same record are equal regardless of attribute drift. The many-to-many
//! edge between jobs and applicants is stored as id sets on both sides and
//! must only be touched through the paired mutators, which keep the two
//! views of the edge in lockstep.

mod applicant;
mod company;
mod job;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use applicant::{Applicant, ApplicantInput};
pub use company::{Company, CompanyInput};
pub use job::{Job, JobInput, JobUpdate};

/// Identifier wrapper for companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub Uuid);

/// Identifier wrapper for job posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

/// Identifier wrapper for applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub Uuid);

impl CompanyId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl ApplicantId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CompanyId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(value).map(Self)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(value).map(Self)
    }
}

impl FromStr for ApplicantId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(value).map(Self)
    }
}

/// The entity kinds exposed through the API, used when reporting lookups
/// that came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Job,
    Applicant,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Company => "Company",
            EntityKind::Job => "Job post",
            EntityKind::Applicant => "Applicant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
