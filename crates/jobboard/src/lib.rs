//! Job board service core.
//!
//! Companies publish job posts, applicants apply to them, and the
//! many-to-many application edge is kept consistent from both sides. The
//! crate exposes the domain model, the declarative validation layer, the
//! graph-projection views with per-context relation exclusion, the store
//! facade, the service operations, and the axum router serving the REST
//! contract.

pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod repository;
pub mod router;
pub mod service;
pub mod telemetry;
pub mod validation;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantId, ApplicantInput, Company, CompanyId, CompanyInput, EntityKind, Job,
    JobId, JobInput, JobUpdate,
};
pub use envelope::Envelope;
pub use error::AppError;
pub use repository::{ApplicationFilter, BoardStore, JobFilter, StoreError};
pub use router::{board_router, CallerIdentity};
pub use service::{BoardError, BoardService};
pub use validation::{validate, Violations};
pub use view::{ApplicantView, CompanyView, EntityGraph, ExcludeSet, JobView, Relation};
