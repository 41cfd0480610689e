//! HTTP surface of the board.
//!
//! Handlers stay thin: parse the path id, pick the exclusion set for the
//! response context, call the service, wrap the result in the envelope.
//! Extractor failures (bad JSON, bad query strings) are caught here so every
//! reply, including the broken ones, carries the envelope shape.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    ApplicantId, ApplicantInput, CompanyId, CompanyInput, EntityKind, JobId, JobInput, JobUpdate,
};
use crate::envelope::Envelope;
use crate::repository::{ApplicationFilter, BoardStore, JobFilter};
use crate::service::{BoardError, BoardService};
use crate::view::{ExcludeSet, Relation};

/// Identity of the principal a request is served for, inserted by the host
/// binary as an extension. Carried as an explicit value so attribution never
/// reads global state.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub subject: String,
}

impl CallerIdentity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Query parameters accepted by the job listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
}

impl JobListQuery {
    fn into_filter(self) -> JobFilter {
        JobFilter {
            title: self.title,
            company_name: self.company_name,
            location: self.location,
        }
    }
}

/// Query parameters accepted by the applications listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListQuery {
    pub applicant_id: Option<ApplicantId>,
    pub job_id: Option<JobId>,
}

impl ApplicationListQuery {
    fn into_filter(self) -> ApplicationFilter {
        ApplicationFilter {
            applicant: self.applicant_id,
            job: self.job_id,
        }
    }
}

/// Body of the apply and withdraw endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub jobs_applied: JobId,
}

/// Router builder exposing the board endpoints under `/api/v1`.
pub fn board_router<S>(service: Arc<BoardService<S>>) -> Router
where
    S: BoardStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies",
            post(create_company_handler::<S>).get(list_companies_handler::<S>),
        )
        .route(
            "/api/v1/companies/:company_id",
            get(company_handler::<S>)
                .put(update_company_handler::<S>)
                .delete(delete_company_handler::<S>),
        )
        .route(
            "/api/v1/jobs",
            post(create_job_handler::<S>).get(list_jobs_handler::<S>),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(job_handler::<S>)
                .put(update_job_handler::<S>)
                .delete(delete_job_handler::<S>),
        )
        .route(
            "/api/v1/applicants",
            post(create_applicant_handler::<S>).get(list_applicants_handler::<S>),
        )
        .route(
            "/api/v1/applicants/:applicant_id",
            get(applicant_handler::<S>)
                .put(update_applicant_handler::<S>)
                .delete(delete_applicant_handler::<S>),
        )
        .route("/api/v1/job-applicants", get(list_applications_handler::<S>))
        .route(
            "/api/v1/job-applicants/apply/:applicant_id",
            put(apply_handler::<S>),
        )
        .route(
            "/api/v1/job-applicants/remove/:applicant_id",
            put(withdraw_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn create_company_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.create_company(input) {
        Ok(company) => {
            Envelope::created("Company created", json!({ "id": company.id() })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_companies_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
) -> Response
where
    S: BoardStore + 'static,
{
    let exclude = ExcludeSet::of(&[Relation::Company, Relation::JobsApplied]);
    match service.companies(&exclude) {
        Ok(views) => Envelope::ok("List of companies", views).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn company_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(company_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<CompanyId>(&company_id, EntityKind::Company) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    let exclude = ExcludeSet::of(&[Relation::Company, Relation::JobsApplied]);
    match service.company(id, &exclude) {
        Ok(view) => Envelope::ok("Company found", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_company_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(company_id): Path<String>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<CompanyId>(&company_id, EntityKind::Company) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::Company, Relation::JobsApplied]);
    match service.update_company(id, input, &exclude) {
        Ok(view) => Envelope::ok("Company updated", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_company_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(company_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<CompanyId>(&company_id, EntityKind::Company) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    match service.delete_company(id) {
        Ok(()) => Envelope::ok("Company deleted", ()).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn create_job_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    payload: Result<Json<JobInput>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.create_job(input) {
        Ok(job) => Envelope::created("Job post created", json!({ "id": job.id() })).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_jobs_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    query: Result<Query<JobListQuery>, QueryRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return malformed_query(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::JobPosts, Relation::Applicants]);
    match service.jobs(&query.into_filter(), &exclude) {
        Ok(views) => Envelope::ok("List of job posts", views).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn job_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<JobId>(&job_id, EntityKind::Job) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    let exclude = ExcludeSet::of(&[Relation::JobPosts, Relation::JobsApplied]);
    match service.job(id, &exclude) {
        Ok(view) => Envelope::ok("Job post found", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_job_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(job_id): Path<String>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<JobId>(&job_id, EntityKind::Job) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };
    let Json(update) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.update_job(id, update) {
        Ok(job) => Envelope::ok("Job post updated", json!({ "id": job.id() })).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_job_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<JobId>(&job_id, EntityKind::Job) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    match service.delete_job(id) {
        Ok(()) => Envelope::ok("Job post deleted", ()).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn create_applicant_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    payload: Result<Json<ApplicantInput>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.create_applicant(input) {
        Ok(applicant) => {
            Envelope::created("Applicant created", json!({ "id": applicant.id() })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_applicants_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    caller: Option<Extension<CallerIdentity>>,
) -> Response
where
    S: BoardStore + 'static,
{
    let message = match &caller {
        Some(Extension(identity)) => {
            format!("List of applicants requested by {}", identity.subject)
        }
        None => "List of applicants".to_string(),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::JobPosts, Relation::Company]);
    match service.applicants(&ApplicationFilter::default(), &exclude) {
        Ok(views) => Envelope::ok(message, views).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn applicant_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<ApplicantId>(&applicant_id, EntityKind::Applicant) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::JobPosts]);
    match service.applicant(id, &exclude) {
        Ok(view) => Envelope::ok("Applicant found", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_applicant_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(applicant_id): Path<String>,
    payload: Result<Json<ApplicantInput>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<ApplicantId>(&applicant_id, EntityKind::Applicant) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::JobPosts]);
    match service.update_applicant(id, input, &exclude) {
        Ok(view) => Envelope::ok("Applicant updated", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_applicant_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<ApplicantId>(&applicant_id, EntityKind::Applicant) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };

    match service.delete_applicant(id) {
        Ok(()) => Envelope::ok("Applicant deleted", ()).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_applications_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    query: Result<Query<ApplicationListQuery>, QueryRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return malformed_query(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::Company]);
    match service.applicants(&query.into_filter(), &exclude) {
        Ok(views) => Envelope::ok("List of applications", views).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn apply_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(applicant_id): Path<String>,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<ApplicantId>(&applicant_id, EntityKind::Applicant) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::Company]);
    match service.apply_to_job(id, request.jobs_applied, &exclude) {
        Ok(view) => Envelope::ok("Application successful", view).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn withdraw_handler<S>(
    State(service): State<Arc<BoardService<S>>>,
    Path(applicant_id): Path<String>,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
{
    let id = match parse_id::<ApplicantId>(&applicant_id, EntityKind::Applicant) {
        Ok(id) => id,
        Err(envelope) => return envelope.into_response(),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    let exclude = ExcludeSet::of(&[Relation::Applicants, Relation::Company]);
    match service.withdraw_application(id, request.jobs_applied, &exclude) {
        Ok(view) => Envelope::ok("Application withdrawn", view).into_response(),
        Err(error) => error.into_response(),
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        match self {
            BoardError::Validation(violations) => Envelope::new(
                StatusCode::BAD_REQUEST,
                "Invalid input",
                violations.as_value(),
            )
            .into_response(),
            BoardError::NotFound { kind, id } => not_found(kind, &id.to_string()).into_response(),
            BoardError::ReferentialIntegrity(message) => {
                Envelope::new(StatusCode::CONFLICT, message, ()).into_response()
            }
            BoardError::Store(_) => {
                Envelope::new(StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable", ())
                    .into_response()
            }
        }
    }
}

fn parse_id<T>(raw: &str, kind: EntityKind) -> Result<T, Envelope>
where
    T: FromStr<Err = uuid::Error>,
{
    raw.parse().map_err(|_| not_found(kind, raw))
}

fn not_found(kind: EntityKind, id: &str) -> Envelope {
    Envelope::new(
        StatusCode::NOT_FOUND,
        format!("{kind} not found"),
        json!({ "id": id }),
    )
}

fn malformed_body(rejection: JsonRejection) -> Response {
    Envelope::new(
        StatusCode::BAD_REQUEST,
        "Malformed request body",
        json!({ "detail": rejection.body_text() }),
    )
    .into_response()
}

fn malformed_query(rejection: QueryRejection) -> Response {
    Envelope::new(
        StatusCode::BAD_REQUEST,
        "Malformed query string",
        json!({ "detail": rejection.body_text() }),
    )
    .into_response()
}
