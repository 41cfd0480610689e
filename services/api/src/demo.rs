use crate::infra::InMemoryBoardStore;
use clap::Args;
use jobboard::error::AppError;
use jobboard::{
    ApplicantInput, BoardError, BoardService, CompanyId, CompanyInput, ExcludeSet, JobInput,
    Relation,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Keep the demo entities in the store instead of deleting them at the end
    #[arg(long)]
    pub(crate) skip_cleanup: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryBoardStore::default());
    let service = BoardService::new(store);

    println!("Job board demo");

    let company = match service.create_company(demo_company()) {
        Ok(company) => company,
        Err(err) => {
            println!("  Company rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Registered company {} ({})",
        company.name(),
        company.id()
    );

    let job = match service.create_job(demo_job(company.id())) {
        Ok(job) => job,
        Err(err) => {
            println!("  Job post rejected: {err}");
            return Ok(());
        }
    };
    println!("- Published job post {} ({})", job.title(), job.id());

    let applicant = match service.create_applicant(demo_applicant()) {
        Ok(applicant) => applicant,
        Err(err) => {
            println!("  Applicant rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Registered applicant {} ({})",
        applicant.name(),
        applicant.id()
    );

    let application_context = ExcludeSet::of(&[Relation::Applicants, Relation::Company]);
    match service.apply_to_job(applicant.id(), job.id(), &application_context) {
        Ok(view) => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("- Application filed:\n{json}"),
            Err(err) => println!("- Application filed (payload unavailable: {err})"),
        },
        Err(err) => {
            println!("  Application failed: {err}");
            return Ok(());
        }
    }

    let roster_context = ExcludeSet::of(&[Relation::JobPosts, Relation::JobsApplied]);
    match service.job(job.id(), &roster_context) {
        Ok(view) => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("- Job post roster:\n{json}"),
            Err(err) => println!("- Job post roster unavailable: {err}"),
        },
        Err(err) => println!("  Job lookup failed: {err}"),
    }

    match service.withdraw_application(applicant.id(), job.id(), &application_context) {
        Ok(_) => println!("- Application withdrawn"),
        Err(err) => println!("  Withdrawal failed: {err}"),
    }

    if args.skip_cleanup {
        println!("Cleanup skipped; demo entities kept in the store");
        return Ok(());
    }

    println!("\nCleanup");
    match service.delete_company(company.id()) {
        Err(BoardError::ReferentialIntegrity(message)) => {
            println!("- Company deletion blocked while its post remains: {message}")
        }
        Ok(()) => println!("- Company deleted"),
        Err(err) => println!("  Company deletion failed: {err}"),
    }

    match service.delete_applicant(applicant.id()) {
        Ok(()) => println!("- Applicant deleted"),
        Err(err) => println!("  Applicant deletion failed: {err}"),
    }
    match service.delete_job(job.id()) {
        Ok(()) => println!("- Job post deleted"),
        Err(err) => println!("  Job deletion failed: {err}"),
    }
    match service.delete_company(company.id()) {
        Ok(()) => println!("- Company deleted"),
        Err(err) => println!("  Company deletion failed: {err}"),
    }

    println!("Demo complete");
    Ok(())
}

fn demo_company() -> CompanyInput {
    CompanyInput {
        name: "Northwind Robotics".to_string(),
        description: "Industrial automation and warehouse robotics".to_string(),
        location: "Helsinki".to_string(),
        contact_information: "careers@northwind.example".to_string(),
    }
}

fn demo_job(company: CompanyId) -> JobInput {
    JobInput {
        title: "Platform Engineer".to_string(),
        description: "Build and operate the fleet control plane".to_string(),
        required_skills: "Rust, Kubernetes, PostgreSQL".to_string(),
        experience: "Four years operating distributed systems".to_string(),
        company,
    }
}

fn demo_applicant() -> ApplicantInput {
    ApplicantInput {
        name: "Ants Saar".to_string(),
        contact_information: "ants.saar@example.net".to_string(),
        job_preferences: "Robotics platforms and backend infrastructure".to_string(),
    }
}
