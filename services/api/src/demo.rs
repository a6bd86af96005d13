use crate::infra::{load_command_config, open_store, BoardServices};
use clap::Args;
use job_board::board::accounts::{EmployerRegistration, SeekerRegistration};
use job_board::board::applicants::{
    ApplicantKey, ApplicantView, ApplyRequest, InterviewRequest, InterviewSlot, LifecycleError,
};
use job_board::board::jobs::JobDraft;
use job_board::board::JobId;
use job_board::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run against this snapshot instead of a throwaway in-memory store
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
    /// Seeker e-mail used for the walkthrough
    #[arg(long, default_value = "a@x.com")]
    pub(crate) seeker: String,
    /// Skip the reject step and leave the interview in place
    #[arg(long)]
    pub(crate) keep_interview: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    load_command_config()?;
    let store = open_store(args.data_path.as_deref())?;
    let services = BoardServices::new(store);

    println!("=== Job Board Demo ===");

    let employer = services.accounts.register_employer(EmployerRegistration {
        email: Some("hiring@acme.example".to_string()),
        password: Some("correct-horse".to_string()),
        company: Some("Acme".to_string()),
    })?;
    println!("Employer registered: {} ({})", employer.email, employer.company);

    let job = services.jobs.create(JobDraft {
        title: Some("Backend Engineer".to_string()),
        company: Some(employer.company.clone()),
        location: Some("Remote".to_string()),
        job_type: Some("Full Time".to_string()),
        salary: Some("$120k".to_string()),
        description: Some("Own the applicant pipeline.".to_string()),
        posted_by: Some(employer.email.to_string()),
    })?;
    println!("Job posted: {} [{}]", job.title, job.id);

    let seeker = services.accounts.register_seeker(SeekerRegistration {
        name: Some("Ada Seeker".to_string()),
        email: Some(args.seeker.clone()),
        password: Some("hunter2-hunter2".to_string()),
        ..SeekerRegistration::default()
    })?;
    println!("Seeker registered: {} <{}>", seeker.name, seeker.email);

    let apply = ApplyRequest {
        job_id: Some(job.id.to_string()),
        user_email: Some(seeker.email.to_string()),
    };
    let application = services.applicants.apply(apply.clone())?;
    println!("\nApplied: status={}", application.status);

    match services.applicants.apply(apply) {
        Err(LifecycleError::DuplicateApplication(key)) => {
            println!("Second application refused: {key} has already applied");
        }
        Err(other) => return Err(other.into()),
        Ok(_) => println!("Second application unexpectedly accepted"),
    }

    let interview = services.applicants.schedule(InterviewRequest {
        job_id: Some(job.id.to_string()),
        seeker_email: Some(seeker.email.to_string()),
        slot: InterviewSlot {
            interview_date: Some("2024-05-01".to_string()),
            interview_time: Some("10:00".to_string()),
            mode: Some("Online".to_string()),
            link: Some("https://meet.example/abc".to_string()),
            message: Some("Looking forward to it".to_string()),
        },
    })?;
    println!(
        "Interview scheduled: {} {} ({:?}) {}",
        interview.interview_date,
        interview.interview_time.format("%H:%M"),
        interview.mode,
        interview.link.as_deref().unwrap_or("-")
    );
    print_applicants(&services, &job.id)?;

    let key = ApplicantKey::new(job.id.clone(), seeker.email.clone());
    if !args.keep_interview {
        let rejected = services.applicants.reject(key.clone())?;
        println!("\nRejected: status={}", rejected.status);
        print_applicants(&services, &job.id)?;

        let withdrawn = services.applicants.withdraw(key)?;
        println!("\nWithdrawn: removed={withdrawn}");
        let reapplied = services.applicants.apply(ApplyRequest {
            job_id: Some(job.id.to_string()),
            user_email: Some(seeker.email.to_string()),
        })?;
        println!("Re-applied after withdrawal: status={}", reapplied.status);
    }

    let summaries = services.dashboard.employer_jobs(&employer.email)?;
    println!("\nEmployer dashboard:");
    for summary in &summaries {
        println!(
            "  {} - {} application(s)",
            summary.job.title, summary.applications_count
        );
    }
    println!(
        "  interviews scheduled: {}",
        services.dashboard.interview_count(&employer.email)?
    );

    Ok(())
}

fn print_applicants(services: &BoardServices, job_id: &JobId) -> Result<(), AppError> {
    let applicants = services.applicants.list_applicants(job_id)?;
    println!("Applicants for {job_id}:");
    for ApplicantView {
        application,
        interview_details,
    } in &applicants
    {
        let interview = interview_details
            .as_ref()
            .map(|record| {
                format!(
                    "{} {}",
                    record.interview_date,
                    record.interview_time.format("%H:%M")
                )
            })
            .unwrap_or_else(|| "none".to_string());
        println!(
            "  {} status={} interview={}",
            application.seeker_email, application.status, interview
        );
    }
    Ok(())
}
