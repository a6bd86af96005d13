use crate::demo::{run_demo, DemoArgs};
use crate::infra::{load_command_config, open_store, parse_email};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::board::jobs::{JobBoardService, JobCsvImporter};
use job_board::board::Email;
use job_board::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Run the job board service or manage its data from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Walk through the applicant lifecycle against an in-memory store
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Bulk-create postings from a CSV export
    Import(JobImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Persist records to this JSON snapshot instead of APP_DATA_PATH
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct JobImportArgs {
    /// CSV file with Title,Company,Location,Type,Salary,Description columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Employer e-mail recorded as the poster of every imported job
    #[arg(long, value_parser = parse_email)]
    pub(crate) posted_by: Email,
    /// Snapshot to import into (defaults to APP_DATA_PATH)
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Jobs {
            command: JobsCommand::Import(args),
        } => run_job_import(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_job_import(args: JobImportArgs) -> Result<(), AppError> {
    let config = load_command_config()?;
    let data_path = args.data_path.or(config.storage.data_path);
    if data_path.is_none() {
        println!("No data path configured; imported postings will not outlive this command.");
    }

    let drafts = JobCsvImporter::from_path(&args.csv, &args.posted_by)?;
    let store = open_store(data_path.as_deref())?;
    let service = JobBoardService::new(store);
    let postings = service.import(drafts)?;

    println!(
        "Imported {} job posting(s) for {} from {}",
        postings.len(),
        args.posted_by,
        args.csv.display()
    );
    for posting in &postings {
        println!(
            "  {}  {} at {} ({})",
            posting.id,
            posting.title,
            posting.company,
            posting.job_type.label()
        );
    }
    Ok(())
}
