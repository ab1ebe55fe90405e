use crate::server;
use clap::{Args, Parser, Subcommand};
use poliz::config::AppConfig;
use poliz::error::AppError;
use poliz::incidents::{IncidentCsvImporter, ScoringEngine};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "poliz-api",
    about = "Incident risk scoring backend for the patrol dashboard",
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
    /// Score incidents from a CSV export without starting the server
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load incidents from a CSV export before accepting traffic
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export with `type,place,time,notes,latitude,longitude` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = ScoringEngine::new(config.scoring);
    let reports = IncidentCsvImporter::from_path(&args.csv)?;

    println!("Scored {} incidents from {}", reports.len(), args.csv.display());
    for report in &reports {
        let assessment = engine.assess(report);
        println!(
            "- {} | {} | {} -> score {} ({}){}",
            report.time.format("%Y-%m-%d %H:%M"),
            report.incident_type,
            report.place_text(),
            assessment.score(),
            assessment.rank_level(),
            if assessment.is_actionable() {
                " actionable"
            } else {
                ""
            }
        );
    }

    Ok(())
}
