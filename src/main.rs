use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use site_risk_lib::config::DEFAULT_CONFIG;
use site_risk_lib::risk::{hourly_profile, recommend_work_window, TaskProfile};
use site_risk_lib::{inspect_model, DatasetRewriter, Result, RunConfig, WeightTables};

#[derive(Debug, Parser)]
#[command(name = "site-risk", version, about = "Construction site risk index tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recalculate the risk_index column of a dataset in place
    UpdateRisk(UpdateArgs),
    /// Print the input/output schema and metadata of a Core ML model
    InspectModel(InspectArgs),
    /// Show the hour-by-hour risk curve and a recommended work window
    HourlyProfile(HourlyArgs),
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(long, default_value_os_t = DEFAULT_CONFIG.dataset_path.clone())]
    input: PathBuf,
    #[arg(long, default_value_os_t = DEFAULT_CONFIG.backup_path.clone())]
    backup: PathBuf,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Distinct values shown per histogram
    #[arg(long, default_value_t = DEFAULT_CONFIG.histogram_rows)]
    histogram_rows: usize,
    /// Emit the run report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[arg(long, default_value_os_t = DEFAULT_CONFIG.model_path.clone())]
    model: PathBuf,
    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct HourlyArgs {
    #[arg(long)]
    process: String,
    #[arg(long)]
    workers: u32,
    #[arg(long)]
    progress: u32,
    #[arg(long)]
    base_score: i32,
    /// 1-12; defaults to the current month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::UpdateRisk(args) => update_risk(args),
        Command::InspectModel(args) => inspect(args),
        Command::HourlyProfile(args) => hourly(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn update_risk(args: UpdateArgs) -> Result<()> {
    let config = RunConfig {
        dataset_path: args.input,
        backup_path: args.backup,
        histogram_rows: args.histogram_rows,
        seed: args.seed,
        ..RunConfig::default()
    };
    let weights = WeightTables::load()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = DatasetRewriter::new(&config, &weights).run(&mut rng)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render(config.histogram_rows));
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let summary = inspect_model(&args.model)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render());
    }
    Ok(())
}

fn hourly(args: HourlyArgs) -> Result<()> {
    let month = args.month.unwrap_or_else(|| Local::now().month());
    let task = TaskProfile {
        process: args.process,
        workers: args.workers,
        progress_rate: args.progress,
    };

    println!("Hourly risk for {} (month {}):", task.process, month);
    for entry in hourly_profile(&task, args.base_score, month) {
        println!(
            "  {:02}:00  {:>3}  {}",
            entry.hour,
            entry.score,
            entry.level().label()
        );
    }

    let window = recommend_work_window(&task, args.base_score, month);
    println!(
        "Recommended window: {:02}:00-{:02}:00 ({})",
        window.start_hour, window.end_hour, window.reason
    );
    Ok(())
}
