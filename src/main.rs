use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use supply_dash::analyzer::Analyzer;
use supply_dash::config::DashboardConfig;
use supply_dash::dashboard::save_page;
use supply_dash::error::{DashError, Result};
use supply_dash::output;
use supply_dash::session::{DashboardKind, Session};

#[derive(Parser)]
#[command(name = "supply-dash", about = "Supplier analytics dashboard over synthetic supply-chain data")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the synthetic data generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Date of the newest ledger month (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the roster, ledger and score summaries as CSV
    Generate {
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Render dashboard pages as HTML, with the workbook next to them
    Dashboard {
        /// supplier-analytics, supply-chain-performance or risk-management
        #[arg(long, default_value = "supplier-analytics")]
        kind: DashboardKind,

        /// Render all three dashboards
        #[arg(long)]
        all: bool,

        /// Evaluation year to show (defaults to the latest)
        #[arg(long)]
        year: Option<i32>,

        /// Case-insensitive filter on supplier name or category
        #[arg(long, default_value = "")]
        search: String,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Export the two-sheet Excel report
    Export {
        /// Year used in the default file name
        #[arg(long)]
        year: Option<i32>,

        /// Output file (defaults to supply_chain_report_<year>.xlsx)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print per-supplier scorecards
    Scorecard {
        /// Only use ledger months from this year
        #[arg(long)]
        year: Option<i32>,

        /// Also write the scorecards to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load_from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(as_of) = &cli.as_of {
        let date = NaiveDate::parse_from_str(as_of, "%Y-%m-%d").map_err(|e| {
            DashError::InvalidArgument(format!("invalid --as-of date '{}' (use YYYY-MM-DD): {}", as_of, e))
        })?;
        config.as_of = Some(date);
    }
    config.validate()?;
    Ok(config)
}

fn start_session(config: DashboardConfig) -> Result<Session> {
    let pb = spinner("Loading analytics...");
    let session = Session::start(config);
    pb.finish_and_clear();
    session
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Generate { output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let mut analyzer = Analyzer::new(config);

            let pb = spinner("Generating supplier data...");
            let summaries = analyzer.calculate_metrics()?.to_vec();
            let dataset = analyzer.generate_data()?;
            pb.finish_and_clear();

            output::save_roster_csv(&dataset.suppliers, &dir.join("suppliers.csv"))?;
            output::save_ledger_csv(&dataset.ledger, &dir.join("performance.csv"))?;
            output::save_summaries_csv(&summaries, &dir.join("scores.csv"))?;

            println!(
                "Generated {} suppliers, {} ledger records -> {}",
                dataset.suppliers.len(),
                dataset.ledger.len(),
                dir.display()
            );
        }

        Commands::Dashboard {
            kind,
            all,
            year,
            search,
            output_dir,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let mut session = start_session(config)?;
            if year.is_some() {
                session.select_year(year)?;
            }
            session.set_search(search);

            let kinds: Vec<DashboardKind> = if all {
                DashboardKind::all().to_vec()
            } else {
                vec![kind]
            };

            for kind in kinds {
                let html = session.render(kind)?.render()?;
                let path = dir.join(format!("{}.html", kind.slug()));
                save_page(&html, &path)?;
                println!("  {:<26} -> {}", kind.name(), path.display());
            }

            let workbook = dir.join(session.export_file_name());
            output::save_bytes(&session.export()?, &workbook)?;
            println!("  {:<26} -> {}", "Report", workbook.display());
        }

        Commands::Export { year, output } => {
            let mut session = start_session(config)?;
            if year.is_some() {
                session.select_year(year)?;
            }
            let path = output
                .unwrap_or_else(|| session.config().output_dir.join(session.export_file_name()));
            let bytes = session.export()?;
            output::save_bytes(&bytes, &path)?;
            println!("Exported {} bytes -> {}", bytes.len(), path.display());
        }

        Commands::Scorecard { year, csv } => {
            let mut analyzer = Analyzer::new(config);
            let pb = spinner("Scoring suppliers...");
            let cards = analyzer.scorecards(year)?;
            pb.finish_and_clear();

            println!(
                "{:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>6}  {}",
                "Supplier", "Perf", "Risk", "Quality", "OTIF", "Cost", "Trend", "Class"
            );
            for c in &cards {
                println!(
                    "{:<28} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>6}  {}",
                    c.supplier_name,
                    c.overall_performance_score.unwrap_or_default(),
                    c.composite_risk_score,
                    c.avg_quality_score,
                    c.otif_rate,
                    c.cost_competitiveness_score,
                    c.quality_trend.value(),
                    c.performance_class.map(|p| p.label()).unwrap_or("-"),
                );
            }

            if let Some(path) = csv {
                output::save_scorecards_csv(&cards, &path)?;
                println!("Saved {} scorecards -> {}", cards.len(), path.display());
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
