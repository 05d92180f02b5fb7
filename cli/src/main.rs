mod app;
mod commands;
mod config;
mod console;
mod menu;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{Config, ConfigOptions};
use healthdesk_core::bmi::CategoryScheme;
use healthdesk_core::water::WaterGranularity;

#[derive(Parser)]
#[command(
    name = "healthdesk",
    version,
    about = "A menu-driven personal health console",
    long_about = "Log water intake and weight, find recipes that fit a budget and a \
                  calorie goal, and calculate BMI. Everything is kept in plain text files."
)]
struct Cli {
    /// Directory holding the water and weight logs
    #[arg(long, env = "HEALTHDESK_DATA_DIR", value_name = "PATH")]
    data_dir: Option<PathBuf>,
    /// Directory holding the four budget-tier recipe CSV files (default: <data-dir>/recipes)
    #[arg(long, env = "HEALTHDESK_RECIPES_DIR", value_name = "PATH")]
    recipes_dir: Option<PathBuf>,
    /// How water intake is stamped: by date only, or by date and time
    #[arg(long, env = "HEALTHDESK_WATER_LOG", value_enum, default_value_t = WaterLogMode::Timestamp)]
    water_log: WaterLogMode,
    /// BMI category table: eight detailed buckets or four simple ones
    #[arg(long, env = "HEALTHDESK_BMI_SCHEME", value_enum, default_value_t = BmiScheme::Detailed)]
    bmi_scheme: BmiScheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WaterLogMode {
    Date,
    Timestamp,
}

impl From<WaterLogMode> for WaterGranularity {
    fn from(mode: WaterLogMode) -> Self {
        match mode {
            WaterLogMode::Date => WaterGranularity::Date,
            WaterLogMode::Timestamp => WaterGranularity::Timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BmiScheme {
    Detailed,
    Simple,
}

impl From<BmiScheme> for CategoryScheme {
    fn from(scheme: BmiScheme) -> Self {
        match scheme {
            BmiScheme::Detailed => CategoryScheme::Detailed,
            BmiScheme::Simple => CategoryScheme::Simple,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(ConfigOptions {
        data_dir: cli.data_dir,
        recipes_dir: cli.recipes_dir,
        water_granularity: cli.water_log.into(),
        bmi_scheme: cli.bmi_scheme.into(),
    })?;
    info!(
        data_dir = %config.data_dir.display(),
        recipes_dir = %config.recipes_dir.display(),
        water = ?config.water_granularity,
        bmi = ?config.bmi_scheme,
        "starting session"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(&config, stdin.lock(), stdout.lock());
    app.run()
}
