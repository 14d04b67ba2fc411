mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{DetailArgs, LoanArgs};

/// Mortgage amortization calculator
#[derive(Parser)]
#[command(
    name = "house-loan",
    version,
    about = "Mortgage amortization calculator",
    long_about = "Computes equal-payment and equal-principal repayment summaries and \
                  month-by-month schedules for single and blended (provident fund + \
                  commercial) house loans. Set RUST_LOG=debug to trace the pipeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a loan under both repayment conventions
    Summary(LoanArgs),
    /// Month-by-month schedule for one convention, grouped by loan year
    Detail(DetailArgs),
    /// Unformatted summaries with methodology and warnings
    Analyze(LoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Detail(args) => commands::loan::run_detail(args),
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::Version => {
            println!("house-loan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
