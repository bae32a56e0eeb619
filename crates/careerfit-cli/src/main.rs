//! careerfit CLI: score career-fit self-assessments from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "careerfit", version, about = "Career fit self-assessment scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer sheet and print or export the report
    Score {
        /// Path to the answers .toml file
        #[arg(long)]
        answers: PathBuf,

        /// Catalog .toml file (default: built-in medical coding catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, html, all (comma-separated)
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory; exports are printed to stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List catalog questions
    Questions {
        /// Catalog .toml file (default: built-in medical coding catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show one section: psychological_fit, technical_aptitude, wiscar
        #[arg(long)]
        section: Option<String>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Create starter config and answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careerfit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            answers,
            catalog,
            config,
            format,
            output,
        } => commands::score::execute(answers, catalog, config, format, output),
        Commands::Questions { catalog, section } => commands::questions::execute(catalog, section),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
