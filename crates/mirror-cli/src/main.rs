//! mirror CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mirror_core::model::Chakra;

mod commands;
mod display;
mod prompt;

#[derive(Parser)]
#[command(
    name = "mirror",
    version,
    about = "ELA Archetype Mirror: discover the mask you created to stay safe and the sacred archetype beneath"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive application
    App {
        /// Directory with archetypes.json, testQuestions.json and pairings.json
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take the archetype test and optionally export a report
    Quiz {
        /// Comma-separated option ids, one per question (skips the interactive prompt)
        #[arg(long)]
        answers: Option<String>,

        /// Reference data directory
        #[arg(long)]
        data: Option<PathBuf>,

        /// Request a personalized AI summary
        #[arg(long)]
        summary: bool,

        /// Report formats to export: html, markdown, json, all
        #[arg(long)]
        format: Option<String>,

        /// Output directory for reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Archetype id to use for the report's pairing section
        #[arg(long)]
        partner: Option<String>,

        /// Name printed on the report
        #[arg(long)]
        name: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Browse the archetype library
    Library {
        /// Show a single archetype in detail
        #[arg(long)]
        id: Option<String>,

        /// Only list archetypes linked to this chakra (e.g. "heart", "third eye")
        #[arg(long)]
        chakra: Option<Chakra>,

        /// Reference data directory
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show the pairing insight between two archetypes
    Pairing {
        /// My archetype id
        a: String,

        /// Their archetype id
        b: String,

        /// Reference data directory
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show the chakra map for a primary/secondary result
    ChakraMap {
        /// Primary archetype id
        #[arg(long)]
        primary: String,

        /// Secondary archetype id (defaults to the primary)
        #[arg(long)]
        secondary: Option<String>,

        /// Reference data directory
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Validate reference data documents
    Validate {
        /// Reference data directory (embedded data when omitted)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// List available summary models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an editable copy of the reference data
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mirror=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::App { data, config } => commands::app::execute(data, config).await,
        Commands::Quiz {
            answers,
            data,
            summary,
            format,
            output,
            partner,
            name,
            config,
        } => {
            commands::quiz::execute(answers, data, summary, format, output, partner, name, config)
                .await
        }
        Commands::Library { id, chakra, data } => {
            commands::library::execute(id, chakra, data).await
        }
        Commands::Pairing { a, b, data } => commands::pairing::execute(a, b, data).await,
        Commands::ChakraMap {
            primary,
            secondary,
            data,
        } => commands::chakra_map::execute(primary, secondary, data).await,
        Commands::Validate { data } => commands::validate::execute(data).await,
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
