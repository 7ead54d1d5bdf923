mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "propdoc",
    version,
    about = "Classification and compliance analysis for property management documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an extracted-text file (without running the analyzers)
    Classify {
        /// Path to a plain-text file of extracted document text
        input_file: PathBuf,

        /// Custom vocabulary profile JSON file
        #[arg(short, long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Run the full pipeline and print the canonical report
    Analyze {
        /// Path to a plain-text file of extracted document text
        input_file: PathBuf,

        /// Original user question to thread into the generation brief
        #[arg(short, long, default_value = "")]
        message: String,

        /// Custom vocabulary profile JSON file
        #[arg(short, long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Print only the generation brief instead of the report
        #[arg(long)]
        prompt: bool,
    },
    /// Manage and inspect vocabulary profiles
    Vocab {
        #[command(subcommand)]
        action: VocabAction,
    },
}

#[derive(Subcommand)]
enum VocabAction {
    /// List the built-in vocabulary profiles
    List,
    /// Explain one document type's profile in plain language
    Explain {
        /// Document type (e.g. "gas-safety")
        doc_type: String,
    },
    /// Validate a custom vocabulary profile file
    Validate {
        /// Path to a JSON profile file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "propdoc=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input_file,
            profiles,
            output,
        } => commands::classify::run(input_file, profiles, &output),
        Commands::Analyze {
            input_file,
            message,
            profiles,
            output,
            prompt,
        } => commands::analyze::run(input_file, &message, profiles, &output, prompt),
        Commands::Vocab { action } => match action {
            VocabAction::List => commands::vocab::list(),
            VocabAction::Explain { doc_type } => commands::vocab::explain(&doc_type),
            VocabAction::Validate { file } => commands::vocab::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
