//! quizforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Turn documents into graded quiz sets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate quiz sets from a document
    Convert {
        /// Plain-text document, or a pre-annotated .json document
        #[arg(long)]
        input: PathBuf,

        /// TOML file listing the requested sets
        #[arg(long)]
        request: Option<PathBuf>,

        /// Extra set as COUNT:DIFFICULTY:TYPE (e.g. "5:easy:mcq"), repeatable
        #[arg(long = "set", value_name = "SPEC")]
        sets: Vec<String>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Generator name from the config (default: config's default_generator)
        #[arg(long)]
        generator: Option<String>,

        /// Gazetteer TOML used to annotate plain-text input
        #[arg(long)]
        gazetteer: Option<PathBuf>,

        /// Output directory (default: config's output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a request file, optionally against a document
    Validate {
        /// TOML file listing the requested sets
        #[arg(long)]
        request: PathBuf,

        /// Document to check the request against
        #[arg(long)]
        input: Option<PathBuf>,

        /// Gazetteer TOML used to annotate plain-text input
        #[arg(long)]
        gazetteer: Option<PathBuf>,
    },

    /// Create starter config, example request and gazetteer
    Init,

    /// List configured question generators
    ListGenerators {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            request,
            sets,
            seed,
            generator,
            gazetteer,
            output,
            config,
        } => {
            commands::convert::execute(commands::convert::ConvertArgs {
                input,
                request,
                sets,
                seed,
                generator,
                gazetteer,
                output,
                config,
            })
            .await
        }
        Commands::Validate {
            request,
            input,
            gazetteer,
        } => commands::validate::execute(request, input, gazetteer),
        Commands::Init => commands::init::execute(),
        Commands::ListGenerators { config } => commands::list_generators::execute(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
