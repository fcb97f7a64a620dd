//! levelmark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "levelmark", version, about = "CEFR placement and study companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the placement assessment
    Assess {
        /// Path to a .toml question bank
        #[arg(long, default_value = "banks/placement.toml")]
        bank: PathBuf,

        /// Seed for reproducible question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON report here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Take a comprehension quiz centered on your level
    Quiz {
        /// Path to a .toml question bank
        #[arg(long, default_value = "banks/quiz.toml")]
        bank: PathBuf,

        /// CEFR level to center the quiz on (A1-C2)
        #[arg(long, default_value = "B1")]
        level: String,

        /// Seed for reproducible question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON report here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Study vocabulary flashcards
    Study {
        /// Path to a .toml vocabulary bank
        #[arg(long, default_value = "banks/vocabulary.toml")]
        vocab: PathBuf,

        /// Your CEFR level (A1-C2)
        #[arg(long, default_value = "B1")]
        level: String,

        /// Seed for reproducible deck shuffling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read graded bilingual passages
    Read {
        /// Path to a .toml passage library
        #[arg(long, default_value = "banks/passages.toml")]
        passages: PathBuf,

        /// Your CEFR level (A1-C2)
        #[arg(long, default_value = "B1")]
        level: String,

        /// Display mode: bilingual, english, chinese
        #[arg(long, default_value = "bilingual")]
        mode: String,
    },

    /// Render an achievement poster
    Poster {
        /// Saved assessment report to draw level and scores from
        #[arg(long)]
        report: Option<PathBuf>,

        /// CEFR level when no report is given (A1-C2)
        #[arg(long, default_value = "B1")]
        level: String,

        /// Poster style: classic, minimal, vibrant
        #[arg(long, default_value = "classic")]
        style: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter bank content
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("levelmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess { bank, seed, output } => commands::assess::execute(bank, seed, output),
        Commands::Quiz {
            bank,
            level,
            seed,
            output,
        } => commands::quiz::execute(bank, level, seed, output),
        Commands::Study { vocab, level, seed } => commands::study::execute(vocab, level, seed),
        Commands::Read {
            passages,
            level,
            mode,
        } => commands::read::execute(passages, level, mode),
        Commands::Poster {
            report,
            level,
            style,
        } => commands::poster::execute(report, level, style),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
