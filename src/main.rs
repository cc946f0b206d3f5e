mod cli;

use clap::{Parser, Subcommand};
use tracing::{error, Level};

/// Extract per-chain mmCIF templates and inject them into AlphaFold3 input JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add templates to an existing AlphaFold3 input JSON
    Inject(cli::inject::Args),
    /// Build a new AlphaFold3 job from a sequences list, optionally with templates
    Build(cli::build::Args),
    /// Print or export the sequence of every chain in mmCIF files
    Seqs(cli::seqs::Args),
}

fn main() {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match &args.command {
        Commands::Inject(args) => cli::inject::run(args),
        Commands::Build(args) => cli::build::run(args),
        Commands::Seqs(args) => cli::seqs::run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
