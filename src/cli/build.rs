use super::{inject_files, write_log, SettingsArgs};
use cif_templates::{load_sequences, parse_seeds, write_input, FoldInput, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// JSON file holding the `sequences` array of the job
    #[arg(short = 'q', long)]
    sequences: PathBuf,

    /// mmCIF file to take templates from. Repeat to inject several files in order
    #[arg(short, long = "cif")]
    cif: Vec<PathBuf>,

    /// Name of the job, also used as the output file name
    #[arg(short = 'n', long = "name", default_value_t = String::from("af3_job"))]
    name: String,

    /// Comma-separated model seeds, e.g. 1,2,3
    #[arg(short, long, default_value_t = String::from("1"))]
    seeds: String,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Also save the injection log to this file
    #[arg(short, long = "log-file")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    settings: SettingsArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let seeds = parse_seeds(&args.seeds)?;
    let sequences = load_sequences(&args.sequences)?;
    debug!(
        "Building job '{}' with {} sequence(s) and seeds {seeds:?}",
        args.name,
        sequences.len()
    );
    let mut job = FoldInput::new(args.name.as_str(), seeds, sequences);

    let logs = inject_files(&mut job, &args.cif, args.settings.to_settings())?;

    let output_file = args.output.join(format!("{}.json", args.name));
    write_input(&job, &output_file)?;
    info!("Results saved to {}", output_file.display());

    if let Some(log_file) = &args.log_file {
        write_log(&logs, log_file)?;
    }
    Ok(())
}
