use super::{inject_files, write_log, SettingsArgs};
use cif_templates::{load_input, write_input, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the AlphaFold3 input JSON
    #[arg(short, long)]
    input: PathBuf,

    /// mmCIF file to take templates from. Repeat to inject several files in order
    #[arg(short, long = "cif", required = true)]
    cif: Vec<PathBuf>,

    /// Output JSON file
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

    let mut job = load_input(&args.input)?;
    let logs = inject_files(&mut job, &args.cif, args.settings.to_settings())?;

    write_input(&job, &args.output)?;
    info!("Results saved to {}", args.output.display());

    if let Some(log_file) = &args.log_file {
        write_log(&logs, log_file)?;
    }
    Ok(())
}
