use cif_templates::cif::validate_structure;
use cif_templates::{
    get_sequences, load_structure, run_with_threads, sequences_to_df, write_df_to_file,
    DataFrameFileType, Result, SequenceRecord,
};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the mmCIF file(s) to be analyzed
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output file. Sequences are printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 0)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let per_file = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        args.input
            .par_iter()
            .map(|f| read_sequences(f))
            .collect::<Result<Vec<_>>>()
    })??;
    let records: Vec<SequenceRecord> = per_file.into_iter().flatten().collect();

    match &args.output {
        Some(output) => {
            let mut df = sequences_to_df(&records)?;
            write_df_to_file(&mut df, output, args.output_format)?;
            info!(
                "Saved {} chain sequence(s) to {}",
                df.height(),
                output.with_extension(args.output_format.to_string()).display()
            );
        }
        None => {
            let mut current_file: Option<&str> = None;
            for record in &records {
                if current_file != Some(record.file.as_str()) {
                    if current_file.is_some() {
                        println!();
                    }
                    println!("File: {}", record.file);
                    current_file = Some(record.file.as_str());
                }
                println!("{}: {}", record.chain, record.sequence);
            }
        }
    }
    Ok(())
}

fn read_sequences(path: &Path) -> Result<Vec<SequenceRecord>> {
    let cif = load_structure(path)?;
    validate_structure(&cif)?;

    let file = path.display().to_string();
    Ok(get_sequences(&cif)
        .into_iter()
        .map(|(chain, sequence)| SequenceRecord {
            file: file.clone(),
            chain,
            sequence,
        })
        .collect())
}
