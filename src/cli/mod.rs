pub(crate) mod build;
pub(crate) mod inject;
pub(crate) mod seqs;

use cif_templates::{load_structure, Error, FoldInput, InjectSettings, Result, TemplateInjector};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Template matching options shared by the injecting commands.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct SettingsArgs {
    /// Length of the seed used when the full template is not found in the query
    #[arg(long = "seed-length", default_value_t = cif_templates::settings::SEED_LENGTH)]
    seed_length: usize,

    /// Number of template offsets the seed search may try
    #[arg(long = "search-window", default_value_t = cif_templates::settings::SEED_SEARCH_WINDOW)]
    search_window: usize,

    /// Minimum template length for matching chains by sequence
    #[arg(long = "min-length", default_value_t = cif_templates::settings::MIN_CANDIDATE_LENGTH)]
    min_candidate_length: usize,

    /// Template prefix length checked when matching chains by their start
    #[arg(long = "prefix-length", default_value_t = cif_templates::settings::PARTIAL_PREFIX_LENGTH)]
    partial_prefix_length: usize,
}

impl SettingsArgs {
    pub(crate) fn to_settings(&self) -> InjectSettings {
        InjectSettings {
            seed_length: self.seed_length,
            search_window: self.search_window,
            min_candidate_length: self.min_candidate_length,
            partial_prefix_length: self.partial_prefix_length,
        }
    }
}

/// Inject templates from each mmCIF file in turn, collecting the logs.
pub(crate) fn inject_files(
    job: &mut FoldInput,
    cif_files: &[PathBuf],
    settings: InjectSettings,
) -> Result<Vec<String>> {
    let injector = TemplateInjector::new(settings);
    let mut logs = Vec::new();
    for f in cif_files {
        debug!("Injecting templates from {}", f.display());
        let cif = load_structure(f)?;
        logs.extend(injector.inject(job, &cif)?);
    }
    Ok(logs)
}

/// Save the injection log, one decision per line.
pub(crate) fn write_log(logs: &[String], log_file: &Path) -> Result<()> {
    let mut text = logs.join("\n");
    text.push('\n');
    std::fs::write(log_file, text).map_err(|e| Error::from_io(e, log_file))
}
