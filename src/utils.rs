use crate::error::{Error, Result};
use crate::input::{sequences_from_json, FoldInput, SequenceEntry};
use polars::prelude::*;
use std::path::Path;

/// Run `f` inside a dedicated Rayon thread pool.
///
/// # Arguments
///
/// * `num_threads` - Number of threads (0 for all cores)
/// * `f` - Work to run inside the pool
pub fn run_with_threads<T, F>(num_threads: usize, f: F) -> Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;
    Ok(pool.install(f))
}

/// Read an mmCIF file into memory.
pub fn load_structure(input_file: impl AsRef<Path>) -> Result<String> {
    let path = input_file.as_ref();
    std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))
}

/// Read and decode an AlphaFold3 input JSON file.
pub fn load_input(input_file: impl AsRef<Path>) -> Result<FoldInput> {
    let path = input_file.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    FoldInput::from_json(&json)
}

/// Read a JSON file holding the bare `sequences` array of a job.
pub fn load_sequences(input_file: impl AsRef<Path>) -> Result<Vec<SequenceEntry>> {
    let path = input_file.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    let sequences = sequences_from_json(&json)?;
    if sequences.is_empty() {
        return Err(Error::NoSequences);
    }
    Ok(sequences)
}

/// Write an AlphaFold3 input JSON file, creating parent directories as needed.
pub fn write_input(input: &FoldInput, output_file: impl AsRef<Path>) -> Result<()> {
    let path = output_file.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::from_io(e, parent))?;
    }
    std::fs::write(path, input.to_json()?).map_err(|e| Error::from_io(e, path))
}

/// Parse a comma-separated seed list. Tokens that are not plain unsigned
/// integers are dropped; at least one valid seed must remain.
pub fn parse_seeds(raw: &str) -> Result<Vec<u32>> {
    let seeds: Vec<u32> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|s| s.parse().ok())
        .collect();

    if seeds.is_empty() {
        return Err(Error::NoSeeds(raw.to_string()));
    }
    Ok(seeds)
}

/// Write a DataFrame to a file, replacing its extension with the format's.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<()> {
    let output_file = file_path.with_extension(file_type.to_string());
    let mut file =
        std::fs::File::create(&output_file).map_err(|e| Error::from_io(e, &output_file))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_seed_lists() {
        assert_eq!(parse_seeds("1").unwrap(), vec![1]);
        assert_eq!(parse_seeds("1, 2,3").unwrap(), vec![1, 2, 3]);
        // Invalid tokens are dropped
        assert_eq!(parse_seeds("7,abc,,-4, 9 ").unwrap(), vec![7, 9]);
    }

    #[test]
    fn empty_seed_lists() {
        for raw in ["", " , ", "x,y", "-1", "1.5"] {
            assert!(matches!(parse_seeds(raw), Err(Error::NoSeeds(_))), "{raw}");
        }
    }

    #[test]
    fn test_missing_files() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/does-not-exist.cif");
        match load_structure(&path) {
            Err(Error::Io { path: p, .. }) => assert!(p.ends_with("does-not-exist.cif")),
            other => panic!("Expected an I/O error, found {other:?}"),
        }
        assert!(matches!(load_input(&path), Err(Error::Io { .. })));
    }

    #[test]
    fn test_input_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("cif-templates-{}", std::process::id()));
        let path = dir.join("nested").join("job.json");

        let input = FoldInput::new("job", vec![1, 2], Vec::new());
        write_input(&input, &path).unwrap();
        assert_eq!(load_input(&path).unwrap(), input);

        let seqs_path = dir.join("seqs.json");
        std::fs::write(&seqs_path, "[]").unwrap();
        assert!(matches!(load_sequences(&seqs_path), Err(Error::NoSequences)));
        std::fs::write(&seqs_path, r#"[{"protein": {"id": "A", "sequence": "MK"}}]"#).unwrap();
        assert_eq!(load_sequences(&seqs_path).unwrap().len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_csv() {
        let dir = std::env::temp_dir().join(format!("cif-templates-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut df = df!("chain" => ["A", "B"], "length" => [10u32, 20u32]).unwrap();
        write_df_to_file(&mut df, &dir.join("seqs"), DataFrameFileType::Csv).unwrap();

        let written = std::fs::read_to_string(dir.join("seqs.csv")).unwrap();
        assert_eq!(written.lines().next(), Some("chain,length"));
        assert_eq!(written.lines().count(), 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
