use std::{
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    MlErr, Result,
    pipeline::Pipeline,
    record::{CATEGORICAL_COLUMNS, FeatureSchema},
};

/// The default location of the persisted pipeline.
pub const DEFAULT_ARTIFACT_PATH: &str = "regression_model.json";

/// Persists a fitted pipeline at `path`.
///
/// The pipeline is written to a sibling temporary file first and then renamed over `path`,
/// so a reader never observes a partially written artifact.
///
/// # Arguments
/// * `path` - Where to write the artifact.
/// * `pipeline` - The fitted pipeline.
pub fn save<P: AsRef<Path>>(path: P, pipeline: &Pipeline) -> Result<()> {
    let path = path.as_ref();
    let tmp = temporary_path(path);

    let io_err = |source: io::Error| MlErr::Artifact {
        path: path.to_path_buf(),
        source,
    };

    {
        let file = fs::File::create(&tmp).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, pipeline)?;
        writer.flush().map_err(io_err)?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    info!("pipeline artifact saved to {}", path.display());
    Ok(())
}

/// Loads a pipeline persisted by `save` and verifies it was fitted on the customer schema.
///
/// # Arguments
/// * `path` - The location of the artifact.
///
/// # Returns
/// The fitted pipeline, or an error if the file can't be read or decoded, or if its feature
/// schema differs from the one served.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Pipeline> {
    let path = path.as_ref();

    let file = fs::File::open(path).map_err(|source| MlErr::Artifact {
        path: path.to_path_buf(),
        source,
    })?;
    let pipeline: Pipeline = serde_json::from_reader(BufReader::new(file))?;

    verify_schema(&pipeline, &FeatureSchema::customer())?;

    debug!("pipeline artifact loaded from {}", path.display());
    Ok(pipeline)
}

fn verify_schema(pipeline: &Pipeline, expected: &FeatureSchema) -> Result<()> {
    let got = pipeline.schema();
    let encoders = pipeline.preprocessor().encoders().len();

    if got != expected || encoders != CATEGORICAL_COLUMNS.len() {
        return Err(MlErr::SchemaMismatch {
            expected: expected.to_string(),
            got: format!("{got} encoders={encoders}"),
        });
    }

    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
