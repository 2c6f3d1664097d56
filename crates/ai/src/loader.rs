use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::isolation_forest::{ForestArtifact, IsolationForest};
use crate::result::LoadError;

/// Artifact location used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "anomaly_model.json";

/// Load the trained forest from `path`.
///
/// Returns `Ok(None)` when the file does not exist: the caller keeps running
/// without a model and every prediction reports it as unavailable. Any other
/// failure (permissions, malformed JSON, invalid trees) is an error.
pub fn load_model(path: impl AsRef<Path>) -> Result<Option<IsolationForest>, LoadError> {
    let path = path.as_ref();

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "model artifact not found; run the training pipeline first. Serving without a model"
            );
            return Ok(None);
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let artifact: ForestArtifact =
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let forest = IsolationForest::try_from(artifact)?;

    info!(
        path = %path.display(),
        trees = forest.n_trees(),
        features = ?forest.feature_names(),
        trained_at = ?forest.metadata().trained_at,
        "model artifact loaded"
    );

    Ok(Some(forest))
}
