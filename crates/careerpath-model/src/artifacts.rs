//! Load-once artifact files.
//!
//! Both artifacts are JSON. They are read and validated before the server
//! binds; any failure here is fatal to the process.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::classifier::{Classifier, ClassifierArtifact};
use crate::error::ArtifactError;
use crate::scaler::RobustScaler;
use crate::scorer::Scorer;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_scaler(path: &Path) -> Result<Arc<RobustScaler>, ArtifactError> {
    let scaler: RobustScaler = read_json(path)?;
    scaler.validate()?;
    info!(
        "Scaler loaded successfully from {} ({} features)",
        path.display(),
        scaler.n_features()
    );
    Ok(Arc::new(scaler))
}

pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let artifact: ClassifierArtifact = read_json(path)?;
    let classifier = artifact.into_classifier()?;
    info!(
        "Model loaded successfully from {} ({} classes, {} features)",
        path.display(),
        classifier.classes().len(),
        classifier.n_features()
    );
    Ok(classifier)
}

/// Load both artifacts and check they agree on feature width.
pub fn load_scorer(model_path: &Path, scaler_path: &Path) -> Result<Scorer, ArtifactError> {
    let classifier = load_classifier(model_path).inspect_err(|e| error!("Error loading model: {}", e))?;
    let scaler = load_scaler(scaler_path).inspect_err(|e| error!("Error loading scaler: {}", e))?;

    if classifier.n_features() != scaler.n_features() {
        let err = ArtifactError::Invalid(format!(
            "classifier expects {} features but scaler produces {}",
            classifier.n_features(),
            scaler.n_features()
        ));
        error!("{}", err);
        return Err(err);
    }
    Ok(Scorer::new(scaler, classifier))
}
