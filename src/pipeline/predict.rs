//! Prediction requests: encode, load, infer, truncate

use std::path::Path;

use faer::Mat;
use serde::Serialize;

use crate::pipeline::encoding::{build_feature_vector, FeatureVector, Selections, FEATURE_COUNT};
use crate::pipeline::error::{ModelError, PredictionError};
use crate::pipeline::model::{ModelLoader, Regressor};

/// Model output for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw model output
    pub raw: f64,
    /// Output truncated toward zero
    pub hampers: i64,
}

/// Run the model on a single feature vector.
///
/// The vector is sent as a batch of one row and element [0][0] of the result
/// is kept. The hamper count truncates rather than rounds.
pub fn predict(model: &dyn Regressor, features: &FeatureVector) -> Result<Prediction, ModelError> {
    let values = features.to_f64();
    let batch = Mat::from_fn(1, FEATURE_COUNT, |_, j| values[j]);

    let output = model.predict_batch(&batch)?;
    if output.nrows() != 1 || output.ncols() != 1 {
        return Err(ModelError::OutputShape {
            rows: output.nrows(),
            cols: output.ncols(),
        });
    }

    let raw = output[(0, 0)];
    if !raw.is_finite() {
        return Err(ModelError::NonFiniteOutput(raw));
    }

    Ok(Prediction {
        raw,
        hampers: raw.trunc() as i64,
    })
}

/// Full request pipeline.
///
/// Labels are encoded before the artifact is touched, so an unknown label
/// fails without loading anything.
pub fn predict_hampers(
    selections: &Selections,
    loader: &dyn ModelLoader,
    model_path: &Path,
) -> Result<Prediction, PredictionError> {
    let features = build_feature_vector(selections)?;
    let model = loader.load(model_path)?;
    Ok(predict(&*model, &features)?)
}
