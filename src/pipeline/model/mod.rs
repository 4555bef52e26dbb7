//! Sequence model runtime.
//!
//! Loads a JSON model artifact (see [`artifact`]) and evaluates it in-process.
//! The loaders decide whether each request re-reads the artifact from disk or
//! reuses an unchanged one.

pub mod artifact;
mod cache;
mod layers;

use std::path::Path;

use faer::Mat;

use crate::pipeline::error::ModelError;
pub use artifact::{Activation, LayerSpec, ModelArtifact};
pub use cache::{CachedLoader, FreshLoader, ModelLoader};
use layers::Layer;

/// Anything that maps a (N x width) batch to a (N x outputs) batch
pub trait Regressor {
    /// Number of values per input row
    fn input_width(&self) -> usize;

    fn predict_batch(&self, batch: &Mat<f64>) -> Result<Mat<f64>, ModelError>;
}

/// A compiled Sequential network
#[derive(Debug, Clone)]
pub struct SequentialModel {
    timesteps: usize,
    features: usize,
    output_width: usize,
    layers: Vec<Layer>,
}

impl SequentialModel {
    /// Validate layer shapes end to end and compile the weights.
    ///
    /// The network must reduce every sample to a single timestep with one
    /// output value.
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ModelError> {
        let [timesteps, features] = artifact.input_shape;
        if timesteps == 0 || features == 0 {
            return Err(ModelError::Invalid(format!(
                "input_shape must be positive, got [{}, {}]",
                timesteps, features
            )));
        }
        if artifact.layers.is_empty() {
            return Err(ModelError::Invalid("model has no layers".to_string()));
        }

        let mut steps = timesteps;
        let mut width = features;
        let mut layers = Vec::with_capacity(artifact.layers.len());
        for (index, spec) in artifact.layers.iter().enumerate() {
            let (layer, next_steps, next_width) = Layer::compile(index, spec, steps, width)?;
            layers.push(layer);
            steps = next_steps;
            width = next_width;
        }

        if steps != 1 || width != 1 {
            return Err(ModelError::Invalid(format!(
                "network output per sample is {}x{}, expected a single value",
                steps, width
            )));
        }

        Ok(Self {
            timesteps,
            features,
            output_width: width,
            layers,
        })
    }

    pub fn input_shape(&self) -> (usize, usize) {
        (self.timesteps, self.features)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl Regressor for SequentialModel {
    fn input_width(&self) -> usize {
        self.timesteps * self.features
    }

    fn predict_batch(&self, batch: &Mat<f64>) -> Result<Mat<f64>, ModelError> {
        if batch.ncols() != self.input_width() {
            return Err(ModelError::InputShape {
                expected: self.input_width(),
                timesteps: self.timesteps,
                features: self.features,
                found: batch.ncols(),
            });
        }

        let mut output = Mat::<f64>::zeros(batch.nrows(), self.output_width);
        for row in 0..batch.nrows() {
            // Row-major reshape of one row into (timesteps x features)
            let mut sample = Mat::from_fn(self.timesteps, self.features, |t, f| {
                batch[(row, t * self.features + f)]
            });
            for layer in &self.layers {
                sample = layer.forward(&sample);
            }
            for j in 0..self.output_width {
                output[(row, j)] = sample[(0, j)];
            }
        }

        Ok(output)
    }
}

/// Read and compile a model artifact from disk
pub fn load_model(path: &Path) -> Result<SequentialModel, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|source| ModelError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    SequentialModel::from_artifact(&artifact)
}
