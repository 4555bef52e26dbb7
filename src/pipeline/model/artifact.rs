//! On-disk model document.
//!
//! A trained Keras-style Sequential network exported as JSON: the declared
//! input shape followed by each layer's weights, in the same layout as the
//! training framework's weight arrays.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// `[timesteps, features]` of one input sample
    pub input_shape: [usize; 2],
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerSpec {
    /// Gate blocks are laid out input, forget, cell, output along the columns.
    Lstm {
        units: usize,
        /// features x 4*units
        kernel: Vec<Vec<f64>>,
        /// units x 4*units
        recurrent_kernel: Vec<Vec<f64>>,
        /// 4*units
        bias: Vec<f64>,
        #[serde(default)]
        return_sequences: bool,
    },
    Dense {
        /// inputs x units
        kernel: Vec<Vec<f64>>,
        bias: Vec<f64>,
        #[serde(default)]
        activation: Activation,
    },
    /// No-op at inference time
    Dropout {
        #[serde(default)]
        rate: f64,
    },
}

impl LayerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            LayerSpec::Lstm { .. } => "lstm",
            LayerSpec::Dense { .. } => "dense",
            LayerSpec::Dropout { .. } => "dropout",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
        }
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
