//! Compiled layers and their forward passes.
//!
//! A sample flows through the network as a (timesteps x width) matrix.

use faer::Mat;

use super::artifact::{sigmoid, Activation, LayerSpec};
use crate::pipeline::error::ModelError;

#[derive(Debug, Clone)]
pub(crate) enum Layer {
    Lstm(LstmLayer),
    Dense(DenseLayer),
    Identity,
}

impl Layer {
    /// Validate a layer spec against the incoming sequence shape.
    ///
    /// Returns the compiled layer and the (timesteps, width) it produces.
    pub(crate) fn compile(
        index: usize,
        spec: &LayerSpec,
        timesteps: usize,
        width: usize,
    ) -> Result<(Layer, usize, usize), ModelError> {
        let kind = spec.kind();
        let invalid = |message: String| ModelError::InvalidLayer {
            layer: index,
            kind,
            message,
        };

        match spec {
            LayerSpec::Lstm {
                units,
                kernel,
                recurrent_kernel,
                bias,
                return_sequences,
            } => {
                let units = *units;
                if units == 0 {
                    return Err(invalid("units must be positive".to_string()));
                }
                let gates = 4 * units;
                let kernel = to_matrix(kernel, width, gates, "kernel").map_err(invalid)?;
                let recurrent =
                    to_matrix(recurrent_kernel, units, gates, "recurrent_kernel").map_err(invalid)?;
                if bias.len() != gates {
                    return Err(invalid(format!(
                        "bias has {} values, expected {}",
                        bias.len(),
                        gates
                    )));
                }

                let out_steps = if *return_sequences { timesteps } else { 1 };
                Ok((
                    Layer::Lstm(LstmLayer {
                        units,
                        kernel,
                        recurrent,
                        bias: bias.clone(),
                        return_sequences: *return_sequences,
                    }),
                    out_steps,
                    units,
                ))
            }
            LayerSpec::Dense {
                kernel,
                bias,
                activation,
            } => {
                let units = bias.len();
                if units == 0 {
                    return Err(invalid("bias must not be empty".to_string()));
                }
                let kernel = to_matrix(kernel, width, units, "kernel").map_err(invalid)?;
                Ok((
                    Layer::Dense(DenseLayer {
                        kernel,
                        bias: bias.clone(),
                        activation: *activation,
                    }),
                    timesteps,
                    units,
                ))
            }
            LayerSpec::Dropout { .. } => Ok((Layer::Identity, timesteps, width)),
        }
    }

    pub(crate) fn forward(&self, input: &Mat<f64>) -> Mat<f64> {
        match self {
            Layer::Lstm(lstm) => lstm.forward(input),
            Layer::Dense(dense) => dense.forward(input),
            Layer::Identity => input.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LstmLayer {
    units: usize,
    kernel: Mat<f64>,
    recurrent: Mat<f64>,
    bias: Vec<f64>,
    return_sequences: bool,
}

impl LstmLayer {
    fn forward(&self, input: &Mat<f64>) -> Mat<f64> {
        let steps = input.nrows();
        let u = self.units;

        // Input contribution for every timestep at once: (steps x 4u)
        let projected = input * &self.kernel;

        let mut h = Mat::<f64>::zeros(1, u);
        let mut c = vec![0.0; u];
        let mut outputs = Mat::<f64>::zeros(steps, u);

        for t in 0..steps {
            let recurrent = &h * &self.recurrent;
            let z = |gate: usize, k: usize| {
                let col = gate * u + k;
                projected[(t, col)] + recurrent[(0, col)] + self.bias[col]
            };

            let mut next_h = Mat::<f64>::zeros(1, u);
            for k in 0..u {
                let input_gate = sigmoid(z(0, k));
                let forget_gate = sigmoid(z(1, k));
                let candidate = z(2, k).tanh();
                let output_gate = sigmoid(z(3, k));

                c[k] = forget_gate * c[k] + input_gate * candidate;
                next_h[(0, k)] = output_gate * c[k].tanh();
                outputs[(t, k)] = next_h[(0, k)];
            }
            h = next_h;
        }

        if self.return_sequences {
            outputs
        } else {
            h
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DenseLayer {
    kernel: Mat<f64>,
    bias: Vec<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &Mat<f64>) -> Mat<f64> {
        let linear = input * &self.kernel;
        Mat::from_fn(linear.nrows(), linear.ncols(), |i, j| {
            self.activation.apply(linear[(i, j)] + self.bias[j])
        })
    }
}

/// Build a matrix from row vectors, checking the expected dimensions
fn to_matrix(
    rows: &[Vec<f64>],
    nrows: usize,
    ncols: usize,
    what: &str,
) -> Result<Mat<f64>, String> {
    if rows.len() != nrows {
        return Err(format!("{} has {} rows, expected {}", what, rows.len(), nrows));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(format!(
            "{} row {} has {} values, expected {}",
            what,
            i,
            row.len(),
            ncols
        ));
    }
    Ok(Mat::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_matrix_checks_shape() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let m = to_matrix(&rows, 2, 2, "kernel").unwrap();
        assert_eq!(m[(1, 0)], 3.0);

        assert!(to_matrix(&rows, 3, 2, "kernel").is_err());
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        let err = to_matrix(&ragged, 2, 2, "kernel").unwrap_err();
        assert!(err.contains("row 1"));
    }

    #[test]
    fn test_dense_forward_relu() {
        let spec = LayerSpec::Dense {
            kernel: vec![vec![1.0, -1.0], vec![1.0, -1.0]],
            bias: vec![0.5, 0.0],
            activation: Activation::Relu,
        };
        let (layer, steps, width) = Layer::compile(0, &spec, 1, 2).unwrap();
        assert_eq!((steps, width), (1, 2));

        let input = Mat::from_fn(1, 2, |_, j| (j + 1) as f64);
        let out = layer.forward(&input);
        assert_eq!(out[(0, 0)], 3.5);
        assert_eq!(out[(0, 1)], 0.0);
    }

    #[test]
    fn test_lstm_single_step_matches_hand_computation() {
        // One unit, one feature; all gate pre-activations equal x
        let spec = LayerSpec::Lstm {
            units: 1,
            kernel: vec![vec![1.0, 1.0, 1.0, 1.0]],
            recurrent_kernel: vec![vec![0.0, 0.0, 0.0, 0.0]],
            bias: vec![0.0; 4],
            return_sequences: false,
        };
        let (layer, steps, width) = Layer::compile(0, &spec, 1, 1).unwrap();
        assert_eq!((steps, width), (1, 1));

        let x = 0.5f64;
        let input = Mat::from_fn(1, 1, |_, _| x);
        let out = layer.forward(&input);

        let c = sigmoid(x) * x.tanh();
        let expected = sigmoid(x) * c.tanh();
        assert!((out[(0, 0)] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_lstm_rejects_wrong_bias_length() {
        let spec = LayerSpec::Lstm {
            units: 1,
            kernel: vec![vec![0.0; 4]],
            recurrent_kernel: vec![vec![0.0; 4]],
            bias: vec![0.0; 3],
            return_sequences: false,
        };
        let err = Layer::compile(2, &spec, 1, 1).unwrap_err();
        assert!(err.to_string().contains("layer 2 (lstm)"));
    }
}
