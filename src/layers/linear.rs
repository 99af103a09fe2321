use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// A fully-connected layer: `a = act(x · Wᵀ + b)`.
///
/// `weight` is stored as (out_features × in_features) and `bias` as
/// (1 × out_features), so a layer's declared shape reads the same way its
/// exported initializers do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Linear {
    pub in_features: usize,
    pub out_features: usize,
    pub weight: Matrix,
    pub bias: Matrix,
    pub activation: ActivationFunction,
}

impl Linear {
    /// Creates a layer with weight and bias sampled from
    /// U(-1/√in_features, 1/√in_features).
    pub fn new(
        in_features: usize,
        out_features: usize,
        activation: ActivationFunction,
        rng: &mut impl Rng,
    ) -> Linear {
        let bound = 1.0 / (in_features as f32).sqrt();
        let weight = Matrix::uniform(out_features, in_features, -bound, bound, rng);
        let bias = Matrix::uniform(1, out_features, -bound, bound, rng);

        Linear {
            in_features,
            out_features,
            weight,
            bias,
            activation,
        }
    }

    /// Forward pass for a whole batch; `input` rows are samples.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        let z = input.clone() * self.weight.transpose();
        let z = z.add_row(&self.bias);
        z.map(|x| self.activation.function(x))
    }
}
