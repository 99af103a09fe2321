use serde::{Serialize, Deserialize};

/// Element-wise nonlinearities applied after a layer's affine map.
///
/// Every variant except `Identity` corresponds to one node in an exported
/// graph; `Identity` emits nothing. All variants are parameter-free or carry
/// a fixed scalar, so none of them hold learnable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Identity,
    ReLU,
    Sigmoid,
    Tanh,
    LeakyReLU { alpha: f32 },
    Elu { alpha: f32 },
    /// Tanh approximation of GELU.
    Gelu,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (x.exp() - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f32 / std::f32::consts::PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
        }
    }
}
